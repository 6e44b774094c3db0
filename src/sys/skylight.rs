// credits
// https://github.com/asmagill/hs._asm.undocumented.spaces/blob/master/CGSSpace.h.
// https://github.com/koekeishiya/yabai/blob/d55a647913ab72d8d8b348bee2d3e59e52ce4a5d/src/misc/extern.h.

use std::ffi::{c_int, c_void};

use objc2::rc::Retained;
use objc2_foundation::{NSArray, NSNumber};
use tracing::{debug, warn};

#[allow(non_camel_case_types)]
pub type cid_t = i32;

type CFArrayRef = *const c_void;

/// Absolute level of the space that hosts lock screen windows. The lock
/// screen itself sits below this.
const LOCK_SCREEN_SPACE_LEVEL: c_int = c_int::MAX;

/// Options for `SLSSpaceAddWindowsAndRemoveFromSpaces`: remove the windows
/// from every other space.
const REMOVE_FROM_ALL_SPACES: c_int = 7;

unsafe extern "C" {
    pub fn SLSMainConnectionID() -> cid_t;
    pub fn SLSSpaceCreate(cid: cid_t, unknown: c_int, options: c_int) -> u64;
    pub fn SLSSpaceSetAbsoluteLevel(cid: cid_t, space: u64, level: c_int) -> i32;
    pub fn SLSShowSpaces(cid: cid_t, spaces: CFArrayRef) -> i32;
    pub fn SLSSpaceAddWindowsAndRemoveFromSpaces(
        cid: cid_t,
        space: u64,
        windows: CFArrayRef,
        options: c_int,
    ) -> i32;

    pub fn CGShieldingWindowLevel() -> i32;
}

/// A window server space drawn above the lock screen. Windows moved into it
/// stay visible while the session is locked.
#[derive(Debug)]
pub struct LockScreenSpace {
    cid: cid_t,
    id: u64,
}

impl LockScreenSpace {
    pub fn create() -> Option<Self> {
        let cid = unsafe { SLSMainConnectionID() };
        let id = unsafe { SLSSpaceCreate(cid, 1, 0) };
        if id == 0 {
            warn!("SLSSpaceCreate failed");
            return None;
        }

        let err = unsafe { SLSSpaceSetAbsoluteLevel(cid, id, LOCK_SCREEN_SPACE_LEVEL) };
        if err != 0 {
            warn!(err, "SLSSpaceSetAbsoluteLevel failed");
        }

        let spaces = NSArray::from_retained_slice(&[NSNumber::new_u64(id)]);
        let err = unsafe { SLSShowSpaces(cid, Retained::as_ptr(&spaces).cast()) };
        if err != 0 {
            warn!(err, "SLSShowSpaces failed");
        }

        debug!(space = id, "created lock screen space");
        Some(Self { cid, id })
    }

    pub fn add_window(&self, window_number: u32) -> bool {
        let windows = NSArray::from_retained_slice(&[NSNumber::new_u32(window_number)]);
        let err = unsafe {
            SLSSpaceAddWindowsAndRemoveFromSpaces(
                self.cid,
                self.id,
                Retained::as_ptr(&windows).cast(),
                REMOVE_FROM_ALL_SPACES,
            )
        };
        if err != 0 {
            warn!(err, window_number, "failed to move window into lock screen space");
            return false;
        }
        true
    }
}
