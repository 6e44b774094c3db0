use objc2_app_kit::{NSScreen, NSWindowLevel};
use objc2_core_foundation::{CGPoint, CGRect, CGSize};
use objc2_foundation::MainThreadMarker;

use super::skylight::CGShieldingWindowLevel;
use crate::model::geometry::{Point, Rect, Size};

impl From<CGRect> for Rect {
    fn from(r: CGRect) -> Self {
        Rect::new(
            Point::new(r.origin.x, r.origin.y),
            Size::new(r.size.width, r.size.height),
        )
    }
}

impl From<Rect> for CGRect {
    fn from(r: Rect) -> Self {
        CGRect::new(
            CGPoint::new(r.origin.x, r.origin.y),
            CGSize::new(r.size.width, r.size.height),
        )
    }
}

/// Full frame of the screen holding the key window, in Cocoa coordinates.
pub fn main_display_frame(mtm: MainThreadMarker) -> Option<Rect> {
    NSScreen::mainScreen(mtm).map(|screen| Rect::from(screen.frame()))
}

/// One below the level the lock screen shield is drawn at, so the system's
/// lock icon stays visible above our windows.
pub fn below_shielding_level() -> NSWindowLevel {
    unsafe { CGShieldingWindowLevel() as NSWindowLevel - 1 }
}
