//! Screen lock notifications.

use std::ptr::NonNull;

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, ProtocolObject};
use objc2_foundation::{
    NSDistributedNotificationCenter, NSNotification, NSObjectProtocol, NSOperationQueue,
    ns_string,
};
use tracing::debug;

/// Keeps the lock/unlock observers registered until dropped.
pub struct SessionObserver {
    center: Retained<NSDistributedNotificationCenter>,
    tokens: Vec<Retained<ProtocolObject<dyn NSObjectProtocol>>>,
}

impl SessionObserver {
    /// Calls `handler(true)` when the screen locks and `handler(false)` when
    /// it unlocks, on the main queue.
    pub fn install(handler: impl Fn(bool) + Clone + 'static) -> Self {
        let center = NSDistributedNotificationCenter::defaultCenter();
        let queue = NSOperationQueue::mainQueue();

        let mut tokens = Vec::with_capacity(2);
        for (name, locked) in [
            (ns_string!("com.apple.screenIsLocked"), true),
            (ns_string!("com.apple.screenIsUnlocked"), false),
        ] {
            let handler = handler.clone();
            let block = RcBlock::new(move |_note: NonNull<NSNotification>| {
                debug!(locked, "session notification");
                handler(locked);
            });
            let token = unsafe {
                center.addObserverForName_object_queue_usingBlock(
                    Some(name),
                    None,
                    Some(&queue),
                    &block,
                )
            };
            tokens.push(token);
        }

        Self { center, tokens }
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        for token in self.tokens.drain(..) {
            let observer: &AnyObject = (*token).as_ref();
            unsafe { self.center.removeObserver(observer) };
        }
    }
}
