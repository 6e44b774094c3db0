//! Stateful controllers. All of them live on the main thread and are driven
//! synchronously by the run loop's callbacks.

pub mod lock_screen;
pub mod lock_screen_panel;
pub mod weather;
