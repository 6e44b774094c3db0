pub mod actor;
pub mod common;
pub mod model;
#[cfg(target_os = "macos")]
pub mod sys;
#[cfg(target_os = "macos")]
pub mod ui;
