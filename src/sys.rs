//! Utilities for interfacing with OS-specific APIs.

pub mod screen;
pub mod session;
pub mod skylight;
