pub mod geometry;
pub mod panel;
pub mod weather;

pub use geometry::{Point, Rect, Size};
pub use panel::{PanelPhase, PanelState};
