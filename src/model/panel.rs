//! State and geometry of the lock screen overlay panel.
//!
//! Nothing in here touches a window. The controller in
//! [`crate::actor::lock_screen_panel`] computes every frame from these types
//! and only hands the result to the platform surface at the end.

use crate::common::config::LockScreenSettings;
use crate::model::geometry::{Rect, Size};

/// Observable state of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelState {
    pub exists: bool,
    pub visible: bool,
    pub expanded: bool,
    /// Last frame applied to the surface. `None` until the first show and
    /// again after every hide.
    pub frame: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PanelPhase {
    Unshown,
    Collapsed,
    Expanded,
    Hidden,
}

impl PanelState {
    pub fn phase(&self) -> PanelPhase {
        match (self.exists, self.visible, self.expanded) {
            (false, ..) => PanelPhase::Unshown,
            (true, false, _) => PanelPhase::Hidden,
            (true, true, false) => PanelPhase::Collapsed,
            (true, true, true) => PanelPhase::Expanded,
        }
    }
}

/// How a new frame or corner radius is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Instant,
    /// Fire-and-forget; the platform animation layer retargets if another
    /// transition starts before this one finishes.
    Animated { duration: f64 },
}

impl Transition {
    pub fn new(animated: bool, duration: f64) -> Self {
        if animated && duration > 0.0 {
            Transition::Animated { duration }
        } else {
            Transition::Instant
        }
    }
}

/// Fixed styling a surface gets when it is created. Every surface sits one
/// below the shielding level the lock screen draws at, so the system's own
/// lock screen chrome stays on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub non_activating: bool,
    pub all_spaces: bool,
    pub movable: bool,
    pub shadow: bool,
}

impl SurfaceStyle {
    pub const LOCK_SCREEN: SurfaceStyle = SurfaceStyle {
        non_activating: true,
        all_spaces: true,
        movable: false,
        shadow: false,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceContent {
    MediaPanel,
    Text(String),
}

/// Sizes and radii of the panel, taken from the lock screen settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub collapsed_size: Size,
    pub edge_margin: f64,
    pub collapsed_corner_radius: f64,
    pub expanded_corner_radius: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self { Self::from(&LockScreenSettings::default()) }
}

impl From<&LockScreenSettings> for PanelGeometry {
    fn from(settings: &LockScreenSettings) -> Self {
        Self {
            collapsed_size: Size::new(settings.collapsed_width, settings.collapsed_height),
            edge_margin: settings.edge_margin,
            collapsed_corner_radius: settings.collapsed_corner_radius,
            expanded_corner_radius: settings.expanded_corner_radius,
        }
    }
}

impl PanelGeometry {
    /// The collapsed pill for `display`: centered horizontally, just below the
    /// top edge by `edge_margin`.
    pub fn collapsed_anchor(&self, display: Rect) -> Rect {
        let min_y = display.max_y() - self.collapsed_size.height - self.edge_margin;
        Rect::centered_at(display.mid_x(), min_y, self.collapsed_size)
    }

    /// The collapsed frame re-derived from a stored anchor, so repeated
    /// collapses land on the same spot.
    pub fn collapsed_frame(&self, anchor: Rect) -> Rect {
        Rect::centered_at(anchor.mid_x(), anchor.min_y(), self.collapsed_size)
    }

    pub fn expanded_frame(&self, display: Rect) -> Rect { display }

    pub fn corner_radius(&self, expanded: bool) -> f64 {
        if expanded {
            self.expanded_corner_radius
        } else {
            self.collapsed_corner_radius
        }
    }
}
