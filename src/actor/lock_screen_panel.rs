//! The lock screen media panel.
//!
//! One surface is created on the first [`LockScreenPanel::show_panel`] and
//! reused for the lifetime of the controller; hiding only orders it out.
//! Every frame is computed from [`PanelGeometry`] and the stored collapsed
//! anchor, the surface is only told the result.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::common::config::LockScreenSettings;
use crate::model::geometry::Rect;
use crate::model::panel::{
    PanelGeometry, PanelPhase, PanelState, SurfaceContent, SurfaceStyle, Transition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("no main display available")]
    NoDisplay,
    #[error("panel window has not been created")]
    NoWindow,
}

/// A window on the platform's window server.
pub trait PanelSurface {
    fn set_frame(&mut self, frame: Rect, transition: Transition);
    fn set_corner_radius(&mut self, radius: f64, transition: Transition);
    fn set_content(&mut self, content: SurfaceContent);
    fn clear_content(&mut self);
    /// Makes the surface visible without taking keyboard focus.
    fn order_front(&mut self);
    fn order_out(&mut self);
}

/// Access to the platform's displays and windows.
pub trait PanelSystem {
    type Surface: PanelSurface;

    /// Full frame of the main display, if one can be resolved.
    fn main_display(&self) -> Option<Rect>;
    fn create_surface(&mut self, frame: Rect, style: SurfaceStyle) -> Self::Surface;
    /// Moves the surface into the space that stays visible above the lock
    /// screen.
    fn delegate_to_lock_screen(&mut self, surface: &mut Self::Surface);
}

/// A secondary overlay whose visibility follows the panel: hidden while the
/// panel is expanded, shown again on collapse if it has data.
pub trait Companion {
    type Snapshot;

    fn snapshot(&self) -> Option<Self::Snapshot>;
    fn show(&mut self, snapshot: &Self::Snapshot);
    fn hide(&mut self);
}

struct Window<T> {
    surface: T,
    delegated: bool,
}

pub struct LockScreenPanel<S: PanelSystem, C: Companion> {
    system: S,
    companion: C,
    settings: LockScreenSettings,
    geometry: PanelGeometry,
    window: Option<Window<S::Surface>>,
    collapsed_frame: Option<Rect>,
    latest_frame: Option<Rect>,
    visible: bool,
    expanded: bool,
}

impl<S: PanelSystem, C: Companion> LockScreenPanel<S, C> {
    pub fn new(system: S, companion: C, settings: LockScreenSettings) -> Self {
        let geometry = PanelGeometry::from(&settings);
        Self {
            system,
            companion,
            settings,
            geometry,
            window: None,
            collapsed_frame: None,
            latest_frame: None,
            visible: false,
            expanded: false,
        }
    }

    /// Takes effect on the next show or resize.
    pub fn set_settings(&mut self, settings: LockScreenSettings) {
        self.geometry = PanelGeometry::from(&settings);
        self.settings = settings;
    }

    pub fn companion(&self) -> &C { &self.companion }

    pub fn companion_mut(&mut self) -> &mut C { &mut self.companion }

    /// The frame most recently applied to the surface, for aligning other
    /// overlays with the panel.
    pub fn latest_frame(&self) -> Option<Rect> { self.latest_frame }

    pub fn state(&self) -> PanelState {
        PanelState {
            exists: self.window.is_some(),
            visible: self.visible,
            expanded: self.expanded,
            frame: self.latest_frame,
        }
    }

    pub fn phase(&self) -> PanelPhase { self.state().phase() }

    pub fn show_panel(&mut self) -> Result<(), PanelError> {
        if !self.settings.enabled {
            debug!("lock screen widget disabled");
            if self.window.is_none() {
                return Ok(());
            }
            return match self.hide_panel() {
                Ok(()) | Err(PanelError::NoWindow) => Ok(()),
                Err(error) => Err(error),
            };
        }

        let Some(display) = self.system.main_display() else {
            warn!(error = %PanelError::NoDisplay, "cannot show lock screen panel");
            return Err(PanelError::NoDisplay);
        };

        let target = self.geometry.collapsed_anchor(display);
        self.collapsed_frame = Some(target);

        if self.window.is_none() {
            debug!(?target, "creating lock screen panel surface");
            let surface = self.system.create_surface(target, SurfaceStyle::LOCK_SCREEN);
            self.window = Some(Window { surface, delegated: false });
        }
        let Some(window) = &mut self.window else {
            return Err(PanelError::NoWindow);
        };

        window.surface.set_frame(target, Transition::Instant);
        window.surface.set_content(SurfaceContent::MediaPanel);
        window
            .surface
            .set_corner_radius(self.geometry.corner_radius(false), Transition::Instant);

        if !window.delegated {
            self.system.delegate_to_lock_screen(&mut window.surface);
            window.delegated = true;
        }

        window.surface.order_front();

        self.latest_frame = Some(target);
        self.visible = true;
        self.expanded = false;
        info!(frame = ?target, "lock screen panel visible");
        Ok(())
    }

    pub fn update_panel_size(&mut self, expanded: bool, animated: bool) -> Result<(), PanelError> {
        if self.window.is_none() {
            warn!(error = %PanelError::NoWindow, expanded, "cannot resize lock screen panel");
            return Err(PanelError::NoWindow);
        }

        let target = if expanded {
            let Some(display) = self.system.main_display() else {
                warn!(error = %PanelError::NoDisplay, "cannot expand lock screen panel");
                return Err(PanelError::NoDisplay);
            };
            self.companion.hide();
            self.geometry.expanded_frame(display)
        } else {
            let Some(anchor) = self.collapsed_frame else {
                return Err(PanelError::NoWindow);
            };
            if let Some(snapshot) = self.companion.snapshot() {
                self.companion.show(&snapshot);
            }
            self.geometry.collapsed_frame(anchor)
        };

        let transition = Transition::new(animated, self.settings.animation_duration);
        let radius = self.geometry.corner_radius(expanded);
        let Some(window) = &mut self.window else {
            return Err(PanelError::NoWindow);
        };
        window.surface.set_frame(target, transition);
        window.surface.set_corner_radius(radius, transition);

        self.latest_frame = Some(target);
        self.expanded = expanded;
        debug!(expanded, ?transition, frame = ?target, "resized lock screen panel");
        Ok(())
    }

    /// Flips between the collapsed and expanded presentation.
    pub fn toggle_expanded(&mut self, animated: bool) -> Result<(), PanelError> {
        self.update_panel_size(!self.expanded, animated)
    }

    pub fn hide_panel(&mut self) -> Result<(), PanelError> {
        let Some(window) = &mut self.window else {
            warn!(error = %PanelError::NoWindow, "cannot hide lock screen panel");
            return Err(PanelError::NoWindow);
        };

        window.surface.order_out();
        window.surface.clear_content();

        self.latest_frame = None;
        self.visible = false;
        self.expanded = false;
        info!("lock screen panel hidden");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::testing::*;
    use super::*;

    const DISPLAY: Rect = Rect::from_xywh(0.0, 0.0, 1440.0, 900.0);
    const COLLAPSED: Rect = Rect::from_xywh(620.0, 828.0, 200.0, 40.0);

    fn panel(display: Option<Rect>) -> (LockScreenPanel<StubSystem, StubCompanion>, StubSystem) {
        let system = StubSystem::new(display);
        let panel = LockScreenPanel::new(
            system.clone(),
            StubCompanion::default(),
            LockScreenSettings::default(),
        );
        (panel, system)
    }

    #[test]
    fn it_creates_and_styles_the_surface_on_first_show() {
        let (mut panel, system) = panel(Some(DISPLAY));
        assert_eq!(panel.phase(), PanelPhase::Unshown);

        panel.show_panel().unwrap();

        assert_eq!(
            system.calls(),
            vec![
                Call::Create(1, COLLAPSED, SurfaceStyle::LOCK_SCREEN),
                Call::SetFrame(1, COLLAPSED, Transition::Instant),
                Call::SetContent(1, SurfaceContent::MediaPanel),
                Call::SetCornerRadius(1, 28.0, Transition::Instant),
                Call::Delegate(1),
                Call::OrderFront(1),
            ]
        );
        assert_eq!(panel.phase(), PanelPhase::Collapsed);
        assert_eq!(panel.latest_frame(), Some(COLLAPSED));
    }

    #[test]
    fn repeated_shows_reuse_one_surface() {
        let (mut panel, system) = panel(Some(DISPLAY));
        for _ in 0..5 {
            panel.show_panel().unwrap();
        }
        panel.hide_panel().unwrap();
        panel.show_panel().unwrap();

        assert_eq!(system.created(), 1);
        let delegations =
            system.calls().iter().filter(|c| matches!(c, Call::Delegate(_))).count();
        assert_eq!(delegations, 1);
    }

    #[test]
    fn collapsed_panel_is_centered_on_the_display() {
        let display = Rect::from_xywh(-1920.0, 0.0, 1920.0, 1080.0);
        let (mut panel, _system) = panel(Some(display));
        panel.show_panel().unwrap();

        let frame = panel.latest_frame().unwrap();
        assert_eq!(frame.origin.x, display.mid_x() - 200.0 / 2.0);
        assert_eq!(frame.size.width, 200.0);
    }

    #[test]
    fn it_expands_to_the_full_display_and_collapses_back() {
        let (mut panel, system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();
        system.take_calls();

        panel.update_panel_size(true, false).unwrap();
        assert_eq!(panel.latest_frame(), Some(DISPLAY));
        assert_eq!(panel.phase(), PanelPhase::Expanded);
        assert_eq!(
            system.take_calls(),
            vec![
                Call::SetFrame(1, DISPLAY, Transition::Instant),
                Call::SetCornerRadius(1, 52.0, Transition::Instant),
            ]
        );

        panel.update_panel_size(false, false).unwrap();
        assert_eq!(panel.latest_frame(), Some(COLLAPSED));
        assert_eq!(panel.phase(), PanelPhase::Collapsed);
        assert_eq!(
            system.take_calls(),
            vec![
                Call::SetFrame(1, COLLAPSED, Transition::Instant),
                Call::SetCornerRadius(1, 28.0, Transition::Instant),
            ]
        );
    }

    #[test]
    fn animated_resizes_use_the_configured_duration() {
        let (mut panel, system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();
        system.take_calls();

        panel.update_panel_size(true, true).unwrap();
        let animated = Transition::Animated { duration: 0.28 };
        assert_eq!(
            system.take_calls(),
            vec![
                Call::SetFrame(1, DISPLAY, animated),
                Call::SetCornerRadius(1, 52.0, animated),
            ]
        );
    }

    #[test]
    fn expanding_always_hides_the_companion() {
        let (mut panel, _system) = panel(Some(DISPLAY));
        panel.companion_mut().snapshot = Some(7);
        panel.companion_mut().visible = true;
        panel.show_panel().unwrap();

        panel.update_panel_size(true, true).unwrap();
        assert!(!panel.companion().visible);
        assert_eq!(panel.companion().calls, vec![CompanionCall::Hide]);
    }

    #[test]
    fn collapsing_shows_the_companion_only_with_data() {
        let (mut panel, _system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();

        panel.update_panel_size(true, false).unwrap();
        panel.update_panel_size(false, false).unwrap();
        assert!(!panel.companion().visible);
        assert_eq!(panel.companion().calls, vec![CompanionCall::Hide]);

        panel.companion_mut().snapshot = Some(21);
        panel.update_panel_size(true, false).unwrap();
        panel.update_panel_size(false, false).unwrap();
        assert!(panel.companion().visible);
        assert_eq!(
            panel.companion().calls,
            vec![CompanionCall::Hide, CompanionCall::Hide, CompanionCall::Show(21)]
        );
    }

    #[test]
    fn resizing_before_show_does_nothing() {
        let (mut panel, system) = panel(Some(DISPLAY));
        assert_eq!(panel.update_panel_size(true, true), Err(PanelError::NoWindow));
        assert_eq!(panel.update_panel_size(false, false), Err(PanelError::NoWindow));
        assert_eq!(panel.toggle_expanded(false), Err(PanelError::NoWindow));

        assert_eq!(system.created(), 0);
        assert!(system.calls().is_empty());
        assert!(panel.companion().calls.is_empty());
        assert_eq!(panel.phase(), PanelPhase::Unshown);
    }

    #[test]
    fn hiding_without_a_window_is_reported() {
        let (mut panel, system) = panel(Some(DISPLAY));
        assert_eq!(panel.hide_panel(), Err(PanelError::NoWindow));
        assert!(system.calls().is_empty());
    }

    #[test]
    fn hide_orders_out_and_detaches_content() {
        let (mut panel, system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();
        system.take_calls();

        panel.hide_panel().unwrap();
        assert_eq!(system.take_calls(), vec![Call::OrderOut(1), Call::ClearContent(1)]);
        assert_eq!(panel.latest_frame(), None);
        assert_eq!(panel.phase(), PanelPhase::Hidden);
        assert!(panel.state().exists);
    }

    #[test]
    fn show_after_hide_lands_on_the_same_spot() {
        let (mut panel, _system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();
        let first = panel.latest_frame();

        panel.update_panel_size(true, false).unwrap();
        panel.hide_panel().unwrap();
        assert!(!panel.state().expanded);
        assert_eq!(panel.phase(), PanelPhase::Hidden);
        panel.show_panel().unwrap();

        assert_eq!(panel.latest_frame(), first);
        assert_eq!(panel.phase(), PanelPhase::Collapsed);
    }

    #[test]
    fn collapse_reuses_the_stored_anchor() {
        let (mut panel, system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();
        panel.update_panel_size(true, false).unwrap();

        // The display changes while expanded; collapse still returns to the
        // anchor computed by the last show.
        *system.display.borrow_mut() = Some(Rect::from_xywh(0.0, 0.0, 2560.0, 1440.0));
        panel.update_panel_size(false, false).unwrap();
        assert_eq!(panel.latest_frame(), Some(COLLAPSED));
    }

    #[test]
    fn missing_display_is_a_no_op() {
        let (mut panel, system) = panel(None);
        assert_eq!(panel.show_panel(), Err(PanelError::NoDisplay));
        assert_eq!(system.created(), 0);
        assert_eq!(panel.phase(), PanelPhase::Unshown);

        *system.display.borrow_mut() = Some(DISPLAY);
        panel.show_panel().unwrap();
        assert_eq!(panel.latest_frame(), Some(COLLAPSED));

        *system.display.borrow_mut() = None;
        system.take_calls();
        assert_eq!(panel.update_panel_size(true, false), Err(PanelError::NoDisplay));
        assert!(system.calls().is_empty());
        assert!(panel.companion().calls.is_empty());
        assert_eq!(panel.phase(), PanelPhase::Collapsed);
    }

    #[test]
    fn disabled_widget_hides_instead_of_showing() {
        let (mut panel, system) = panel(Some(DISPLAY));
        panel.set_settings(LockScreenSettings { enabled: false, ..Default::default() });
        assert_eq!(panel.show_panel(), Ok(()));
        assert_eq!(system.created(), 0);

        panel.set_settings(LockScreenSettings::default());
        panel.show_panel().unwrap();
        system.take_calls();

        panel.set_settings(LockScreenSettings { enabled: false, ..Default::default() });
        panel.show_panel().unwrap();
        assert_eq!(system.take_calls(), vec![Call::OrderOut(1), Call::ClearContent(1)]);
        assert_eq!(panel.phase(), PanelPhase::Hidden);
    }

    #[test]
    fn showing_while_expanded_returns_to_the_pill() {
        let (mut panel, _system) = panel(Some(DISPLAY));
        panel.show_panel().unwrap();
        panel.update_panel_size(true, true).unwrap();

        panel.show_panel().unwrap();
        assert_eq!(panel.latest_frame(), Some(COLLAPSED));
        assert_eq!(panel.phase(), PanelPhase::Collapsed);

        panel.toggle_expanded(false).unwrap();
        assert_eq!(panel.phase(), PanelPhase::Expanded);
    }
}
