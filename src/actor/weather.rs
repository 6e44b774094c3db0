//! Weather widget for the lock screen. It sits centered near the top of the
//! display, `top_margin` below the edge, which puts it under the collapsed
//! panel with the default settings. Only shown while the panel is collapsed.

use tracing::{debug, warn};

use crate::actor::lock_screen_panel::{Companion, PanelError, PanelSurface, PanelSystem};
use crate::common::config::WeatherSettings;
use crate::model::geometry::{Rect, Size};
use crate::model::panel::{SurfaceContent, SurfaceStyle, Transition};
use crate::model::weather::WeatherSnapshot;

const CORNER_RADIUS: f64 = 16.0;

pub struct WeatherPanel<S: PanelSystem> {
    system: S,
    settings: WeatherSettings,
    snapshot: Option<WeatherSnapshot>,
    surface: Option<S::Surface>,
    visible: bool,
}

impl<S: PanelSystem> WeatherPanel<S> {
    pub fn new(system: S, settings: WeatherSettings) -> Self {
        Self {
            system,
            settings,
            snapshot: None,
            surface: None,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool { self.visible }

    /// Replaces the data behind the widget. Clearing it hides the widget.
    pub fn set_snapshot(&mut self, snapshot: Option<WeatherSnapshot>) {
        self.snapshot = snapshot;
        if self.snapshot.is_none() && self.visible {
            self.hide();
        }
    }

    pub fn set_settings(&mut self, settings: WeatherSettings) {
        self.settings = settings;
        if !self.settings.enabled && self.visible {
            self.hide();
        }
    }

    /// Top-center placement on `display`.
    pub fn frame_for(&self, display: Rect) -> Rect {
        let size = Size::new(self.settings.width, self.settings.height);
        let min_y = display.max_y() - size.height - self.settings.top_margin;
        Rect::centered_at(display.mid_x(), min_y, size)
    }

    fn present(&mut self, snapshot: &WeatherSnapshot) -> Result<(), PanelError> {
        let Some(display) = self.system.main_display() else {
            return Err(PanelError::NoDisplay);
        };
        let frame = self.frame_for(display);

        if self.surface.is_none() {
            let mut surface = self.system.create_surface(frame, SurfaceStyle::LOCK_SCREEN);
            self.system.delegate_to_lock_screen(&mut surface);
            self.surface = Some(surface);
        }
        let Some(surface) = &mut self.surface else {
            return Err(PanelError::NoWindow);
        };

        surface.set_frame(frame, Transition::Instant);
        surface.set_content(SurfaceContent::Text(snapshot.summary()));
        surface.set_corner_radius(CORNER_RADIUS, Transition::Instant);
        surface.order_front();
        Ok(())
    }
}

impl<S: PanelSystem> Companion for WeatherPanel<S> {
    type Snapshot = WeatherSnapshot;

    fn snapshot(&self) -> Option<WeatherSnapshot> { self.snapshot.clone() }

    fn show(&mut self, snapshot: &WeatherSnapshot) {
        if !self.settings.enabled {
            self.hide();
            return;
        }
        match self.present(snapshot) {
            Ok(()) => {
                self.visible = true;
                debug!(%snapshot, "weather widget visible");
            }
            Err(error) => warn!(%error, "cannot show weather widget"),
        }
    }

    fn hide(&mut self) {
        if let Some(surface) = &mut self.surface {
            surface.order_out();
            surface.clear_content();
        }
        self.visible = false;
    }
}
