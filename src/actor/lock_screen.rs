//! Drives the lock screen overlays from session and settings events.

use tracing::{debug, instrument, warn};

use crate::actor::lock_screen_panel::{Companion, LockScreenPanel, PanelError, PanelSystem};
use crate::actor::weather::WeatherPanel;
use crate::common::config::{Config, Settings};
use crate::model::panel::PanelPhase;
use crate::model::weather::WeatherSnapshot;

#[derive(Debug)]
pub enum Event {
    ScreenLocked,
    ScreenUnlocked,
    /// The user clicked the panel.
    PanelClicked,
    SetExpanded(bool),
    ConfigUpdated(Config),
    WeatherUpdated(Option<WeatherSnapshot>),
}

pub struct LockScreen<S: PanelSystem> {
    panel: LockScreenPanel<S, WeatherPanel<S>>,
    settings: Settings,
    locked: bool,
}

impl<S: PanelSystem + Clone> LockScreen<S> {
    pub fn new(system: S, config: &Config) -> Self {
        let settings = config.settings.clone();
        let weather = WeatherPanel::new(system.clone(), settings.weather.clone());
        let panel = LockScreenPanel::new(system, weather, settings.lock_screen.clone());
        Self { panel, settings, locked: false }
    }
}

impl<S: PanelSystem> LockScreen<S> {
    pub fn panel(&self) -> &LockScreenPanel<S, WeatherPanel<S>> { &self.panel }

    pub fn is_locked(&self) -> bool { self.locked }

    #[instrument(name = "lock_screen::handle_event", skip(self))]
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ScreenLocked => self.handle_locked(),
            Event::ScreenUnlocked => self.handle_unlocked(),
            Event::PanelClicked => self.handle_clicked(),
            Event::SetExpanded(expanded) => self.handle_set_expanded(expanded),
            Event::ConfigUpdated(config) => self.handle_config_updated(config),
            Event::WeatherUpdated(snapshot) => self.handle_weather_updated(snapshot),
        }
    }

    fn handle_locked(&mut self) {
        self.locked = true;
        report(self.panel.show_panel());
        if self.panel.phase() == PanelPhase::Collapsed {
            self.show_weather();
        }
    }

    fn handle_unlocked(&mut self) {
        self.locked = false;
        self.panel.companion_mut().hide();
        if self.panel.state().exists {
            report(self.panel.hide_panel());
        }
    }

    fn handle_set_expanded(&mut self, expanded: bool) {
        if !self.panel_on_screen() {
            debug!(expanded, "ignoring resize while the panel is off screen");
            return;
        }
        let animate = self.settings.animate;
        report(self.panel.update_panel_size(expanded, animate));
    }

    fn handle_clicked(&mut self) {
        if !self.panel_on_screen() {
            debug!("ignoring click while the panel is off screen");
            return;
        }
        let animate = self.settings.animate;
        report(self.panel.toggle_expanded(animate));
    }

    fn handle_config_updated(&mut self, config: Config) {
        self.settings = config.settings;
        self.panel.set_settings(self.settings.lock_screen.clone());
        self.panel.companion_mut().set_settings(self.settings.weather.clone());
        if self.locked && !self.settings.lock_screen.enabled {
            self.panel.companion_mut().hide();
            report(self.panel.show_panel());
        }
    }

    fn handle_weather_updated(&mut self, snapshot: Option<WeatherSnapshot>) {
        self.panel.companion_mut().set_snapshot(snapshot);
        if self.locked && self.panel.phase() == PanelPhase::Collapsed {
            self.show_weather();
        }
    }

    fn panel_on_screen(&self) -> bool {
        self.locked && matches!(self.panel.phase(), PanelPhase::Collapsed | PanelPhase::Expanded)
    }

    fn show_weather(&mut self) {
        let weather = self.panel.companion_mut();
        if let Some(snapshot) = weather.snapshot() {
            weather.show(&snapshot);
        }
    }
}

fn report(result: Result<(), PanelError>) {
    if let Err(error) = result {
        warn!(%error, "lock screen panel operation skipped");
    }
}
