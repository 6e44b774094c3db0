use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use island::common::config::{Config, config_file};
use island::common::log;
use island::model::weather::WeatherSnapshot;
use tracing::{info, warn};

#[derive(Parser)]
struct Cli {
    /// Read settings from this file instead of ~/.island.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check the configuration file and exit.
    #[arg(long)]
    validate: bool,

    /// Disable animations.
    #[arg(long)]
    no_animate: bool,

    /// Show the panel immediately instead of waiting for the screen to lock.
    #[arg(long)]
    show: bool,

    /// Seed the weather widget, formatted as TEMP:CONDITION[:LOCATION].
    #[arg(long)]
    weather: Option<WeatherSnapshot>,
}

impl Cli {
    fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(config_file) }

    fn load_config(&self) -> anyhow::Result<Config> {
        let path = self.config_path();
        let mut config = Config::read_or_default(&path)
            .with_context(|| format!("could not load {}", path.display()))?;
        let fixed = config.auto_fix_values();
        if fixed > 0 {
            warn!(fixed, "replaced invalid config values with defaults");
        }
        config.settings.animate &= !self.no_animate;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let opt: Cli = Parser::parse();

    log::init_logging();
    log::install_panic_hook();

    if opt.validate {
        return validate(&opt.config_path());
    }

    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("island: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &std::path::Path) -> ExitCode {
    let config = match Config::read_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e:#}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let issues = config.validate();
    if issues.is_empty() {
        println!("{}: ok", path.display());
        return ExitCode::SUCCESS;
    }
    for issue in &issues {
        eprintln!("{}: {issue}", path.display());
    }
    ExitCode::FAILURE
}

#[cfg(target_os = "macos")]
fn run(opt: Cli) -> anyhow::Result<()> {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use island::actor::lock_screen::{Event, LockScreen};
    use island::sys::session::SessionObserver;
    use island::ui::panel_window::Actual;
    use objc2::MainThreadMarker;
    use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy};

    type Coordinator = LockScreen<Actual>;

    fn dispatch(coordinator: &RefCell<Coordinator>, event: Event) {
        match coordinator.try_borrow_mut() {
            Ok(mut coordinator) => coordinator.handle_event(event),
            Err(_) => warn!(?event, "dropping re-entrant event"),
        }
    }

    let mtm = MainThreadMarker::new().context("island must start on the main thread")?;
    let config = opt.load_config()?;

    let app = NSApplication::sharedApplication(mtm);
    let _ = app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);

    let system = Actual::new(mtm);
    let coordinator = Rc::new(RefCell::new(LockScreen::new(system.clone(), &config)));

    let weak: Weak<RefCell<Coordinator>> = Rc::downgrade(&coordinator);
    system.set_click_handler(Rc::new(move || {
        if let Some(coordinator) = weak.upgrade() {
            dispatch(&coordinator, Event::PanelClicked);
        }
    }));

    if let Some(snapshot) = opt.weather.clone() {
        info!(%snapshot, "seeding weather");
        dispatch(&coordinator, Event::WeatherUpdated(Some(snapshot)));
    }

    let weak = Rc::downgrade(&coordinator);
    let config_path = opt.config_path();
    let no_animate = opt.no_animate;
    let _observer = SessionObserver::install(move |locked| {
        let Some(coordinator) = weak.upgrade() else { return };
        if locked {
            match Config::read_or_default(&config_path) {
                Ok(mut config) => {
                    config.auto_fix_values();
                    config.settings.animate &= !no_animate;
                    dispatch(&coordinator, Event::ConfigUpdated(config));
                }
                Err(e) => warn!("keeping previous settings: {e:#}"),
            }
            dispatch(&coordinator, Event::ScreenLocked);
        } else {
            dispatch(&coordinator, Event::ScreenUnlocked);
        }
    });

    if opt.show {
        dispatch(&coordinator, Event::ScreenLocked);
    }

    info!("waiting for the screen to lock");
    app.run();
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn run(_opt: Cli) -> anyhow::Result<()> {
    anyhow::bail!("island only runs on macOS")
}
