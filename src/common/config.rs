use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub fn config_file() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".island.toml")
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LockScreenSettings {
    /// Show the media panel on the lock screen at all.
    #[serde(default = "yes")]
    pub enabled: bool,
    #[serde(default = "default_collapsed_width")]
    pub collapsed_width: f64,
    #[serde(default = "default_collapsed_height")]
    pub collapsed_height: f64,
    /// Gap between the collapsed pill and the top edge of the display.
    #[serde(default = "default_edge_margin")]
    pub edge_margin: f64,
    #[serde(default = "default_collapsed_corner_radius")]
    pub collapsed_corner_radius: f64,
    #[serde(default = "default_expanded_corner_radius")]
    pub expanded_corner_radius: f64,
    /// Seconds.
    #[serde(default = "default_animation_duration")]
    pub animation_duration: f64,
}

impl Default for LockScreenSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            collapsed_width: default_collapsed_width(),
            collapsed_height: default_collapsed_height(),
            edge_margin: default_edge_margin(),
            collapsed_corner_radius: default_collapsed_corner_radius(),
            expanded_corner_radius: default_expanded_corner_radius(),
            animation_duration: default_animation_duration(),
        }
    }
}

impl LockScreenSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(self.collapsed_width > 0.0) {
            issues.push("lock_screen.collapsed_width must be positive".to_string());
        }
        if !(self.collapsed_height > 0.0) {
            issues.push("lock_screen.collapsed_height must be positive".to_string());
        }
        if !(self.edge_margin >= 0.0) {
            issues.push("lock_screen.edge_margin must be non-negative".to_string());
        }
        if !(self.collapsed_corner_radius >= 0.0) {
            issues.push("lock_screen.collapsed_corner_radius must be non-negative".to_string());
        }
        if !(self.expanded_corner_radius >= 0.0) {
            issues.push("lock_screen.expanded_corner_radius must be non-negative".to_string());
        }
        if !(self.animation_duration >= 0.0) {
            issues.push("lock_screen.animation_duration must be non-negative".to_string());
        }
        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;
        fixes += fix(&mut self.collapsed_width, |v| v > 0.0, default_collapsed_width());
        fixes += fix(&mut self.collapsed_height, |v| v > 0.0, default_collapsed_height());
        fixes += fix(&mut self.edge_margin, |v| v >= 0.0, default_edge_margin());
        fixes += fix(
            &mut self.collapsed_corner_radius,
            |v| v >= 0.0,
            default_collapsed_corner_radius(),
        );
        fixes += fix(
            &mut self.expanded_corner_radius,
            |v| v >= 0.0,
            default_expanded_corner_radius(),
        );
        fixes += fix(&mut self.animation_duration, |v| v >= 0.0, default_animation_duration());
        fixes
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeatherSettings {
    #[serde(default = "yes")]
    pub enabled: bool,
    #[serde(default = "default_weather_width")]
    pub width: f64,
    #[serde(default = "default_weather_height")]
    pub height: f64,
    /// Gap between the widget and the top edge of the display.
    #[serde(default = "default_weather_top_margin")]
    pub top_margin: f64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: default_weather_width(),
            height: default_weather_height(),
            top_margin: default_weather_top_margin(),
        }
    }
}

impl WeatherSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(self.width > 0.0) {
            issues.push("weather.width must be positive".to_string());
        }
        if !(self.height > 0.0) {
            issues.push("weather.height must be positive".to_string());
        }
        if !(self.top_margin >= 0.0) {
            issues.push("weather.top_margin must be non-negative".to_string());
        }
        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        fix(&mut self.width, |v| v > 0.0, default_weather_width())
            + fix(&mut self.height, |v| v > 0.0, default_weather_height())
            + fix(&mut self.top_margin, |v| v >= 0.0, default_weather_top_margin())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "yes")]
    pub animate: bool,
    #[serde(default)]
    pub lock_screen: LockScreenSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animate: true,
            lock_screen: LockScreenSettings::default(),
            weather: WeatherSettings::default(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
}

fn yes() -> bool { true }

fn default_collapsed_width() -> f64 { 200.0 }

fn default_collapsed_height() -> f64 { 40.0 }

fn default_edge_margin() -> f64 { 32.0 }

fn default_collapsed_corner_radius() -> f64 { 28.0 }

fn default_expanded_corner_radius() -> f64 { 52.0 }

fn default_animation_duration() -> f64 { 0.28 }

fn default_weather_width() -> f64 { 220.0 }

fn default_weather_height() -> f64 { 48.0 }

fn default_weather_top_margin() -> f64 { 120.0 }

/// Resets `value` to `default` unless `valid` holds. NaN never holds.
fn fix(value: &mut f64, valid: impl Fn(f64) -> bool, default: f64) -> usize {
    if valid(*value) {
        0
    } else {
        *value = default;
        1
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Reads `path` if it exists, the built-in defaults otherwise.
    pub fn read_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() { Self::read(path) } else { Ok(Self::default()) }
    }

    pub fn default() -> Config {
        Self::parse(include_str!("../../island.default.toml")).unwrap_or_else(|_| Config {
            settings: Settings::default(),
        })
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let config_file = ConfigFile { settings: self.settings.clone() };

        let toml_string = toml::to_string_pretty(&config_file)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        issues.extend(self.settings.lock_screen.validate());
        issues.extend(self.settings.weather.validate());
        issues
    }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize {
        self.settings.lock_screen.auto_fix_values() + self.settings.weather.auto_fix_values()
    }

    fn parse(buf: &str) -> anyhow::Result<Config> {
        let c: ConfigFile = toml::from_str(buf)?;
        Ok(Config { settings: c.settings })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_parses() {
        let parsed = Config::parse(include_str!("../../island.default.toml")).unwrap();
        assert_eq!(parsed.settings, Settings::default());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config = Config::parse(
            r#"
            [settings.lock_screen]
            enabled = false
            "#,
        )
        .unwrap();
        assert!(!config.settings.lock_screen.enabled);
        assert_eq!(config.settings.lock_screen.collapsed_width, 200.0);
        assert_eq!(config.settings.weather, WeatherSettings::default());
        assert!(config.settings.animate);

        let empty = Config::parse("").unwrap();
        assert_eq!(empty.settings, Settings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse(
            r#"
            [settings.lock_screen]
            enabeld = true
            "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_empty());

        config.settings.lock_screen.animation_duration = -1.0;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("animation_duration must be non-negative"));

        let fixes = config.auto_fix_values();
        assert_eq!(fixes, 1);
        assert_eq!(config.settings.lock_screen.animation_duration, 0.28);

        config.settings.lock_screen.collapsed_width = 0.0;
        config.settings.weather.height = f64::NAN;
        let issues = config.validate();
        assert_eq!(issues.len(), 2);

        assert_eq!(config.auto_fix_values(), 2);
        assert_eq!(config.settings.lock_screen.collapsed_width, 200.0);
        assert_eq!(config.settings.weather.height, 48.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn it_saves_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("island.toml");

        let mut config = Config::default();
        config.settings.animate = false;
        config.settings.weather.enabled = false;
        config.settings.lock_screen.collapsed_width = 260.0;
        config.save(&path).unwrap();

        assert_eq!(Config::read(&path).unwrap(), config);
    }

    #[test]
    fn read_or_default_tolerates_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::read_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
