use std::fmt;
use std::str::FromStr;

use strum::EnumString;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Wind,
}

impl WeatherCondition {
    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Fog => "🌫",
            WeatherCondition::Rain => "🌧",
            WeatherCondition::Snow => "❄",
            WeatherCondition::Thunderstorm => "⛈",
            WeatherCondition::Wind => "💨",
        }
    }
}

/// Latest weather reading shown by the lock screen companion widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: WeatherCondition,
    pub location: Option<String>,
}

impl WeatherSnapshot {
    pub fn summary(&self) -> String {
        let mut out = format!("{} {:.0}°", self.condition.symbol(), self.temperature);
        if let Some(location) = &self.location {
            out.push_str("  ");
            out.push_str(location);
        }
        out
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.summary()) }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseWeatherError {
    #[error("expected <temperature>:<condition>[:<location>], got {0:?}")]
    Format(String),
    #[error("invalid temperature {0:?}")]
    Temperature(String),
    #[error("unknown weather condition {0:?}")]
    Condition(String),
}

/// Parses `<temperature>:<condition>[:<location>]`, e.g. `21.5:clear:Lisbon`.
impl FromStr for WeatherSnapshot {
    type Err = ParseWeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(temp), Some(condition)) = (parts.next(), parts.next()) else {
            return Err(ParseWeatherError::Format(s.to_string()));
        };
        let temperature = temp
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| ParseWeatherError::Temperature(temp.to_string()))?;
        let condition = WeatherCondition::from_str(condition.trim())
            .map_err(|_| ParseWeatherError::Condition(condition.to_string()))?;
        let location = parts.next().map(str::trim).filter(|l| !l.is_empty()).map(String::from);
        Ok(WeatherSnapshot { temperature, condition, location })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn it_parses_the_cli_form() {
        assert_eq!(
            "21.5:partly_cloudy:Lisbon".parse::<WeatherSnapshot>(),
            Ok(WeatherSnapshot {
                temperature: 21.5,
                condition: WeatherCondition::PartlyCloudy,
                location: Some("Lisbon".to_string()),
            })
        );
        assert_eq!(
            "-3:Snow".parse::<WeatherSnapshot>(),
            Ok(WeatherSnapshot {
                temperature: -3.0,
                condition: WeatherCondition::Snow,
                location: None,
            })
        );
    }

    #[test]
    fn it_rejects_malformed_input() {
        assert_eq!(
            "21".parse::<WeatherSnapshot>(),
            Err(ParseWeatherError::Format("21".to_string()))
        );
        assert_eq!(
            "warm:clear".parse::<WeatherSnapshot>(),
            Err(ParseWeatherError::Temperature("warm".to_string()))
        );
        assert_eq!(
            "NaN:clear".parse::<WeatherSnapshot>(),
            Err(ParseWeatherError::Temperature("NaN".to_string()))
        );
        assert_eq!(
            "20:sunny".parse::<WeatherSnapshot>(),
            Err(ParseWeatherError::Condition("sunny".to_string()))
        );
    }

    #[test]
    fn summary_rounds_the_temperature() {
        let snapshot = WeatherSnapshot {
            temperature: 21.6,
            condition: WeatherCondition::Clear,
            location: Some("Lisbon".to_string()),
        };
        assert_eq!(snapshot.summary(), "☀ 22°  Lisbon");
    }
}
