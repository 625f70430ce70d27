use std::time::Duration;

use chrono::FixedOffset;
use serde::Deserialize;
use serde_with::{DisplayFromStr, DurationMilliSeconds, serde_as};

mod validation;

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/dialicon/config.toml";

/// Clock icon configuration.
///
/// Layer indices point into the icon's layered foreground; a missing index
/// means the corresponding hand is not animated. The `default_*` fields are
/// the hand positions baked into the artwork and act as the zero angle.
#[serde_as]
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ClockIconConfig {
    #[serde(default)]
    pub hour_layer: Option<usize>,
    #[serde(default)]
    pub minute_layer: Option<usize>,
    #[serde(default)]
    pub second_layer: Option<usize>,
    #[serde(default)]
    pub default_hour: u32,
    #[serde(default)]
    pub default_minute: u32,
    #[serde(default)]
    pub default_second: u32,
    /// Fixed UTC offset the clock is rendered in, e.g. `"+05:30"`.
    /// Falls back to the local offset when absent.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub timezone: Option<FixedOffset>,
    /// Tick interval in milliseconds.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_tick_interval")]
    pub tick_interval: Duration,
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}

impl Default for ClockIconConfig {
    fn default() -> Self {
        Self {
            hour_layer: None,
            minute_layer: None,
            second_layer: None,
            default_hour: 0,
            default_minute: 0,
            default_second: 0,
            timezone: None,
            tick_interval: default_tick_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::FixedOffset;

    use super::ClockIconConfig;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ClockIconConfig = toml::from_str("").expect("empty config should parse");

        assert_eq!(config, ClockIconConfig::default());
        assert_eq!(config.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn full_config_parses() {
        let config: ClockIconConfig = toml::from_str(
            r#"
            hour_layer = 0
            minute_layer = 1
            second_layer = 2
            default_hour = 10
            default_minute = 10
            default_second = 30
            timezone = "+05:30"
            tick_interval = 100
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.hour_layer, Some(0));
        assert_eq!(config.minute_layer, Some(1));
        assert_eq!(config.second_layer, Some(2));
        assert_eq!(config.default_hour, 10);
        assert_eq!(
            config.timezone,
            Some(FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset"))
        );
        assert_eq!(config.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let result = toml::from_str::<ClockIconConfig>(r#"timezone = "mars""#);

        assert!(result.is_err());
    }
}
