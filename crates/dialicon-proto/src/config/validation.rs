use super::ClockIconConfig;

/// Errors returned when validating a [`ClockIconConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The default hour position is outside the `0..=11` dial range.
    HourOutOfRange { value: u32 },

    /// The default minute position is outside the `0..=59` dial range.
    MinuteOutOfRange { value: u32 },

    /// The default second position is outside the `0..=59` dial range.
    SecondOutOfRange { value: u32 },

    /// The tick interval is zero.
    ZeroTickInterval,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange { value } => {
                write!(f, "default_hour {} is outside the 0..=11 dial range", value)
            }
            Self::MinuteOutOfRange { value } => {
                write!(
                    f,
                    "default_minute {} is outside the 0..=59 dial range",
                    value
                )
            }
            Self::SecondOutOfRange { value } => {
                write!(
                    f,
                    "default_second {} is outside the 0..=59 dial range",
                    value
                )
            }
            Self::ZeroTickInterval => {
                write!(f, "tick_interval must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl ClockIconConfig {
    /// Validates the configuration, ensuring hand positions stay on the dial.
    ///
    /// A 12-hour dial has no distinct 12 o'clock position, so `default_hour`
    /// must already be expressed as `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if a default hand position is outside
    /// its natural range or the tick interval is zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.default_hour > 11 {
            return Err(ConfigValidationError::HourOutOfRange {
                value: self.default_hour,
            });
        }

        if self.default_minute > 59 {
            return Err(ConfigValidationError::MinuteOutOfRange {
                value: self.default_minute,
            });
        }

        if self.default_second > 59 {
            return Err(ConfigValidationError::SecondOutOfRange {
                value: self.default_second,
            });
        }

        if self.tick_interval.is_zero() {
            return Err(ConfigValidationError::ZeroTickInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ClockIconConfig, ConfigValidationError};

    #[test]
    fn default_config_is_valid() {
        assert!(ClockIconConfig::default().validate().is_ok());
    }

    #[test]
    fn twelve_oclock_reference_is_rejected() {
        let config = ClockIconConfig {
            default_hour: 12,
            ..ClockIconConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::HourOutOfRange { value: 12 })
        );
    }

    #[test]
    fn out_of_range_minute_is_rejected() {
        let config = ClockIconConfig {
            default_minute: 60,
            ..ClockIconConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MinuteOutOfRange { value: 60 })
        );
    }

    #[test]
    fn out_of_range_second_is_rejected() {
        let config = ClockIconConfig {
            default_second: 61,
            ..ClockIconConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::SecondOutOfRange { value: 61 })
        );
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = ClockIconConfig {
            tick_interval: Duration::ZERO,
            ..ClockIconConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroTickInterval)
        );
    }
}
