//! Threshold alarm evaluation
//!
//! An alarm is raised when either value of the newest reading is strictly
//! above its threshold. Thresholds are compared in whatever unit the store is
//! currently in; nothing here converts.

use serde::{Deserialize, Serialize};

use crate::constants::store::{DEFAULT_HUMIDITY_THRESHOLD, DEFAULT_TEMP_THRESHOLD};
use crate::errors::{SimError, SimResult};
use crate::reading::Reading;

/// True when `reading` exceeds either threshold
pub fn check(reading: &Reading, temp_threshold: f64, hum_threshold: f64) -> bool {
    reading.temperature > temp_threshold || reading.humidity > hum_threshold
}

/// Pair of alarm boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlarmThresholds {
    /// Temperature limit, in the store's current unit
    pub temperature: f64,
    /// Humidity limit (%)
    pub humidity: f64,
}

impl Default for AlarmThresholds {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMP_THRESHOLD,
            humidity: DEFAULT_HUMIDITY_THRESHOLD,
        }
    }
}

impl AlarmThresholds {
    /// Thresholds from already-parsed values
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self { temperature, humidity }
    }

    /// Parse user-entered threshold text
    ///
    /// Surrounding whitespace is ignored. Anything that is not a finite
    /// number yields [`SimError::InvalidThreshold`] naming the field.
    pub fn parse(temperature: &str, humidity: &str) -> SimResult<Self> {
        Ok(Self {
            temperature: parse_field("temperature", temperature)?,
            humidity: parse_field("humidity", humidity)?,
        })
    }

    /// Evaluate `reading` against these thresholds
    pub fn check(&self, reading: &Reading) -> bool {
        check(reading, self.temperature, self.humidity)
    }

    /// Which of the two values is over its threshold
    pub fn exceeded(&self, reading: &Reading) -> Exceeded {
        Exceeded {
            temperature: reading.temperature > self.temperature,
            humidity: reading.humidity > self.humidity,
        }
    }
}

/// Per-field alarm breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Exceeded {
    /// Temperature is above its threshold
    pub temperature: bool,
    /// Humidity is above its threshold
    pub humidity: bool,
}

impl Exceeded {
    /// Either value is above its threshold
    pub fn any(&self) -> bool {
        self.temperature || self.humidity
    }
}

fn parse_field(field: &'static str, input: &str) -> SimResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SimError::InvalidThreshold {
            field,
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, humidity: f64) -> Reading {
        Reading::new("t", temperature, humidity)
    }

    #[test]
    fn temperature_over_threshold_alarms() {
        assert!(check(&reading(101.0, 5.0), 100.0, 100.0));
    }

    #[test]
    fn values_under_thresholds_do_not_alarm() {
        assert!(!check(&reading(50.0, 50.0), 100.0, 100.0));
    }

    #[test]
    fn equal_to_threshold_does_not_alarm() {
        assert!(!check(&reading(100.0, 100.0), 100.0, 100.0));
    }

    #[test]
    fn humidity_alone_alarms() {
        let thresholds = AlarmThresholds::new(100.0, 60.0);
        let r = reading(20.0, 60.5);
        assert!(thresholds.check(&r));
        assert_eq!(thresholds.exceeded(&r), Exceeded { temperature: false, humidity: true });
    }

    #[test]
    fn parse_accepts_padded_numbers() {
        let t = AlarmThresholds::parse(" 30.5 ", "80").unwrap();
        assert_eq!(t, AlarmThresholds::new(30.5, 80.0));
    }

    #[test]
    fn parse_rejects_text_and_non_finite() {
        assert!(matches!(
            AlarmThresholds::parse("30", "lots"),
            Err(SimError::InvalidThreshold { field: "humidity", .. })
        ));
        assert!(matches!(
            AlarmThresholds::parse("inf", "80"),
            Err(SimError::InvalidThreshold { field: "temperature", .. })
        ));
        assert!(AlarmThresholds::parse("", "80").is_err());
    }

    #[test]
    fn defaults_match_constants() {
        assert_eq!(AlarmThresholds::default(), AlarmThresholds::new(100.0, 100.0));
    }
}
