//! Summary statistics over stored readings

use core::fmt;

use serde::Serialize;

use crate::errors::{SimError, SimResult};
use crate::reading::Reading;

/// Min/max/mean of temperature and humidity over a set of readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadingStats {
    /// Readings summarised
    pub count: usize,
    /// Lowest temperature
    pub min_temp: f64,
    /// Highest temperature
    pub max_temp: f64,
    /// Mean temperature
    pub avg_temp: f64,
    /// Lowest humidity (%)
    pub min_hum: f64,
    /// Highest humidity (%)
    pub max_hum: f64,
    /// Mean humidity (%)
    pub avg_hum: f64,
}

impl ReadingStats {
    /// Compute statistics in a single pass
    ///
    /// Fails with [`SimError::EmptyInput`] when `readings` is empty.
    pub fn from_readings(readings: &[Reading]) -> SimResult<Self> {
        let first = readings.first().ok_or(SimError::EmptyInput)?;

        let mut acc = Self {
            count: 0,
            min_temp: first.temperature,
            max_temp: first.temperature,
            avg_temp: 0.0,
            min_hum: first.humidity,
            max_hum: first.humidity,
            avg_hum: 0.0,
        };
        let (mut temp_sum, mut hum_sum) = (0.0, 0.0);

        for reading in readings {
            acc.min_temp = acc.min_temp.min(reading.temperature);
            acc.max_temp = acc.max_temp.max(reading.temperature);
            acc.min_hum = acc.min_hum.min(reading.humidity);
            acc.max_hum = acc.max_hum.max(reading.humidity);
            temp_sum += reading.temperature;
            hum_sum += reading.humidity;
            acc.count += 1;
        }

        acc.avg_temp = temp_sum / acc.count as f64;
        acc.avg_hum = hum_sum / acc.count as f64;
        Ok(acc)
    }
}

/// Free-function form of [`ReadingStats::from_readings`]
pub fn stats(readings: &[Reading]) -> SimResult<ReadingStats> {
    ReadingStats::from_readings(readings)
}

impl fmt::Display for ReadingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Temperature - Min: {:.2}, Max: {:.2}, Avg: {:.2}",
            self.min_temp, self.max_temp, self.avg_temp
        )?;
        write!(
            f,
            "Humidity - Min: {:.2}, Max: {:.2}, Avg: {:.2}",
            self.min_hum, self.max_hum, self.avg_hum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, humidity: f64) -> Reading {
        Reading::new("t", temperature, humidity)
    }

    #[test]
    fn two_reading_summary() {
        let s = stats(&[reading(10.0, 20.0), reading(30.0, 40.0)]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!((s.min_temp, s.max_temp, s.avg_temp), (10.0, 30.0, 20.0));
        assert_eq!((s.min_hum, s.max_hum, s.avg_hum), (20.0, 40.0, 30.0));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(stats(&[]), Err(SimError::EmptyInput)));
    }

    #[test]
    fn single_reading_is_its_own_summary() {
        let s = stats(&[reading(-5.5, 12.0)]).unwrap();
        assert_eq!((s.min_temp, s.max_temp, s.avg_temp), (-5.5, -5.5, -5.5));
        assert_eq!((s.min_hum, s.max_hum, s.avg_hum), (12.0, 12.0, 12.0));
    }

    #[test]
    fn order_does_not_matter() {
        let a = stats(&[reading(1.0, 9.0), reading(5.0, 3.0), reading(3.0, 6.0)]).unwrap();
        let b = stats(&[reading(3.0, 6.0), reading(1.0, 9.0), reading(5.0, 3.0)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn display_matches_report_layout() {
        let s = stats(&[reading(10.0, 20.0), reading(30.0, 40.0)]).unwrap();
        assert_eq!(
            s.to_string(),
            "Temperature - Min: 10.00, Max: 30.00, Avg: 20.00\n\
             Humidity - Min: 20.00, Max: 40.00, Avg: 30.00"
        );
    }
}
