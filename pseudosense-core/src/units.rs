//! Temperature unit conversion
//!
//! Stateless Celsius↔Fahrenheit transforms. The store applies them in bulk
//! when the display unit is toggled; they carry no memory of which unit a
//! value is in, so applying the same conversion twice converts twice.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Celsius to Fahrenheit
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Fahrenheit to Celsius
pub fn to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Temperature unit used for display and storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[default]
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

impl TemperatureUnit {
    /// Single-letter symbol shown after the degree sign
    pub fn symbol(self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }

    /// Lowercase name, as used in configuration and store files
    pub fn name(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// The other unit
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Convert `value` expressed in `self` into `target`
    pub fn convert_to(self, target: Self, value: f64) -> f64 {
        match (self, target) {
            (Self::Celsius, Self::Fahrenheit) => to_fahrenheit(value),
            (Self::Fahrenheit, Self::Celsius) => to_celsius(value),
            _ => value,
        }
    }

    /// Converter from `self` into `target`, for bulk application
    pub fn converter(self, target: Self) -> fn(f64) -> f64 {
        match (self, target) {
            (Self::Celsius, Self::Fahrenheit) => to_fahrenheit,
            (Self::Fahrenheit, Self::Celsius) => to_celsius,
            _ => identity,
        }
    }
}

fn identity(value: f64) -> f64 {
    value
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "°{}", self.symbol())
    }
}

/// Error for unrecognised unit names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown temperature unit {:?} (expected c or f)", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

impl FromStr for TemperatureUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" | "°c" => Ok(Self::Celsius),
            "f" | "fahrenheit" | "°f" => Ok(Self::Fahrenheit),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_points() {
        assert_eq!(to_fahrenheit(0.0), 32.0);
        assert_eq!(to_fahrenheit(100.0), 212.0);
        assert_eq!(to_celsius(-40.0), -40.0);
        assert_eq!(to_celsius(212.0), 100.0);
    }

    #[test]
    fn round_trip_within_tolerance() {
        for t in [-459.67, -20.0, -0.01, 0.0, 23.45, 99.99, 1000.0] {
            assert!((to_celsius(to_fahrenheit(t)) - t).abs() < 1e-9, "{t}");
        }
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(TemperatureUnit::Celsius.toggled().toggled(), TemperatureUnit::Celsius);
    }

    #[test]
    fn convert_between_same_unit_is_noop() {
        let c = TemperatureUnit::Celsius;
        assert_eq!(c.convert_to(c, 12.5), 12.5);
        assert_eq!(c.converter(c)(12.5), 12.5);
        assert_eq!(c.convert_to(TemperatureUnit::Fahrenheit, 10.0), 50.0);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("F".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(" celsius ".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
        assert_eq!(TemperatureUnit::Fahrenheit.to_string(), "°F");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap();
        assert_eq!(json, "\"fahrenheit\"");
    }
}
