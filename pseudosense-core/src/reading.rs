//! Reading and sample records
//!
//! A [`Sample`] is what the generator emits. A [`Reading`] is a sample that
//! has been timestamped and stored; the store assigns its `id`.

use serde::{Deserialize, Serialize};

/// One generator output before it is timestamped and stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Relative humidity in percent
    pub humidity: f64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
}

/// One stored (timestamp, temperature, humidity) row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Surrogate row identity, assigned on append. Zero until stored.
    #[serde(default)]
    pub id: u64,
    /// Wall-clock time of the reading, supplied by the caller
    pub timestamp: String,
    /// Temperature in the store's current unit
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

impl Reading {
    /// Unstored reading; `id` is filled in by `ReadingStore::append`
    pub fn new(timestamp: impl Into<String>, temperature: f64, humidity: f64) -> Self {
        Self {
            id: 0,
            timestamp: timestamp.into(),
            temperature,
            humidity,
        }
    }

    /// Attach a timestamp to a generator sample
    pub fn from_sample(timestamp: impl Into<String>, sample: Sample) -> Self {
        Self::new(timestamp, sample.temperature, sample.humidity)
    }

    /// Whether the store has assigned an id yet
    pub fn is_stored(&self) -> bool {
        self.id != 0
    }
}
