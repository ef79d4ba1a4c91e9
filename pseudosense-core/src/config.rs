//! Monitor configuration
//!
//! Settings are read from an optional JSON file and then overridden field by
//! field by the front end. Every field has a default, so `{}` is a valid
//! configuration file.
//!
//! ```json
//! {
//!   "store_path": "sensor_data.csv",
//!   "unit": "fahrenheit",
//!   "temperature_threshold": "90",
//!   "humidity_threshold": "75",
//!   "batch_size": 10,
//!   "batch_interval_ms": 1000,
//!   "stats_window": 10,
//!   "jitter": 1.0,
//!   "seed": 42
//! }
//! ```
//!
//! Thresholds are kept as text: they are user input, parsed when an alarm is
//! evaluated, so a bad value is reported at that point instead of preventing
//! startup.

use std::fs;
use std::path::{Path, PathBuf};

use core::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::alarm::AlarmThresholds;
use crate::constants::sensors::{DEFAULT_JITTER, MAX_JITTER};
use crate::constants::store::{
    DEFAULT_BATCH_SIZE, DEFAULT_HUMIDITY_THRESHOLD, MAX_BATCH_SIZE, DEFAULT_STATS_WINDOW, DEFAULT_STORE_PATH,
    DEFAULT_TEMP_THRESHOLD,
};
use crate::constants::time::DEFAULT_BATCH_INTERVAL_MS;
use crate::errors::{SimError, SimResult};
use crate::store::StoreFormat;
use crate::units::TemperatureUnit;

/// Everything needed to build a monitor session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Store file location
    pub store_path: PathBuf,
    /// Store layout; inferred from the extension when absent
    pub store_format: Option<StoreFormat>,
    /// Unit for a store that records none (a recorded unit wins)
    pub unit: TemperatureUnit,
    /// Temperature alarm threshold as entered by the user
    pub temperature_threshold: String,
    /// Humidity alarm threshold as entered by the user
    pub humidity_threshold: String,
    /// Samples per batch read
    pub batch_size: usize,
    /// Pause between batch samples (milliseconds)
    pub batch_interval_ms: u64,
    /// Readings covered by the statistics report
    pub stats_window: usize,
    /// Half-width of generator noise
    pub jitter: f64,
    /// Fixed generator seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            store_format: None,
            unit: TemperatureUnit::Celsius,
            temperature_threshold: DEFAULT_TEMP_THRESHOLD.to_string(),
            humidity_threshold: DEFAULT_HUMIDITY_THRESHOLD.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_interval_ms: DEFAULT_BATCH_INTERVAL_MS,
            stats_window: DEFAULT_STATS_WINDOW,
            jitter: DEFAULT_JITTER,
            seed: None,
        }
    }
}

impl MonitorConfig {
    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(SimError::ConfigIo)?;
        let config = Self::from_json_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json_str(text: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(SimError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no session can run with
    pub fn validate(&self) -> SimResult<()> {
        if self.batch_size == 0 {
            return Err(SimError::Config("batch_size must be at least 1"));
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(SimError::Config("batch_size exceeds the batch limit"));
        }
        if self.stats_window == 0 {
            return Err(SimError::Config("stats_window must be at least 1"));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(SimError::Config("jitter must be a non-negative number"));
        }
        if self.jitter > MAX_JITTER {
            return Err(SimError::Config("jitter must not exceed 120"));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(SimError::Config("store_path must not be empty"));
        }
        Ok(())
    }

    /// Store format, explicit or inferred from `store_path`
    pub fn resolved_format(&self) -> StoreFormat {
        self.store_format
            .unwrap_or_else(|| StoreFormat::from_path(&self.store_path))
    }

    /// Pause between batch samples
    pub fn batch_interval(&self) -> Duration {
        Duration::from_millis(self.batch_interval_ms)
    }

    /// Parse the threshold text
    pub fn thresholds(&self) -> SimResult<AlarmThresholds> {
        AlarmThresholds::parse(&self.temperature_threshold, &self.humidity_threshold)
    }
}
