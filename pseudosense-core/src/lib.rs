//! Core engine for PseudoSense
//!
//! Simulates a temperature/humidity sensor, keeps its readings in a
//! persisted table and summarises them.
//!
//! - [`generator`]: cyclic reference waveforms plus bounded jitter
//! - [`store`]: append-only reading table (memory or file)
//! - [`stats`]: min/max/mean over recent readings
//! - [`units`]: Celsius↔Fahrenheit conversion
//! - [`alarm`]: threshold comparison
//! - [`monitor`]: one command handler per user action
//!
//! ```no_run
//! use pseudosense_core::{AlarmThresholds, FileStore, Monitor, WaveformGenerator};
//! use pseudosense_core::time::SystemTime;
//!
//! let store = FileStore::open("sensor_data.jsonl")?;
//! let mut monitor = Monitor::new(WaveformGenerator::from_entropy(), store, SystemTime);
//!
//! let outcome = monitor.read_once(&AlarmThresholds::default())?;
//! if outcome.alarm {
//!     // Warn the user
//! }
//! # Ok::<(), pseudosense_core::SimError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alarm;
pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod monitor;
pub mod reading;
pub mod stats;
pub mod store;
pub mod time;
pub mod units;

// Public API
pub use alarm::{check, AlarmThresholds};
pub use config::MonitorConfig;
pub use errors::{SimError, SimResult, StoreError, StoreResult};
pub use generator::{GeneratorState, WaveformGenerator};
pub use monitor::{Monitor, ReadOutcome, Series};
pub use reading::{Reading, Sample};
pub use stats::{stats, ReadingStats};
pub use store::{MemoryStore, ReadingStore, StoreFormat};
pub use units::{to_celsius, to_fahrenheit, TemperatureUnit};

#[cfg(feature = "store-file")]
pub use store::FileStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
