//! Constants for PseudoSense Core
//!
//! All numeric defaults live here so the generator, store, monitor and
//! configuration agree on them.
//!
//! ## Organization
//!
//! - **Sensors**: reference waveforms, clamp ranges and jitter
//! - **Time**: unit conversions and batch pacing
//! - **Store**: file locations, window sizes and alarm defaults

/// Reference waveforms and physical clamp ranges of the simulated sensor.
pub mod sensors;

/// Time-related constants for conversions and batch pacing.
pub mod time;

/// Store, statistics and alarm defaults.
pub mod store;

// Re-export commonly used constants for convenience
pub use sensors::{
    HUMIDITY_REFERENCE, TEMPERATURE_REFERENCE,
    HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT, TEMP_MIN_C, TEMP_MAX_C,
    DEFAULT_JITTER, MAX_JITTER, WAVEFORM_PERIOD,
};

pub use time::{MS_PER_SECOND, DEFAULT_BATCH_INTERVAL_MS};

pub use store::{
    DEFAULT_STORE_PATH, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE, DEFAULT_STATS_WINDOW,
    DEFAULT_TEMP_THRESHOLD, DEFAULT_HUMIDITY_THRESHOLD,
};
