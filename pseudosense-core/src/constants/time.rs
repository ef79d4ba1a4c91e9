//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Pause between samples of a batch read (milliseconds).
///
/// One reading per second, matching a 1 Hz environmental sensor.
pub const DEFAULT_BATCH_INTERVAL_MS: u64 = MS_PER_SECOND;

/// `chrono` format string for stored timestamps (RFC 3339, UTC, millis).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
