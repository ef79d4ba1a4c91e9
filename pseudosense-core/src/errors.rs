//! Error Types for Simulation, Storage and Input Failures
//!
//! ## Error Categories
//!
//! Errors fall into three groups, matching how the caller is expected to react:
//!
//! ### Recoverable locally
//! - `EmptyInput`: statistics were requested over zero readings. The monitor
//!   turns this into "no report" rather than surfacing it.
//!
//! ### Surfaced to the user
//! - `InvalidThreshold`: alarm threshold text is not a finite number.
//! - `BatchTooLarge`: a batch read asked for more than `MAX_BATCH_SIZE` samples.
//! - `Config`, `ConfigIo`, `ConfigParse`: the configuration file or an
//!   override is unusable.
//!
//! ### Fatal to the operation in progress
//! - `Storage`: the persisted table could not be read or written. The
//!   operation stops; the process may continue with the next command.
//!
//! There are no retries anywhere. A batch read that fails half-way keeps the
//! rows it already appended.
//!
//! ```rust
//! use pseudosense_core::{AlarmThresholds, SimError};
//!
//! match AlarmThresholds::parse("thirty", "80") {
//!     Ok(_) => unreachable!(),
//!     Err(SimError::InvalidThreshold { field, input }) => {
//!         assert_eq!(field, "temperature");
//!         assert_eq!(input, "thirty");
//!     }
//!     Err(other) => panic!("unexpected error: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for monitor-level operations
pub type SimResult<T> = Result<T, SimError>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the persisted reading table
#[derive(Error, Debug)]
pub enum StoreError {
    /// Opening, writing, truncating or renaming the store file failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be encoded or decoded as JSON
    #[error("Row encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// A row was structurally wrong for the chosen format
    #[error("Malformed row at line {line}: {reason}")]
    Format {
        /// 1-based line number in the store file
        line: usize,
        /// What was wrong with it
        reason: &'static str,
    },
}

/// Top-level error for the simulation core
#[derive(Error, Debug)]
pub enum SimError {
    /// Statistics requested over zero readings
    #[error("No readings available for statistics")]
    EmptyInput,

    /// Threshold text could not be parsed as a finite number
    #[error("Invalid {field} threshold: {input:?} is not a number")]
    InvalidThreshold {
        /// Which threshold was rejected ("temperature" or "humidity")
        field: &'static str,
        /// The offending user input
        input: String,
    },

    /// A batch read asked for more samples than allowed
    #[error("Batch of {requested} readings exceeds the limit of {max}")]
    BatchTooLarge {
        /// Samples requested
        requested: usize,
        /// Largest batch accepted
        max: usize,
    },

    /// Persisted state could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Configuration value out of its allowed domain
    #[error("Invalid configuration: {0}")]
    Config(&'static str),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    ConfigIo(#[source] std::io::Error),

    /// Configuration file is not valid JSON for `MonitorConfig`
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[source] serde_json::Error),
}

impl SimError {
    /// True for errors that stop the current operation but leave the
    /// process usable (everything except bad configuration at startup)
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Config(_) | Self::ConfigIo(_) | Self::ConfigParse(_)
        )
    }
}
