//! Time management for the simulator
//!
//! Provides clock abstraction so the core never reads the wall clock directly:
//! - System clock for real sessions
//! - Fixed clock for tests and replay (optionally auto-stepping)
//!
//! Pacing of batch reads is abstracted the same way through [`Pacer`], so a
//! ten-sample batch can run instantly under test.

use core::cell::Cell;
use core::time::Duration;

use chrono::{DateTime, Utc};

use crate::constants::time::TIMESTAMP_FORMAT;

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time
    fn is_wall_clock(&self) -> bool;

    /// Current time rendered as a store timestamp
    fn now_formatted(&self) -> String {
        format_timestamp(self.now())
    }
}

/// System time source
#[derive(Debug, Clone, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for testing
///
/// With a non-zero step every call to `now()` returns the current value and
/// then advances by `step_ms`, so consecutive readings get distinct
/// timestamps without a real clock.
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Cell<Timestamp>,
    step_ms: u64,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Cell::new(timestamp),
            step_ms: 0,
        }
    }

    /// Advance by `step_ms` after every read
    pub fn with_step(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp.set(self.timestamp.get() + ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        let current = self.timestamp.get();
        self.timestamp.set(current.saturating_add(self.step_ms));
        current
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Render a millisecond timestamp as RFC 3339 UTC with millisecond precision
///
/// Out-of-range values (beyond what chrono can represent) fall back to the
/// raw millisecond count so a row is never left without a timestamp.
pub fn format_timestamp(ms: Timestamp) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Pacing between samples of a batch read
pub trait Pacer {
    /// Block (or pretend to) for `interval`
    fn pause(&mut self, interval: Duration);
}

/// Real-time pacing with `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, interval: Duration) {
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
}

/// Pacing that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self, _interval: Duration) {}
}
