//! Common test utilities for integration tests
//!
//! This module provides:
//! - Deterministic monitor builders
//! - A pacer that records requested pauses instead of sleeping
//! - A store wrapper that starts failing after a fixed number of appends

#![allow(dead_code)]

use core::time::Duration;

use pseudosense_core::{
    errors::{StoreError, StoreResult},
    store::{MemoryStore, ReadingStore},
    time::{FixedTime, Pacer},
    Monitor, Reading, WaveformGenerator,
};
use rand::rngs::StdRng;

/// Monitor over a memory store with a stepping clock and fixed seed
pub fn memory_monitor(seed: u64, jitter: f64) -> Monitor<MemoryStore, StdRng, FixedTime> {
    Monitor::new(
        WaveformGenerator::seeded(seed).with_jitter(jitter),
        MemoryStore::new(),
        FixedTime::new(1_700_000_000_000).with_step(1000),
    )
}

/// Build `n` readings with the given temperatures and humidities
pub fn readings(pairs: &[(f64, f64)]) -> Vec<Reading> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(t, h))| Reading::new(format!("t{i}"), t, h))
        .collect()
}

/// Pacer that remembers every pause it was asked for
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pub pauses: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, interval: Duration) {
        self.pauses.push(interval);
    }
}

/// Store that accepts `remaining` appends and then reports an I/O failure
pub struct FailingStore {
    pub inner: MemoryStore,
    pub remaining: usize,
}

impl FailingStore {
    pub fn after(appends: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            remaining: appends,
        }
    }
}

impl ReadingStore for FailingStore {
    fn append(&mut self, reading: Reading) -> StoreResult<Reading> {
        if self.remaining == 0 {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.remaining -= 1;
        self.inner.append(reading)
    }

    fn recent(&self, n: usize) -> StoreResult<Vec<Reading>> {
        self.inner.recent(n)
    }

    fn all(&self) -> StoreResult<Vec<Reading>> {
        self.inner.all()
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.inner.clear()
    }

    fn convert_temperatures<F>(&mut self, convert: F) -> StoreResult<usize>
    where
        F: Fn(f64) -> f64,
    {
        self.inner.convert_temperatures(convert)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
