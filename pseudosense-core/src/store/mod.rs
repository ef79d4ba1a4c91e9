//! Reading storage
//!
//! The store is a single append-only table of readings. Rows are only ever
//! added one at a time, rewritten all together (unit conversion) or removed
//! all together (clear).
//!
//! ## Module Organization
//!
//! - [`ReadingStore`] trait (this file)
//! - `memory` - Vec-backed store for tests and throwaway sessions
//! - `file` - persisted store in JSON Lines or CSV (requires `store-file`)
//!
//! A store may also record which temperature unit its rows are in, so a
//! table reopened later keeps using that unit.
//!
//! Rows are addressed by a surrogate `id` assigned on append. Timestamps are
//! caller-supplied text and may collide (two readings in the same
//! millisecond), so nothing keys on them.

use std::path::Path;

use crate::errors::StoreResult;
use crate::reading::Reading;
use crate::units::TemperatureUnit;

pub mod memory;

#[cfg(feature = "store-file")]
pub mod file;

pub use memory::MemoryStore;

#[cfg(feature = "store-file")]
pub use file::{FileStore, FileStoreStats};

/// Append-only log of timestamped readings
pub trait ReadingStore {
    /// Add one row, assigning its id; returns the stored row
    fn append(&mut self, reading: Reading) -> StoreResult<Reading>;

    /// Up to `n` most recently appended rows, newest first
    fn recent(&self, n: usize) -> StoreResult<Vec<Reading>>;

    /// Every row in insertion order
    fn all(&self) -> StoreResult<Vec<Reading>>;

    /// Remove every row. Clearing an empty store is a no-op.
    fn clear(&mut self) -> StoreResult<()>;

    /// Apply `convert` to every stored temperature; returns rows rewritten
    ///
    /// The transform is applied unconditionally, so converting twice
    /// converts twice.
    fn convert_temperatures<F>(&mut self, convert: F) -> StoreResult<usize>
    where
        F: Fn(f64) -> f64;

    /// Convert every temperature and record `unit` as the table's unit
    ///
    /// Backends that persist the unit write both in one step, so the rows
    /// and their recorded unit never disagree on disk.
    fn convert_unit<F>(&mut self, convert: F, unit: TemperatureUnit) -> StoreResult<usize>
    where
        F: Fn(f64) -> f64,
    {
        let converted = self.convert_temperatures(convert)?;
        self.set_unit(unit)?;
        Ok(converted)
    }

    /// Unit recorded for the stored temperatures, if any
    fn unit(&self) -> Option<TemperatureUnit> {
        None
    }

    /// Record `unit` without touching the rows
    fn set_unit(&mut self, _unit: TemperatureUnit) -> StoreResult<()> {
        Ok(())
    }

    /// Number of stored rows
    fn len(&self) -> usize;

    /// True when no rows are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// On-disk layouts supported by the file store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// One JSON object per line
    #[default]
    JsonLines,
    /// Comma-separated values with an `id,timestamp,temperature,humidity` header
    Csv,
}

impl StoreFormat {
    /// `.csv` files are CSV, everything else JSON Lines
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::JsonLines,
        }
    }

    /// Parse a user-supplied format name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jsonl" | "json" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Newest-first view of the tail of `rows`
pub(crate) fn newest_first(rows: &[Reading], n: usize) -> Vec<Reading> {
    rows.iter().rev().take(n).cloned().collect()
}
