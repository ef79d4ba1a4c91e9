//! Memory-backed store for tests and throwaway sessions
//!
//! ## Example
//!
//! ```rust
//! use pseudosense_core::store::{MemoryStore, ReadingStore};
//! use pseudosense_core::Reading;
//!
//! let mut store = MemoryStore::new();
//! store.append(Reading::new("t0", 20.0, 40.0))?;
//! store.append(Reading::new("t1", 21.0, 41.0))?;
//!
//! let latest = store.recent(1)?;
//! assert_eq!(latest[0].timestamp, "t1");
//! # Ok::<(), pseudosense_core::StoreError>(())
//! ```

use crate::errors::StoreResult;
use crate::reading::Reading;
use crate::units::TemperatureUnit;

use super::{newest_first, ReadingStore};

/// Vec-backed reading store
///
/// Ids start at 1 and are never reused, even across `clear()`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    rows: Vec<Reading>,
    next_id: u64,
    unit: Option<TemperatureUnit>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store; the first id is 1
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
            unit: None,
        }
    }

    /// Borrow the rows without cloning
    pub fn rows(&self) -> &[Reading] {
        &self.rows
    }
}

impl ReadingStore for MemoryStore {
    fn append(&mut self, mut reading: Reading) -> StoreResult<Reading> {
        reading.id = self.next_id;
        self.next_id += 1;
        self.rows.push(reading.clone());
        Ok(reading)
    }

    fn recent(&self, n: usize) -> StoreResult<Vec<Reading>> {
        Ok(newest_first(&self.rows, n))
    }

    fn all(&self) -> StoreResult<Vec<Reading>> {
        Ok(self.rows.clone())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.rows.clear();
        Ok(())
    }

    fn convert_temperatures<F>(&mut self, convert: F) -> StoreResult<usize>
    where
        F: Fn(f64) -> f64,
    {
        for row in &mut self.rows {
            row.temperature = convert(row.temperature);
        }
        Ok(self.rows.len())
    }

    fn unit(&self) -> Option<TemperatureUnit> {
        self.unit
    }

    fn set_unit(&mut self, unit: TemperatureUnit) -> StoreResult<()> {
        self.unit = Some(unit);
        Ok(())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}
