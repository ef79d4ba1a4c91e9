//! Monitor: the command handlers behind every user action
//!
//! [`Monitor`] owns the generator, the store and the clock and exposes one
//! method per user action. It has no knowledge of any interface; the CLI (or
//! a test) calls these methods directly.
//!
//! ```text
//!  read_once ──▶ WaveformGenerator ──▶ unit conversion ──▶ ReadingStore.append ──▶ alarm check
//!  stats     ──▶ ReadingStore.recent(window) ──▶ ReadingStats
//!  toggle    ──▶ ReadingStore.convert_temperatures
//! ```
//!
//! ## Units
//!
//! The generator always produces Celsius. While the display unit is
//! Fahrenheit, new samples are converted before they are stored, so every row
//! in the table is in the current unit and alarm thresholds are compared in
//! that unit too.
//!
//! The unit is recorded in the store on the first read and on every toggle.
//! A store that already records a unit decides the monitor's unit, so a
//! reopened table keeps the unit it was left in.
//!
//! ```rust
//! use core::time::Duration;
//! use pseudosense_core::{AlarmThresholds, Monitor, WaveformGenerator};
//! use pseudosense_core::store::MemoryStore;
//! use pseudosense_core::time::{FixedTime, NoDelay};
//!
//! let mut monitor = Monitor::new(
//!     WaveformGenerator::seeded(1),
//!     MemoryStore::new(),
//!     FixedTime::new(0).with_step(1000),
//! );
//! let thresholds = AlarmThresholds::default();
//!
//! monitor.read_batch(3, Duration::from_secs(1), &mut NoDelay, &thresholds)?;
//! let stats = monitor.stats()?.expect("three readings stored");
//! assert_eq!(stats.count, 3);
//! # Ok::<(), pseudosense_core::SimError>(())
//! ```

use core::time::Duration;

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::alarm::AlarmThresholds;
use crate::constants::store::{DEFAULT_STATS_WINDOW, MAX_BATCH_SIZE};
use crate::errors::{SimError, SimResult};
use crate::generator::WaveformGenerator;
use crate::reading::Reading;
use crate::stats::ReadingStats;
use crate::store::ReadingStore;
use crate::time::{Pacer, TimeSource};
use crate::units::TemperatureUnit;

/// Result of a single read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadOutcome {
    /// The row as stored
    pub reading: Reading,
    /// Whether either threshold was exceeded
    pub alarm: bool,
}

/// Plot-ready view of the whole table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    /// Unit of the temperature values
    pub unit: TemperatureUnit,
    /// (1-based sample number, temperature)
    pub temperature: Vec<(usize, f64)>,
    /// (1-based sample number, humidity %)
    pub humidity: Vec<(usize, f64)>,
}

impl Series {
    /// Number of points per series
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    /// True when there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Command handlers over a generator, a store and a clock
pub struct Monitor<S, R, C> {
    generator: WaveformGenerator<R>,
    store: S,
    clock: C,
    unit: TemperatureUnit,
    stats_window: usize,
    last: Option<Reading>,
}

impl<S, R, C> Monitor<S, R, C>
where
    S: ReadingStore,
    R: Rng,
    C: TimeSource,
{
    /// Monitor with the default statistics window
    ///
    /// The unit is the one recorded by the store, or Celsius when the store
    /// records none.
    pub fn new(generator: WaveformGenerator<R>, store: S, clock: C) -> Self {
        let unit = store.unit().unwrap_or_default();
        Self {
            generator,
            store,
            clock,
            unit,
            stats_window: DEFAULT_STATS_WINDOW,
            last: None,
        }
    }

    /// Declare the unit of a store that records none
    ///
    /// A unit recorded by the store takes precedence.
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = self.store.unit().unwrap_or(unit);
        self
    }

    /// Number of most recent readings the statistics cover (minimum 1)
    pub fn with_stats_window(mut self, window: usize) -> Self {
        self.stats_window = window.max(1);
        self
    }

    /// Take one reading: generate, store, evaluate alarm
    pub fn read_once(&mut self, thresholds: &AlarmThresholds) -> SimResult<ReadOutcome> {
        if self.store.unit() != Some(self.unit) {
            self.store.set_unit(self.unit)?;
        }

        let sample = self.generator.next_sample();
        let temperature = TemperatureUnit::Celsius.convert_to(self.unit, sample.temperature);
        let reading = Reading::new(self.clock.now_formatted(), temperature, sample.humidity);

        let stored = self.store.append(reading)?;
        let alarm = thresholds.check(&stored);

        debug!(
            "Reading #{} at {}: {:.2}{} {:.2}%",
            stored.id, stored.timestamp, stored.temperature, self.unit, stored.humidity
        );
        if alarm {
            info!(
                "Alarm: reading #{} ({:.2}{}, {:.2}%) exceeds thresholds ({}{}, {}%)",
                stored.id,
                stored.temperature,
                self.unit,
                stored.humidity,
                thresholds.temperature,
                self.unit,
                thresholds.humidity
            );
        }

        self.last = Some(stored.clone());
        Ok(ReadOutcome { reading: stored, alarm })
    }

    /// Take `count` readings with `interval` between consecutive samples
    ///
    /// Not atomic: if a read fails, rows appended before it stay in the
    /// store and the error is returned. More than [`MAX_BATCH_SIZE`] samples
    /// is rejected before anything is read.
    pub fn read_batch<P: Pacer>(
        &mut self,
        count: usize,
        interval: Duration,
        pacer: &mut P,
        thresholds: &AlarmThresholds,
    ) -> SimResult<Vec<ReadOutcome>> {
        if count > MAX_BATCH_SIZE {
            return Err(SimError::BatchTooLarge {
                requested: count,
                max: MAX_BATCH_SIZE,
            });
        }
        let mut outcomes = Vec::with_capacity(count);

        for i in 0..count {
            if i > 0 {
                pacer.pause(interval);
            }
            match self.read_once(thresholds) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("Batch read stopped after {} of {} samples: {}", i, count, e);
                    return Err(e);
                }
            }
        }

        info!("Batch read complete: {} samples", outcomes.len());
        Ok(outcomes)
    }

    /// Statistics over the most recent readings, `None` when the store is empty
    pub fn stats(&self) -> SimResult<Option<ReadingStats>> {
        let recent = self.store.recent(self.stats_window)?;
        if recent.is_empty() {
            debug!("Stats requested on an empty store");
            return Ok(None);
        }
        ReadingStats::from_readings(&recent).map(Some)
    }

    /// Remove every stored reading
    pub fn clear(&mut self) -> SimResult<()> {
        let removed = self.store.len();
        self.store.clear()?;
        info!("Cleared {} readings", removed);
        Ok(())
    }

    /// Every stored reading as plot series
    pub fn series(&self) -> SimResult<Series> {
        let rows = self.store.all()?;
        let mut series = Series {
            unit: self.unit,
            temperature: Vec::with_capacity(rows.len()),
            humidity: Vec::with_capacity(rows.len()),
        };
        for (i, row) in rows.iter().enumerate() {
            series.temperature.push((i + 1, row.temperature));
            series.humidity.push((i + 1, row.humidity));
        }
        Ok(series)
    }

    /// Switch display unit and convert every stored temperature
    ///
    /// Returns the new unit. Converting an empty store only flips the unit.
    /// On a storage failure nothing changes: rows, last reading and unit stay
    /// as they were.
    pub fn toggle_unit(&mut self) -> SimResult<TemperatureUnit> {
        let target = self.unit.toggled();
        let convert = self.unit.converter(target);

        let converted = self.store.convert_unit(convert, target)?;
        if let Some(last) = self.last.as_mut() {
            last.temperature = convert(last.temperature);
        }
        self.unit = target;

        info!("Unit switched to {} ({} readings converted)", target, converted);
        Ok(target)
    }

    /// Unit of stored and newly read temperatures
    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Readings covered by [`stats`](Self::stats)
    pub fn stats_window(&self) -> usize {
        self.stats_window
    }

    /// Most recent reading taken by this monitor, in the current unit
    pub fn last_reading(&self) -> Option<&Reading> {
        self.last.as_ref()
    }

    /// The sample source
    pub fn generator(&self) -> &WaveformGenerator<R> {
        &self.generator
    }

    /// The reading table
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the reading table
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the store (e.g. to reopen it elsewhere)
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::time::{FixedTime, NoDelay};
    use rand::rngs::StdRng;

    fn monitor(jitter: f64) -> Monitor<MemoryStore, StdRng, FixedTime> {
        Monitor::new(
            WaveformGenerator::seeded(17).with_jitter(jitter),
            MemoryStore::new(),
            FixedTime::new(0).with_step(1000),
        )
    }

    #[test]
    fn read_once_stores_and_returns_reading() {
        let mut m = monitor(0.0);
        let outcome = m.read_once(&AlarmThresholds::default()).unwrap();
        assert_eq!(outcome.reading.id, 1);
        assert_eq!(outcome.reading.timestamp, "1970-01-01T00:00:00.000Z");
        assert_eq!((outcome.reading.temperature, outcome.reading.humidity), (-20.0, 0.0));
        assert!(!outcome.alarm);
        assert_eq!(m.store().len(), 1);
        assert_eq!(m.last_reading(), Some(&outcome.reading));
    }

    #[test]
    fn alarm_raised_against_thresholds() {
        let mut m = monitor(0.0);
        let low = AlarmThresholds::new(-30.0, 100.0);
        assert!(m.read_once(&low).unwrap().alarm);
    }

    #[test]
    fn oversized_batch_rejected_before_reading() {
        let mut m = monitor(1.0);
        let err = m
            .read_batch(usize::MAX, Duration::ZERO, &mut NoDelay, &AlarmThresholds::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::BatchTooLarge { requested: usize::MAX, max: MAX_BATCH_SIZE }
        ));
        assert!(m.store().is_empty());

        let outcomes = m
            .read_batch(MAX_BATCH_SIZE, Duration::ZERO, &mut NoDelay, &AlarmThresholds::default())
            .unwrap();
        assert_eq!(outcomes.len(), MAX_BATCH_SIZE);
    }

    #[test]
    fn unit_comes_from_store_record() {
        let mut store = MemoryStore::new();
        store.set_unit(TemperatureUnit::Fahrenheit).unwrap();
        let m = Monitor::new(WaveformGenerator::seeded(1), store, FixedTime::new(0))
            .with_unit(TemperatureUnit::Celsius);
        assert_eq!(m.unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn first_read_records_unit() {
        let mut m = monitor(0.0).with_unit(TemperatureUnit::Fahrenheit);
        assert_eq!(m.store().unit(), None);
        let outcome = m.read_once(&AlarmThresholds::default()).unwrap();
        assert_eq!(m.store().unit(), Some(TemperatureUnit::Fahrenheit));
        assert!((outcome.reading.temperature - -4.0).abs() < 1e-9);
    }

    #[test]
    fn stats_none_on_empty_store() {
        assert_eq!(monitor(1.0).stats().unwrap(), None);
    }

    #[test]
    fn stats_cover_recent_window_only() {
        let mut m = monitor(0.0).with_stats_window(2);
        m.read_batch(3, Duration::ZERO, &mut NoDelay, &AlarmThresholds::default())
            .unwrap();
        // Temperatures -20, -10, 0 -> window holds -10 and 0
        let stats = m.stats().unwrap().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!((stats.min_temp, stats.max_temp), (-10.0, 0.0));
    }

    #[test]
    fn toggle_converts_store_and_new_readings() {
        let mut m = monitor(0.0);
        let thresholds = AlarmThresholds::default();
        m.read_once(&thresholds).unwrap(); // -20°C

        assert_eq!(m.toggle_unit().unwrap(), TemperatureUnit::Fahrenheit);
        assert!((m.last_reading().unwrap().temperature - -4.0).abs() < 1e-9);

        let second = m.read_once(&thresholds).unwrap(); // -10°C stored as 14°F
        assert!((second.reading.temperature - 14.0).abs() < 1e-9);

        let series = m.series().unwrap();
        assert_eq!(series.unit, TemperatureUnit::Fahrenheit);
        assert!((series.temperature[0].1 - -4.0).abs() < 1e-9);
    }

    #[test]
    fn toggle_on_empty_store_flips_unit() {
        let mut m = monitor(1.0);
        assert_eq!(m.toggle_unit().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(m.store().unit(), Some(TemperatureUnit::Fahrenheit));
        assert_eq!(m.toggle_unit().unwrap(), TemperatureUnit::Celsius);
    }

    #[test]
    fn series_is_one_based() {
        let mut m = monitor(0.0);
        m.read_batch(2, Duration::ZERO, &mut NoDelay, &AlarmThresholds::default())
            .unwrap();
        let series = m.series().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.humidity, vec![(1, 0.0), (2, 20.0)]);
    }

    #[test]
    fn clear_empties_store() {
        let mut m = monitor(1.0);
        m.read_once(&AlarmThresholds::default()).unwrap();
        m.clear().unwrap();
        assert!(m.store().is_empty());
        assert!(m.series().unwrap().is_empty());
    }
}
