//! Command dispatch over a running monitor
//!
//! Both the one-shot subcommands and the interactive shell end up here as a
//! [`Command`]. The session owns the threshold text exactly as the user typed
//! it; it is parsed each time a reading is taken so a bad value only blocks
//! reads, never startup.

use core::time::Duration;
use std::io::Write;

use anyhow::{bail, Context, Result};
use pseudosense_core::{
    constants::store::MAX_BATCH_SIZE,
    store::ReadingStore, time::Pacer, time::TimeSource, AlarmThresholds, Monitor, MonitorConfig,
    ReadOutcome, TemperatureUnit,
};
use rand::Rng;

use crate::render;

/// Which threshold an `alarm` command sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmField {
    Temperature,
    Humidity,
}

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Take `n` readings (1 = a single read)
    Read(usize),
    /// Take the configured batch size
    Batch,
    Stats,
    Clear,
    Plot,
    ToggleUnit,
    Dump,
    /// Replace a threshold's text
    SetAlarm(AlarmField, String),
    ShowAlarm,
    Help,
}

/// A monitor plus the front-end state around it
pub struct Session<S, R, C, P> {
    monitor: Monitor<S, R, C>,
    pacer: P,
    temperature_threshold: String,
    humidity_threshold: String,
    batch_size: usize,
    batch_interval: Duration,
}

impl<S, R, C, P> Session<S, R, C, P>
where
    S: ReadingStore,
    R: Rng,
    C: TimeSource,
    P: Pacer,
{
    pub fn new(monitor: Monitor<S, R, C>, pacer: P, config: &MonitorConfig) -> Self {
        Self {
            monitor,
            pacer,
            temperature_threshold: config.temperature_threshold.clone(),
            humidity_threshold: config.humidity_threshold.clone(),
            batch_size: config.batch_size,
            batch_interval: config.batch_interval(),
        }
    }

    pub fn monitor(&self) -> &Monitor<S, R, C> {
        &self.monitor
    }

    /// Run one command, writing its output to `out`
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<()> {
        match command {
            Command::Read(count) => self.read(*count, out),
            Command::Batch => self.read(self.batch_size, out),
            Command::Stats => {
                let stats = self.monitor.stats()?;
                writeln!(out, "{}", render::stats_report(stats.as_ref()))?;
                Ok(())
            }
            Command::Clear => {
                self.monitor.clear()?;
                writeln!(out, "All readings cleared")?;
                Ok(())
            }
            Command::Plot => {
                let series = self.monitor.series()?;
                write!(out, "{}", render::plot(&series))?;
                Ok(())
            }
            Command::ToggleUnit => {
                let unit = self.monitor.toggle_unit()?;
                writeln!(out, "Unit: {}", unit)?;
                if let Some(last) = self.monitor.last_reading() {
                    writeln!(out, "{}", render::temperature_label(last, unit))?;
                }
                Ok(())
            }
            Command::Dump => {
                let rows = self.monitor.store().all()?;
                write!(out, "{}", render::dump(&rows, self.monitor.unit()))?;
                Ok(())
            }
            Command::SetAlarm(field, text) => {
                match field {
                    AlarmField::Temperature => self.temperature_threshold = text.clone(),
                    AlarmField::Humidity => self.humidity_threshold = text.clone(),
                }
                writeln!(out, "{}", self.threshold_summary())?;
                Ok(())
            }
            Command::ShowAlarm => {
                writeln!(out, "{}", self.threshold_summary())?;
                Ok(())
            }
            Command::Help => {
                write!(out, "{}", crate::shell::HELP)?;
                Ok(())
            }
        }
    }

    fn read<W: Write>(&mut self, count: usize, out: &mut W) -> Result<()> {
        if count == 0 {
            bail!("read count must be at least 1");
        }
        if count > MAX_BATCH_SIZE {
            bail!("read count must be at most {}", MAX_BATCH_SIZE);
        }
        let thresholds = self.thresholds().context("read skipped")?;
        let unit = self.monitor.unit();

        if count == 1 {
            let outcome = self.monitor.read_once(&thresholds)?;
            writeln!(out, "{}", render::temperature_label(&outcome.reading, unit))?;
            writeln!(out, "{}", render::humidity_label(&outcome.reading))?;
            write_alarm(out, &outcome, &thresholds, unit)?;
            return Ok(());
        }

        let outcomes =
            self.monitor
                .read_batch(count, self.batch_interval, &mut self.pacer, &thresholds)?;
        for outcome in &outcomes {
            writeln!(out, "{}", render::reading_line(&outcome.reading, unit))?;
            write_alarm(out, outcome, &thresholds, unit)?;
        }
        Ok(())
    }

    fn thresholds(&self) -> Result<AlarmThresholds> {
        Ok(AlarmThresholds::parse(
            &self.temperature_threshold,
            &self.humidity_threshold,
        )?)
    }

    fn threshold_summary(&self) -> String {
        format!(
            "Alarm thresholds: temperature {}{}, humidity {}%",
            self.temperature_threshold.trim(),
            self.monitor.unit(),
            self.humidity_threshold.trim()
        )
    }
}

fn write_alarm<W: Write>(
    out: &mut W,
    outcome: &ReadOutcome,
    thresholds: &AlarmThresholds,
    unit: TemperatureUnit,
) -> Result<()> {
    if outcome.alarm {
        if let Some(warning) = render::alarm_warning(&outcome.reading, thresholds, unit) {
            writeln!(out, "{}", warning)?;
        }
    }
    Ok(())
}
