//! Example 01: A Simulated Session
//!
//! This example demonstrates how to:
//! - Take single and batch readings into a persisted store
//! - Report statistics over the most recent readings
//! - Switch the table between Celsius and Fahrenheit
//! - Reopen the store and see the same rows

use core::time::Duration;

use pseudosense_core::{
    store::{FileStore, ReadingStore},
    time::{NoDelay, SystemTime},
    AlarmThresholds, Monitor, SimError, TemperatureUnit, WaveformGenerator,
};

fn main() -> Result<(), SimError> {
    println!("=== PseudoSense Simulated Session ===\n");

    let path = std::env::temp_dir().join("pseudosense_example.csv");
    let mut store = FileStore::open(&path)?;
    store.clear()?;

    let mut monitor = Monitor::new(WaveformGenerator::seeded(2024), store, SystemTime);
    let thresholds = AlarmThresholds::parse("85", "75")?;

    // Single reading
    let outcome = monitor.read_once(&thresholds)?;
    println!(
        "Reading #{}: {:.2}{}  {:.2}%",
        outcome.reading.id,
        outcome.reading.temperature,
        monitor.unit(),
        outcome.reading.humidity
    );

    // Batch without waiting between samples
    let outcomes = monitor.read_batch(12, Duration::from_secs(1), &mut NoDelay, &thresholds)?;
    let alarms = outcomes.iter().filter(|o| o.alarm).count();
    println!("Batch: {} readings, {} alarms", outcomes.len(), alarms);

    if let Some(stats) = monitor.stats()? {
        println!("\nLast {} readings:\n{}", stats.count, stats);
    }

    // Switch units and show the converted table
    let unit = monitor.toggle_unit()?;
    println!("\nSwitched to {}", unit);
    if let Some(stats) = monitor.stats()? {
        println!("{}", stats);
    }

    // Reopen the file and confirm nothing was lost
    drop(monitor);
    let reopened = FileStore::open(&path)?;
    println!(
        "\nReopened {}: {} rows, first temperature {:.2}{}",
        path.display(),
        reopened.len(),
        reopened.all()?.first().map_or(0.0, |r| r.temperature),
        TemperatureUnit::Fahrenheit
    );

    Ok(())
}
