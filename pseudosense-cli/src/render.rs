//! Text rendering of readings, alarms, statistics and charts
//!
//! Every function returns a `String` so the shell and the one-shot commands
//! share output, and tests can compare it directly.

use pseudosense_core::{
    AlarmThresholds, Reading, ReadingStats, Series, TemperatureUnit,
};

/// Rows drawn per chart
pub const CHART_HEIGHT: usize = 10;

/// Most recent points drawn per chart
pub const CHART_WIDTH: usize = 60;

/// `Temperature: 23.45°C`
pub fn temperature_label(reading: &Reading, unit: TemperatureUnit) -> String {
    format!("Temperature: {:.2}{}", reading.temperature, unit)
}

/// `Humidity: 40.12%`
pub fn humidity_label(reading: &Reading) -> String {
    format!("Humidity: {:.2}%", reading.humidity)
}

/// Both labels on one line, prefixed with the row id
pub fn reading_line(reading: &Reading, unit: TemperatureUnit) -> String {
    format!(
        "#{:<4} {}  {}",
        reading.id,
        temperature_label(reading, unit),
        humidity_label(reading)
    )
}

/// Warning naming each exceeded threshold; `None` when nothing is exceeded
pub fn alarm_warning(
    reading: &Reading,
    thresholds: &AlarmThresholds,
    unit: TemperatureUnit,
) -> Option<String> {
    let exceeded = thresholds.exceeded(reading);
    if !exceeded.any() {
        return None;
    }

    let mut parts = Vec::with_capacity(2);
    if exceeded.temperature {
        parts.push(format!(
            "temperature {:.2}{} > {}{}",
            reading.temperature, unit, thresholds.temperature, unit
        ));
    }
    if exceeded.humidity {
        parts.push(format!(
            "humidity {:.2}% > {}%",
            reading.humidity, thresholds.humidity
        ));
    }
    Some(format!("WARNING: alarm threshold exceeded ({})", parts.join(", ")))
}

pub fn stats_report(stats: Option<&ReadingStats>) -> String {
    match stats {
        Some(stats) => format!("Statistics over the last {} readings\n{}", stats.count, stats),
        None => "No readings yet".to_string(),
    }
}

/// Plain ASCII line chart of the last [`CHART_WIDTH`] points
///
/// ```text
/// Temperature (°C)
///    90.00 |        *
///    ...
///   -20.00 |*
///          +----------
///           1 .. 10
/// ```
pub fn line_chart(title: &str, points: &[(usize, f64)], height: usize) -> String {
    let mut out = format!("{}\n", title);
    if points.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let shown = &points[points.len().saturating_sub(CHART_WIDTH)..];
    let (min, max) = shown
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });
    let span = if max > min { max - min } else { 1.0 };
    let rows = height.max(2);
    let level = |v: f64| (((v - min) / span) * (rows - 1) as f64).round() as usize;

    for row in (0..rows).rev() {
        let label = min + span * row as f64 / (rows - 1) as f64;
        let line: String = shown
            .iter()
            .map(|&(_, v)| if level(v) == row { '*' } else { ' ' })
            .collect();
        out.push_str(&format!("{:>9.2} |{}\n", label, line.trim_end()));
    }

    out.push_str(&format!("{:>9} +{}\n", "", "-".repeat(shown.len())));
    out.push_str(&format!(
        "{:>9}  {} .. {}\n",
        "",
        shown[0].0,
        shown[shown.len() - 1].0
    ));
    out
}

/// Temperature and humidity charts, one above the other
pub fn plot(series: &Series) -> String {
    let mut out = line_chart(
        &format!("Temperature ({})", series.unit),
        &series.temperature,
        CHART_HEIGHT,
    );
    out.push('\n');
    out.push_str(&line_chart("Humidity (%)", &series.humidity, CHART_HEIGHT));
    out
}

/// Whole table, one row per line
pub fn dump(rows: &[Reading], unit: TemperatureUnit) -> String {
    let mut out = format!(
        "{:<6} {:<26} {:>12} {:>10}\n",
        "id",
        "timestamp",
        format!("temp ({})", unit),
        "humidity"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<6} {:<26} {:>12.2} {:>10.2}\n",
            row.id, row.timestamp, row.temperature, row.humidity
        ));
    }
    out.push_str(&format!("{} rows\n", rows.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, humidity: f64) -> Reading {
        Reading {
            id: 3,
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            temperature,
            humidity,
        }
    }

    #[test]
    fn labels_use_two_decimals_and_unit() {
        let r = reading(23.454, 40.1);
        assert_eq!(temperature_label(&r, TemperatureUnit::Celsius), "Temperature: 23.45°C");
        assert_eq!(temperature_label(&r, TemperatureUnit::Fahrenheit), "Temperature: 23.45°F");
        assert_eq!(humidity_label(&r), "Humidity: 40.10%");
    }

    #[test]
    fn alarm_names_exceeded_thresholds() {
        let thresholds = AlarmThresholds::new(100.0, 100.0);
        assert_eq!(alarm_warning(&reading(50.0, 50.0), &thresholds, TemperatureUnit::Celsius), None);

        let warning =
            alarm_warning(&reading(101.0, 5.0), &thresholds, TemperatureUnit::Celsius).unwrap();
        assert!(warning.contains("temperature 101.00°C > 100°C"));
        assert!(!warning.contains("humidity"));
    }

    #[test]
    fn stats_report_handles_empty() {
        assert_eq!(stats_report(None), "No readings yet");

        let rows = vec![reading(10.0, 20.0), reading(30.0, 40.0)];
        let stats = ReadingStats::from_readings(&rows).unwrap();
        let report = stats_report(Some(&stats));
        assert!(report.contains("Temperature - Min: 10.00, Max: 30.00, Avg: 20.00"));
        assert!(report.contains("Humidity - Min: 20.00, Max: 40.00, Avg: 30.00"));
    }

    #[test]
    fn chart_places_extremes_on_outer_rows() {
        let chart = line_chart("T", &[(1, 0.0), (2, 10.0), (3, 5.0)], 3);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "T");
        assert_eq!(lines[1], "    10.00 | *");
        assert_eq!(lines[2], "     5.00 |  *");
        assert_eq!(lines[3], "     0.00 |*");
        assert_eq!(lines[4], "          +---");
        assert_eq!(lines[5], "           1 .. 3");
    }

    #[test]
    fn chart_of_nothing() {
        assert_eq!(line_chart("H", &[], 5), "H\n  (no data)\n");
    }

    #[test]
    fn chart_keeps_only_latest_points() {
        let points: Vec<(usize, f64)> = (1..=100).map(|i| (i, i as f64)).collect();
        let chart = line_chart("T", &points, 4);
        assert!(chart.ends_with("41 .. 100\n"));
    }

    #[test]
    fn dump_lists_rows() {
        let text = dump(&[reading(21.5, 40.0)], TemperatureUnit::Celsius);
        assert!(text.contains("2024-05-01T12:00:00.000Z"));
        assert!(text.contains("21.50"));
        assert!(text.ends_with("1 rows\n"));
    }
}
