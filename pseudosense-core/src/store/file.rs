//! File-backed reading store
//!
//! Persists the reading table as JSON Lines or CSV. The whole table is kept
//! in memory and every mutation is written through before the in-memory view
//! changes, so a failed write leaves the store as it was.
//!
//! ## Supported Formats
//!
//! ### JSON Lines
//! ```json
//! {"id":1,"timestamp":"2024-05-01T12:00:00.000Z","temperature":21.37,"humidity":40.12}
//! ```
//!
//! ### CSV
//! ```csv
//! id,timestamp,temperature,humidity
//! 1,2024-05-01T12:00:00.000Z,21.37,40.12
//! ```
//! Three-column rows without an id (`timestamp,temperature,humidity`) are
//! accepted on load and numbered in file order.
//!
//! ## Write Path
//!
//! | Operation | File effect |
//! |---|---|
//! | `append` | one line appended and flushed |
//! | `clear` | file truncated (CSV header rewritten) |
//! | `convert_temperatures` | table written to `<path>.tmp`, then renamed over `<path>` |
//!
//! Blank lines and `#` comments are skipped on load. Malformed rows are
//! skipped and counted in [`FileStoreStats::parse_errors`].
//!
//! ## Unit Marker
//!
//! The unit of the stored temperatures is kept in a comment line at the top
//! of the file, written whenever the unit is recorded or converted:
//!
//! ```text
//! # unit=fahrenheit
//! ```
//!
//! Files without a marker report no unit.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::constants::store::{CSV_HEADER, UNIT_MARKER};
use crate::errors::{StoreError, StoreResult};
use crate::reading::Reading;
use crate::units::TemperatureUnit;

use super::{newest_first, ReadingStore, StoreFormat};

/// Counters gathered while loading and writing the store file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileStoreStats {
    /// Rows loaded successfully at open
    pub rows_loaded: usize,
    /// Lines examined at open (including blanks, comments and header)
    pub lines_processed: usize,
    /// Rows skipped because they could not be parsed
    pub parse_errors: usize,
    /// Loaded rows whose id was missing or out of order and got renumbered
    pub renumbered: usize,
    /// Bytes read at open
    pub bytes_read: usize,
    /// Rows written since open (appends plus rewrites)
    pub rows_written: usize,
}

/// Persisted reading store
///
/// ```rust,no_run
/// use pseudosense_core::store::{FileStore, ReadingStore};
/// use pseudosense_core::Reading;
///
/// let mut store = FileStore::open("sensor_data.jsonl")?;
/// store.append(Reading::new("2024-05-01T12:00:00.000Z", 21.4, 40.1))?;
/// println!("{} rows on disk", store.len());
/// # Ok::<(), pseudosense_core::StoreError>(())
/// ```
pub struct FileStore {
    path: PathBuf,
    format: StoreFormat,
    /// Append-mode handle used for single-row writes
    file: File,
    rows: Vec<Reading>,
    next_id: u64,
    unit: Option<TemperatureUnit>,
    stats: FileStoreStats,
}

impl FileStore {
    /// Open (or create) a store, inferring the format from the extension
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        Self::open_with_format(path, StoreFormat::from_path(path))
    }

    /// Open (or create) a store in an explicit format
    pub fn open_with_format(path: impl AsRef<Path>, format: StoreFormat) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut stats = FileStoreStats::default();

        let (rows, unit) = if path.exists() {
            load_rows(&path, format, &mut stats)?
        } else {
            (Vec::new(), None)
        };

        let file = open_append(&path)?;
        let next_id = rows.last().map_or(1, |r| r.id + 1);

        let mut store = Self {
            path,
            format,
            file,
            rows,
            next_id,
            unit,
            stats,
        };

        if store.file.metadata()?.len() == 0 {
            store.write_preamble()?;
        }

        debug!(
            "Opened {:?} store at {} with {} rows ({} skipped, unit {:?})",
            store.format,
            store.path.display(),
            store.rows.len(),
            store.stats.parse_errors,
            store.unit
        );
        Ok(store)
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// On-disk layout
    pub fn format(&self) -> StoreFormat {
        self.format
    }

    /// Get statistics
    pub fn stats(&self) -> &FileStoreStats {
        &self.stats
    }

    /// Unit marker (if recorded) and CSV header, written to an empty file
    fn write_preamble(&mut self) -> StoreResult<()> {
        if let Some(unit) = self.unit {
            writeln!(self.file, "{}{}", UNIT_MARKER, unit.name())?;
        }
        if self.format == StoreFormat::Csv {
            writeln!(self.file, "{}", CSV_HEADER)?;
        }
        self.file.flush()?;
        Ok(())
    }

    fn encode(&self, reading: &Reading) -> StoreResult<String> {
        match self.format {
            StoreFormat::JsonLines => Ok(serde_json::to_string(reading)?),
            StoreFormat::Csv => {
                if reading.timestamp.contains([',', '\n', '\r']) {
                    return Err(StoreError::Format {
                        line: self.rows.len() + 1,
                        reason: "timestamp contains a CSV delimiter",
                    });
                }
                Ok(format!(
                    "{},{},{},{}",
                    reading.id, reading.timestamp, reading.temperature, reading.humidity
                ))
            }
        }
    }

    fn converted_rows<F: Fn(f64) -> f64>(&self, convert: F) -> Vec<Reading> {
        self.rows
            .iter()
            .map(|row| Reading {
                temperature: convert(row.temperature),
                ..row.clone()
            })
            .collect()
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Write `rows` under `unit` to a sibling file and rename it over the store
    ///
    /// The in-memory table is replaced only once the rename has succeeded.
    fn rewrite(&mut self, unit: Option<TemperatureUnit>, rows: Vec<Reading>) -> StoreResult<()> {
        let tmp = self.temp_path();
        let written = self
            .write_table(&tmp, unit, &rows)
            .and_then(|()| Ok(fs::rename(&tmp, &self.path)?));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        self.stats.rows_written += rows.len();
        self.rows = rows;
        self.unit = unit;
        // The old handle points at the replaced file
        self.file = open_append(&self.path)?;
        Ok(())
    }

    fn write_table(
        &self,
        tmp: &Path,
        unit: Option<TemperatureUnit>,
        rows: &[Reading],
    ) -> StoreResult<()> {
        let mut out = BufWriter::new(File::create(tmp)?);
        if let Some(unit) = unit {
            writeln!(out, "{}{}", UNIT_MARKER, unit.name())?;
        }
        if self.format == StoreFormat::Csv {
            writeln!(out, "{}", CSV_HEADER)?;
        }
        for row in rows {
            writeln!(out, "{}", self.encode(row)?)?;
        }
        out.flush()?;
        out.get_ref().sync_all()?;
        Ok(())
    }
}

impl ReadingStore for FileStore {
    fn append(&mut self, mut reading: Reading) -> StoreResult<Reading> {
        reading.id = self.next_id;
        let line = self.encode(&reading)?;

        writeln!(self.file, "{}", line)?;
        self.file.flush()?;

        self.next_id += 1;
        self.stats.rows_written += 1;
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
        self.file.set_len(0)?;
        self.rows.clear();
        self.write_preamble()
    }

    fn convert_temperatures<F>(&mut self, convert: F) -> StoreResult<usize>
    where
        F: Fn(f64) -> f64,
    {
        if self.rows.is_empty() {
            return Ok(0);
        }
        let converted = self.converted_rows(convert);
        self.rewrite(self.unit, converted)?;
        Ok(self.rows.len())
    }

    fn convert_unit<F>(&mut self, convert: F, unit: TemperatureUnit) -> StoreResult<usize>
    where
        F: Fn(f64) -> f64,
    {
        let converted = self.converted_rows(convert);
        self.rewrite(Some(unit), converted)?;
        Ok(self.rows.len())
    }

    fn unit(&self) -> Option<TemperatureUnit> {
        self.unit
    }

    fn set_unit(&mut self, unit: TemperatureUnit) -> StoreResult<()> {
        if self.unit == Some(unit) {
            return Ok(());
        }
        let rows = self.rows.clone();
        self.rewrite(Some(unit), rows)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

fn open_append(path: &Path) -> StoreResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Read every row and the unit marker of an existing store file
fn load_rows(
    path: &Path,
    format: StoreFormat,
    stats: &mut FileStoreStats,
) -> StoreResult<(Vec<Reading>, Option<TemperatureUnit>)> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows: Vec<Reading> = Vec::new();
    let mut unit = None;
    let mut last_id = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        stats.lines_processed += 1;
        stats.bytes_read += line.len() + 1;

        let trimmed = line.trim();
        if let Some(name) = trimmed.strip_prefix(UNIT_MARKER) {
            match name.parse::<TemperatureUnit>() {
                Ok(parsed) => unit = Some(parsed),
                Err(e) => warn!("Ignoring unit marker in {}: {}", path.display(), e),
            }
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if format == StoreFormat::Csv && trimmed.eq_ignore_ascii_case(CSV_HEADER) {
            continue;
        }

        let parsed = match format {
            StoreFormat::JsonLines => parse_json(trimmed, line_no),
            StoreFormat::Csv => parse_csv(trimmed, line_no),
        };

        let mut reading = match parsed {
            Ok(reading) => reading,
            Err(e) => {
                stats.parse_errors += 1;
                warn!("Skipping row in {}: {}", path.display(), e);
                continue;
            }
        };

        if reading.id <= last_id {
            reading.id = last_id + 1;
            stats.renumbered += 1;
        }
        last_id = reading.id;
        rows.push(reading);
    }

    stats.rows_loaded = rows.len();
    if stats.renumbered > 0 {
        debug!("Renumbered {} rows in {}", stats.renumbered, path.display());
    }
    Ok((rows, unit))
}

fn parse_json(line: &str, line_no: usize) -> StoreResult<Reading> {
    let reading: Reading = serde_json::from_str(line)?;
    if !reading.temperature.is_finite() || !reading.humidity.is_finite() {
        return Err(StoreError::Format {
            line: line_no,
            reason: "non-finite value",
        });
    }
    Ok(reading)
}

fn parse_csv(line: &str, line_no: usize) -> StoreResult<Reading> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let format_err = |reason| StoreError::Format { line: line_no, reason };

    let (id, timestamp, temperature, humidity) = match fields.as_slice() {
        [id, ts, t, h] => {
            let id = id.parse::<u64>().map_err(|_| format_err("invalid id"))?;
            (id, *ts, *t, *h)
        }
        [ts, t, h] => (0, *ts, *t, *h),
        _ => return Err(format_err("expected 3 or 4 fields")),
    };

    let temperature = temperature
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format_err("invalid temperature"))?;
    let humidity = humidity
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format_err("invalid humidity"))?;

    Ok(Reading {
        id,
        timestamp: timestamp.trim_matches('"').to_string(),
        temperature,
        humidity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_row_with_id() {
        let r = parse_csv("7,2024-01-01T00:00:00.000Z,21.5,40", 1).unwrap();
        assert_eq!(r.id, 7);
        assert_eq!(r.timestamp, "2024-01-01T00:00:00.000Z");
        assert_eq!((r.temperature, r.humidity), (21.5, 40.0));
    }

    #[test]
    fn csv_row_without_id() {
        let r = parse_csv("\"Mon May 1 12:00:00 2024\",21.5,40", 1).unwrap();
        assert_eq!(r.id, 0);
        assert_eq!(r.timestamp, "Mon May 1 12:00:00 2024");
    }

    #[test]
    fn csv_rejects_bad_rows() {
        assert!(parse_csv("only,two", 3).is_err());
        assert!(parse_csv("1,t,warm,40", 3).is_err());
        assert!(parse_csv("x,t,20,40", 3).is_err());
        assert!(matches!(
            parse_csv("1,t,20,NaN", 9),
            Err(StoreError::Format { line: 9, reason: "invalid humidity" })
        ));
    }

    #[test]
    fn json_rejects_garbage() {
        assert!(matches!(parse_json("{not json", 1), Err(StoreError::Encode(_))));
        assert!(parse_json(r#"{"id":1,"timestamp":"t","temperature":1.5,"humidity":2}"#, 1).is_ok());
    }
}
