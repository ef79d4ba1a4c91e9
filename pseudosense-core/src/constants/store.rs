//! Store, Statistics and Alarm Defaults

/// Store file used when nothing else is configured.
pub const DEFAULT_STORE_PATH: &str = "sensor_data.jsonl";

/// Number of samples taken by a batch read.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Most samples a single batch read may request.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Number of most recent readings the statistics report covers.
pub const DEFAULT_STATS_WINDOW: usize = 10;

/// Temperature alarm threshold (in the current display unit).
pub const DEFAULT_TEMP_THRESHOLD: f64 = 100.0;

/// Humidity alarm threshold (%RH).
pub const DEFAULT_HUMIDITY_THRESHOLD: f64 = 100.0;

/// CSV header line written at the top of CSV store files.
pub const CSV_HEADER: &str = "id,timestamp,temperature,humidity";

/// Comment line prefix recording the unit of a store file's temperatures.
///
/// Followed by `celsius` or `fahrenheit`, e.g. `# unit=fahrenheit`.
pub const UNIT_MARKER: &str = "# unit=";
