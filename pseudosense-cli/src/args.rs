//! Command-line arguments
//!
//! Flags override the configuration file field by field; anything not given
//! keeps its configured (or default) value.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pseudosense_core::{MonitorConfig, StoreFormat, TemperatureUnit};

use crate::session::Command;

pub const USAGE: &str = "\
Usage: pseudosense [OPTIONS] [COMMAND]

Commands (omit for the interactive shell):
  read [N]     Take one reading, or N readings
  stats        Statistics over the most recent readings
  clear        Delete every stored reading
  plot         Chart temperature and humidity
  unit         Convert the store to the other temperature unit
  dump         List every stored reading

Options:
  --config <FILE>            JSON configuration file
  --store <PATH>             Store file (default sensor_data.jsonl)
  --format <jsonl|csv>       Store format (default: from extension)
  --memory                   Keep readings in memory only
  --seed <N>                 Fixed generator seed
  --unit <c|f>               Unit of a store that records none
  --temp-alarm <VALUE>       Temperature alarm threshold
  --hum-alarm <VALUE>        Humidity alarm threshold
  --batch-interval-ms <MS>   Pause between batch samples
  -v, --verbose              More log output (repeatable)
  -q, --quiet                Errors only
  -h, --help                 Show this help
";

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub format: Option<StoreFormat>,
    pub memory: bool,
    pub seed: Option<u64>,
    pub unit: Option<TemperatureUnit>,
    pub temp_alarm: Option<String>,
    pub hum_alarm: Option<String>,
    pub batch_interval_ms: Option<u64>,
    /// Negative for quiet, positive per `-v`
    pub verbosity: i8,
    pub help: bool,
    pub command: Option<Command>,
}

impl CliArgs {
    /// Parse arguments (without the program name)
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut cli = CliArgs::default();
        let mut positional: Vec<&str> = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "--config" => cli.config = Some(PathBuf::from(value(args, &mut i, arg)?)),
                "--store" => cli.store = Some(PathBuf::from(value(args, &mut i, arg)?)),
                "--format" => {
                    let name = value(args, &mut i, arg)?;
                    cli.format = Some(
                        StoreFormat::from_name(name)
                            .ok_or_else(|| format!("Unknown store format: {}", name))?,
                    );
                }
                "--memory" => cli.memory = true,
                "--seed" => {
                    cli.seed = Some(
                        value(args, &mut i, arg)?
                            .parse()
                            .map_err(|_| "Invalid seed value")?,
                    );
                }
                "--unit" => {
                    let unit = value(args, &mut i, arg)?;
                    cli.unit = Some(unit.parse().map_err(|e| format!("{}", e))?);
                }
                "--temp-alarm" => cli.temp_alarm = Some(value(args, &mut i, arg)?.to_string()),
                "--hum-alarm" => cli.hum_alarm = Some(value(args, &mut i, arg)?.to_string()),
                "--batch-interval-ms" => {
                    cli.batch_interval_ms = Some(
                        value(args, &mut i, arg)?
                            .parse()
                            .map_err(|_| "Invalid batch-interval-ms value")?,
                    );
                }
                "-v" | "--verbose" => cli.verbosity = cli.verbosity.max(0).saturating_add(1),
                "-vv" => cli.verbosity = cli.verbosity.max(0).saturating_add(2),
                "-q" | "--quiet" => cli.verbosity = -1,
                "-h" | "--help" => cli.help = true,
                flag if flag.starts_with('-') => return Err(format!("Unknown option: {}", flag)),
                word => positional.push(word),
            }
            i += 1;
        }

        cli.command = parse_command(&positional)?;
        Ok(cli)
    }

    /// Load the configuration file (if any) and apply flag overrides
    pub fn resolve_config(&self) -> Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::from_json_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => MonitorConfig::default(),
        };

        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(format) = self.format {
            config.store_format = Some(format);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(text) = &self.temp_alarm {
            config.temperature_threshold = text.clone();
        }
        if let Some(text) = &self.hum_alarm {
            config.humidity_threshold = text.clone();
        }
        if let Some(ms) = self.batch_interval_ms {
            config.batch_interval_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn parse_command(words: &[&str]) -> Result<Option<Command>, String> {
    let command = match words {
        [] => return Ok(None),
        ["read"] => Command::Read(1),
        ["read", n] => Command::Read(n.parse().map_err(|_| format!("Invalid count: {}", n))?),
        ["stats"] => Command::Stats,
        ["clear"] => Command::Clear,
        ["plot"] => Command::Plot,
        ["unit"] => Command::ToggleUnit,
        ["dump"] => Command::Dump,
        [other, ..] => return Err(format!("Unknown command: {}", other)),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn no_arguments_means_shell() {
        let cli = CliArgs::parse(&[]).unwrap();
        assert_eq!(cli, CliArgs::default());
        assert_eq!(cli.command, None);
    }

    #[test]
    fn flags_and_subcommand() {
        let cli = CliArgs::parse(&args(
            "--store data.csv --seed 7 --unit f -v --temp-alarm 90 read 5",
        ))
        .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.unit, Some(TemperatureUnit::Fahrenheit));
        assert_eq!(cli.verbosity, 1);
        assert_eq!(cli.temp_alarm.as_deref(), Some("90"));
        assert_eq!(cli.command, Some(Command::Read(5)));
    }

    #[test]
    fn parse_errors() {
        assert!(CliArgs::parse(&args("--seed")).is_err());
        assert!(CliArgs::parse(&args("--seed abc")).is_err());
        assert!(CliArgs::parse(&args("--format xml")).is_err());
        assert!(CliArgs::parse(&args("--unit kelvin")).is_err());
        assert!(CliArgs::parse(&args("--bogus")).is_err());
        assert!(CliArgs::parse(&args("launch")).is_err());
        assert!(CliArgs::parse(&args("read 3 4")).is_err());
    }

    #[test]
    fn overrides_apply_to_config() {
        let cli = CliArgs::parse(&args(
            "--store x.csv --format jsonl --hum-alarm 70 --batch-interval-ms 0",
        ))
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.store_path, PathBuf::from("x.csv"));
        assert_eq!(config.resolved_format(), StoreFormat::JsonLines);
        assert_eq!(config.humidity_threshold, "70");
        assert_eq!(config.temperature_threshold, "100");
        assert_eq!(config.batch_interval_ms, 0);
    }

    #[test]
    fn config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pseudosense.json");
        std::fs::write(&path, r#"{"batch_size": 3, "seed": 1, "unit": "fahrenheit"}"#).unwrap();

        let cli = CliArgs::parse(&[
            "--config".to_string(),
            path.display().to_string(),
            "--seed".to_string(),
            "2".to_string(),
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn missing_config_file_reported() {
        let cli = CliArgs::parse(&args("--config /no/such/file.json")).unwrap();
        let err = cli.resolve_config().unwrap_err();
        assert!(format!("{:#}", err).contains("loading configuration"));
    }
}
