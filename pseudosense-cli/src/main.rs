//! PseudoSense command-line front end
//!
//! ```bash
//! pseudosense                         # interactive shell on sensor_data.jsonl
//! pseudosense --store log.csv read 10 # ten readings, one second apart
//! pseudosense --memory --seed 1 plot  # throwaway session
//! ```

mod args;
mod logger;
mod render;
mod session;
mod shell;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, warn};
use pseudosense_core::{
    store::{FileStore, MemoryStore, ReadingStore},
    time::{SystemTime, ThreadPacer},
    Monitor, MonitorConfig, WaveformGenerator,
};

use args::{CliArgs, USAGE};
use session::Session;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let cli = match CliArgs::parse(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'pseudosense --help'");
            return ExitCode::from(2);
        }
    };

    if cli.help {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    if let Err(e) = logger::init(logger::level_for(cli.verbosity)) {
        eprintln!("Warning: logger not installed: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs) -> Result<()> {
    let config = cli.resolve_config()?;
    debug!("Effective configuration: {:?}", config);

    if cli.memory {
        return run_with_store(MemoryStore::new(), &config, cli);
    }

    let store = FileStore::open_with_format(&config.store_path, config.resolved_format())
        .with_context(|| format!("opening store {}", config.store_path.display()))?;
    if store.stats().parse_errors > 0 {
        eprintln!(
            "Warning: skipped {} unreadable rows in {}",
            store.stats().parse_errors,
            config.store_path.display()
        );
    }
    run_with_store(store, &config, cli)
}

fn run_with_store<S: ReadingStore>(store: S, config: &MonitorConfig, cli: &CliArgs) -> Result<()> {
    if let (Some(recorded), Some(requested)) = (store.unit(), cli.unit) {
        if recorded != requested {
            warn!(
                "Store is recorded in {}; ignoring --unit {} (use the unit command to convert)",
                recorded, requested
            );
        }
    }

    let generator = match config.seed {
        Some(seed) => WaveformGenerator::seeded(seed),
        None => WaveformGenerator::from_entropy(),
    }
    .with_jitter(config.jitter);

    let monitor = Monitor::new(generator, store, SystemTime)
        .with_unit(config.unit)
        .with_stats_window(config.stats_window);
    let mut session = Session::new(monitor, ThreadPacer, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(command) => session.execute(command, &mut out),
        None => {
            let stdin = io::stdin();
            shell::run(&mut session, stdin.lock(), &mut out)?;
            Ok(())
        }
    }
}
