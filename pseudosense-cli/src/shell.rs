//! Interactive command loop

use std::io::{self, BufRead, Write};

use pseudosense_core::{store::ReadingStore, time::Pacer, time::TimeSource};
use rand::Rng;

use crate::session::{AlarmField, Command, Session};

pub const HELP: &str = "\
Commands:
  read              Take one reading
  read <N>          Take N readings, pausing between them
  batch             Take the configured batch of readings
  stats             Min/max/average over the most recent readings
  clear             Delete every stored reading
  plot              Chart temperature and humidity
  unit              Switch between Celsius and Fahrenheit
  alarm             Show alarm thresholds
  alarm temp <v>    Set the temperature threshold
  alarm hum <v>     Set the humidity threshold
  dump              List every stored reading
  help              Show this help
  quit | exit       Leave the shell
";

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Parse one non-empty line
pub fn parse_line(line: &str) -> Result<Input, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let command = match parts.as_slice() {
        [] => return Err("Empty command".to_string()),
        ["quit"] | ["exit"] => return Ok(Input::Quit),
        ["read"] => Command::Read(1),
        ["read", n] => Command::Read(
            n.parse::<usize>()
                .map_err(|_| format!("Invalid count: {}", n))?,
        ),
        ["batch"] => Command::Batch,
        ["stats"] => Command::Stats,
        ["clear"] => Command::Clear,
        ["plot"] => Command::Plot,
        ["unit"] => Command::ToggleUnit,
        ["dump"] => Command::Dump,
        ["help"] => Command::Help,
        ["alarm"] => Command::ShowAlarm,
        ["alarm", field, rest @ ..] if !rest.is_empty() => {
            let field = match *field {
                "temp" | "temperature" => AlarmField::Temperature,
                "hum" | "humidity" => AlarmField::Humidity,
                other => return Err(format!("Unknown alarm field: {}", other)),
            };
            Command::SetAlarm(field, rest.join(" "))
        }
        ["alarm", ..] => return Err("Usage: alarm [temp|hum <value>]".to_string()),
        [other, ..] => return Err(format!("Unknown command: {} (try 'help')", other)),
    };
    Ok(Input::Command(command))
}

/// Read commands from `input` until `quit` or end of input
///
/// Command failures are reported on `out` and the loop carries on.
pub fn run<S, R, C, P, I, W>(
    session: &mut Session<S, R, C, P>,
    mut input: I,
    out: &mut W,
) -> io::Result<()>
where
    S: ReadingStore,
    R: Rng,
    C: TimeSource,
    P: Pacer,
    I: BufRead,
    W: Write,
{
    writeln!(out, "PseudoSense shell ({} store rows)", session.monitor().store().len())?;
    writeln!(out, "Type 'help' for commands, 'exit' to quit\n")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_line(trimmed) {
            Ok(Input::Quit) => break,
            Ok(Input::Command(command)) => {
                if let Err(e) = session.execute(&command, out) {
                    writeln!(out, "Error: {:#}", e)?;
                }
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}
