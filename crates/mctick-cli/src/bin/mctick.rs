//! Minimal script-driven driver: reads a text file of commands and runs
//! them against a [`TickScheduler`] over an in-memory backend.
//!
//! Grounded on `cmd/mcticks/main.go`'s command loop, simplified to a
//! single script file (no network/REPL surface — that backend is out of
//! scope here).
//!
//! Script grammar, one command per line (`#` starts a comment):
//! ```text
//! animate create s1 sphere 0 0 0 1 true 1
//! tick              # advance one logical tick
//! tick 10           # advance ten logical ticks
//! judge record out.gz 0 0 2 2 100 5 [sidecar.json]
//! judge compare out.gz 0 0 2 2 100 5
//! ```
//!
//! Exit codes: `0` everything ran and any `judge compare` matched, `1` a
//! `judge compare` found a mismatch, `2` any other failure (bad script,
//! I/O error, malformed command).

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use mctick_cli::commands;
use mctick_engine::config::SampleConfig;
use mctick_engine::TickScheduler;
use mctick_judge::{compare_file, record_to_file, JudgeError};
use mctick_test_utils::FakeBlockStore;

#[derive(Debug)]
enum DriverError {
    Usage(String),
    Command(commands::CommandError),
    Judge(JudgeError),
    Io(std::io::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}"),
            Self::Command(e) => write!(f, "{e}"),
            Self::Judge(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl From<commands::CommandError> for DriverError {
    fn from(e: commands::CommandError) -> Self {
        Self::Command(e)
    }
}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Outcome of running a script to completion.
enum Outcome {
    Ok,
    CompareMismatch,
}

fn run_script(path: &PathBuf) -> Result<Outcome, DriverError> {
    let text = std::fs::read_to_string(path)?;
    let scheduler = TickScheduler::new(FakeBlockStore::new());
    let mut outcome = Outcome::Ok;

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let verb = tokens[0];
        let rest = &tokens[1..];

        let result = dispatch(&scheduler, verb, rest);
        match result {
            Ok(Some(false)) => outcome = Outcome::CompareMismatch,
            Ok(_) => {}
            Err(e) => {
                return Err(DriverError::Usage(format!("line {}: {e}", lineno + 1)));
            }
        }
    }
    Ok(outcome)
}

/// Runs one script line. `Ok(Some(false))` means a `judge compare` found a
/// mismatch; everything else that succeeds returns `Ok(None)`.
fn dispatch(
    scheduler: &TickScheduler<FakeBlockStore>,
    verb: &str,
    rest: &[&str],
) -> Result<Option<bool>, DriverError> {
    match verb {
        "animate" => {
            scheduler.with_manager(|mgr, store| commands::execute(rest, mgr, store))?;
            Ok(None)
        }
        "tick" => {
            let count = match rest {
                [] => 1,
                [n] => n
                    .parse::<u64>()
                    .map_err(|_| DriverError::Usage(format!("invalid tick count: {n:?}")))?,
                _ => return Err(DriverError::Usage("usage: tick [count]".into())),
            };
            for _ in 0..count {
                scheduler.tick();
            }
            Ok(None)
        }
        "judge" => judge(scheduler, rest),
        other => Err(DriverError::Usage(format!("unknown command: {other}"))),
    }
}

fn judge(
    scheduler: &TickScheduler<FakeBlockStore>,
    rest: &[&str],
) -> Result<Option<bool>, DriverError> {
    let sub = rest
        .first()
        .ok_or_else(|| DriverError::Usage("usage: judge <record|compare> ...".into()))?;
    let args = &rest[1..];
    match *sub {
        "record" => {
            if args.len() != 7 && args.len() != 8 {
                return Err(DriverError::Usage(
                    "usage: judge record <path> <x1> <z1> <x2> <z2> <ticks> <sample_interval> [sidecar]".into(),
                ));
            }
            let path = PathBuf::from(args[0]);
            let config = parse_sample_config(&args[1..7])?;
            let sidecar = args.get(7).map(PathBuf::from);
            record_to_file(scheduler, config, &path, sidecar.as_deref())
                .map_err(DriverError::Judge)?;
            Ok(None)
        }
        "compare" => {
            if args.len() != 7 {
                return Err(DriverError::Usage(
                    "usage: judge compare <path> <x1> <z1> <x2> <z2> <ticks> <sample_interval>".into(),
                ));
            }
            let path = PathBuf::from(args[0]);
            let config = parse_sample_config(&args[1..7])?;
            match compare_file(scheduler, config, &path) {
                Ok(_) => Ok(Some(true)),
                Err(JudgeError::ChunkMismatch { .. }) => Ok(Some(false)),
                Err(e) => Err(DriverError::Judge(e)),
            }
        }
        other => Err(DriverError::Usage(format!("unknown judge subcommand: {other}"))),
    }
}

fn parse_sample_config(args: &[&str]) -> Result<SampleConfig, DriverError> {
    let field = |name: &str, token: &str| -> Result<i32, DriverError> {
        token
            .parse::<i32>()
            .map_err(|_| DriverError::Usage(format!("invalid {name}: {token:?}")))
    };
    let x1 = field("x1", args[0])?;
    let z1 = field("z1", args[1])?;
    let x2 = field("x2", args[2])?;
    let z2 = field("z2", args[3])?;
    let ticks = args[4]
        .parse::<u64>()
        .map_err(|_| DriverError::Usage(format!("invalid ticks: {:?}", args[4])))?;
    let sample_interval = args[5]
        .parse::<u64>()
        .map_err(|_| DriverError::Usage(format!("invalid sample_interval: {:?}", args[5])))?;
    Ok(SampleConfig {
        x1,
        z1,
        x2,
        z2,
        ticks,
        sample_interval,
    })
}

fn main() -> ExitCode {
    let mut args = env::args();
    let _program = args.next();
    let Some(script_path) = args.next() else {
        eprintln!("usage: mctick <script-file>");
        return ExitCode::from(2);
    };

    match run_script(&PathBuf::from(script_path)) {
        Ok(Outcome::Ok) => ExitCode::from(0),
        Ok(Outcome::CompareMismatch) => ExitCode::from(1),
        Err(e) => {
            eprintln!("mctick: {e}");
            ExitCode::from(2)
        }
    }
}
