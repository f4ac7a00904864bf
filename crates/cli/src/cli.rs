//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// flightlog - takeoff/landing logbook
#[derive(Parser, Debug)]
#[command(
    name = "flightlog",
    author,
    version,
    about = "Automatic takeoff/landing logbook",
    long_about = "Detects takeoffs and landings in a telemetry stream, appends them to a \n\
                  flight log, and rebuilds the logbook of flights from that log."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FLIGHTLOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "FLIGHTLOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed recorded telemetry through the detector and log the events
    Replay(ReplayArgs),

    /// Print the logbook rebuilt from the flight log
    List(ListArgs),

    /// Validate configuration file
    Validate(ValidateArgs),
}

/// Arguments for the `replay` command
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// JSON-lines file of telemetry samples
    pub input: PathBuf,

    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "FLIGHTLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the flight log path from configuration
    #[arg(long, env = "FLIGHTLOG_LOG")]
    pub log: Option<PathBuf>,

    /// Playback speed multiplier (0 = as fast as possible)
    #[arg(long, default_value = "0")]
    pub speed: f64,

    /// Detect events but only report them, without touching the flight log
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run statistics as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "FLIGHTLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the flight log path from configuration
    #[arg(long, env = "FLIGHTLOG_LOG")]
    pub log: Option<PathBuf>,

    /// Show at most this many flights, most recent first
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "flightlog.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from([
            "flightlog",
            "-v",
            "replay",
            "samples.jsonl",
            "--speed",
            "10",
            "--dry-run",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.input, PathBuf::from("samples.jsonl"));
                assert_eq!(args.speed, 10.0);
                assert!(args.dry_run);
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::parse_from(["flightlog", "list", "--log", "f.log", "-n", "3", "--json"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.log, Some(PathBuf::from("f.log")));
                assert_eq!(args.limit, Some(3));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["flightlog", "-q", "-v", "list"]).is_err());
    }
}
