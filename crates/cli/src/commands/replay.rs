//! `replay` command implementation.

use anyhow::{Context, Result};
use contracts::{EventSink, TelemetrySample};
use detector::{FlightLogger, PlaceIndex};
use flight_log::{FlightLogWriter, LogSink};
use observability::DetectorStats;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::{load_config, log_path};
use crate::cli::ReplayArgs;
use crate::error::CliError;

/// Longest single pause when pacing; longer gaps are detector resets anyway
const MAX_PACING_WAIT: Duration = Duration::from_secs(10);

/// Outcome of one replay run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub input: String,
    /// `None` for dry runs
    pub log: Option<String>,
    #[serde(flatten)]
    pub stats: DetectorStats,
    /// Input lines that were not valid samples
    pub invalid_lines: u64,
    pub interrupted: bool,
    pub elapsed_s: f64,
}

impl ReplayReport {
    fn print_summary(&self) {
        println!("\n=== Replay Summary ===\n");
        println!("  Input:    {}", self.input);
        println!(
            "  Log:      {}",
            self.log.as_deref().unwrap_or("(dry run, nothing written)")
        );
        println!("  Elapsed:  {:.2}s", self.elapsed_s);
        println!("\n  Samples:  {}", self.stats.samples);
        println!("    processed: {}", self.stats.processed);
        println!("    debounced: {}", self.stats.debounced);
        println!("    resets:    {}", self.stats.resets);
        println!("    discarded: {}", self.stats.discarded);
        if self.invalid_lines > 0 {
            println!("    invalid:   {}", self.invalid_lines);
        }
        println!("\n  Takeoffs: {}", self.stats.starts);
        println!("  Landings: {}", self.stats.landings);
        if self.stats.write_failures > 0 {
            println!("  ⚠ Events not written: {}", self.stats.write_failures);
        }
        if self.interrupted {
            println!("\n  (interrupted)");
        }
        println!();
    }
}

/// Execute the `replay` command
pub async fn run_replay(args: &ReplayArgs) -> Result<()> {
    let report = replay(args).await?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize replay report")?;
        println!("{}", json);
    } else {
        report.print_summary();
    }

    Ok(())
}

async fn replay(args: &ReplayArgs) -> Result<ReplayReport> {
    let config = load_config(args.config.as_deref())?;
    let log = log_path(&config, args.log.as_ref());

    let sink: Box<dyn EventSink> = if args.dry_run {
        info!("Dry run, detected events are only logged");
        Box::new(LogSink::new("dry_run"))
    } else {
        Box::new(FlightLogWriter::new(&log))
    };

    let mut logger = FlightLogger::new(
        &config.detector,
        sink,
        config.identity.bounded(),
        PlaceIndex::from_config(&config.places),
    )
    .with_search_radius(config.places.search_radius_m);

    let file = tokio::fs::File::open(&args.input)
        .await
        .map_err(|e| CliError::input(args.input.display().to_string(), e.to_string()))?;
    let mut lines = BufReader::new(file).lines();

    let mut report = ReplayReport {
        input: args.input.display().to_string(),
        log: (!args.dry_run).then(|| log.display().to_string()),
        ..Default::default()
    };

    info!(
        input = %report.input,
        speed = args.speed,
        dry_run = args.dry_run,
        "Starting replay"
    );

    let started = Instant::now();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut line_no = 0usize;
    let mut previous_time: Option<f64> = None;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read telemetry input")?,
            _ = &mut shutdown => {
                report.interrupted = true;
                break;
            }
        };
        let Some(line) = line else { break };
        line_no += 1;

        let sample = match parse_sample(&line) {
            None => continue,
            Some(Ok(sample)) => sample,
            Some(Err(e)) => {
                warn!(line = line_no, error = %e, "Skipping invalid sample");
                report.invalid_lines += 1;
                continue;
            }
        };

        if let Some(wait) = pacing_delay(previous_time, sample.time, args.speed) {
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = &mut shutdown => {
                    report.interrupted = true;
                    break;
                }
            }
        }
        previous_time = Some(sample.time);

        let tick = logger.tick(&sample);
        report.stats.record_outcome(tick.outcome);
        if let Some(record) = &tick.record {
            report.stats.record_event(record.kind, tick.written);
        }
        debug!(line = line_no, outcome = tick.outcome.as_str(), "Sample processed");
    }

    if report.interrupted {
        warn!("Received shutdown signal, stopping replay");
    }

    report.elapsed_s = started.elapsed().as_secs_f64();
    info!(
        samples = report.stats.samples,
        events = report.stats.events(),
        write_failures = report.stats.write_failures,
        "Replay finished"
    );

    Ok(report)
}

/// `None` for blank lines
fn parse_sample(line: &str) -> Option<serde_json::Result<TelemetrySample>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// How long to wait before feeding a sample at `time`
fn pacing_delay(previous: Option<f64>, time: f64, speed: f64) -> Option<Duration> {
    if !(speed.is_finite() && speed > 0.0) {
        return None;
    }
    let delta = (time - previous?) / speed;
    if delta.is_nan() || delta <= 0.0 {
        return None;
    }
    // gaps too large for a Duration still only wait the maximum
    Some(Duration::try_from_secs_f64(delta).map_or(MAX_PACING_WAIT, |d| d.min(MAX_PACING_WAIT)))
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
