//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, FlightLogConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    log_path: String,
    pilot_name: String,
    simulator_mode: bool,
    discontinuity_threshold_s: f64,
    debounce_s: f64,
    relatedness_window_s: i64,
    place_count: usize,
    search_radius_m: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    log_path: config.log.path.display().to_string(),
                    pilot_name: config.identity.pilot_name.clone(),
                    simulator_mode: config.detector.simulator_mode,
                    discontinuity_threshold_s: config.detector.discontinuity_threshold_s,
                    debounce_s: config.detector.debounce_s,
                    relatedness_window_s: config.reconciler.relatedness_window_s,
                    place_count: config.places.entries.len(),
                    search_radius_m: config.places.search_radius_m,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &FlightLogConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.identity.pilot_name.is_empty() {
        warnings.push("identity.pilot_name is empty - flights will show no pilot".to_string());
    }
    if config.identity.vehicle_registration.is_empty() {
        warnings.push(
            "identity.vehicle_registration is empty - flights will show no plane information"
                .to_string(),
        );
    }
    if config.places.entries.is_empty() {
        warnings.push("No places configured - events will carry coordinates only".to_string());
    }
    if config.detector.simulator_mode {
        warnings.push("detector.simulator_mode is on - events are marked simulated".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Log: {}", summary.log_path);
            println!("  Pilot: {}", summary.pilot_name);
            println!("  Simulator mode: {}", summary.simulator_mode);
            println!(
                "  Detector: reset after {}s, debounce {}s",
                summary.discontinuity_threshold_s, summary.debounce_s
            );
            println!("  Relatedness window: {}s", summary.relatedness_window_s);
            println!(
                "  Places: {} (radius {} m)",
                summary.place_count, summary.search_radius_m
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
