//! # Tessera CLI
//!
//! Command-line host for the estimation engine. Reads an input snapshot from
//! JSON, validates or calculates it, and prints JSON for scripts and tools.
//!
//! ```text
//! estimate_cli calculate --input job.json [--settings catalog.json]
//! estimate_cli validate --input job.json
//! estimate_cli demo
//! ```
//!
//! Logs go to stderr. `-v` shows debug events, `-vv` trace, `-q` errors
//! only; `RUST_LOG` overrides both.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use estimate_core::model::{CoveringKind, EnvironmentClass, SurfaceKind};
use estimate_core::{
    EstimateError, EstimateResult, EstimateSession, EstimatorSettings, InputSnapshot, ResultBundle,
    StepValidationResult, WizardStep,
};

#[derive(Parser)]
#[command(
    name = "estimate_cli",
    version,
    about = "Tessera - surface covering material estimator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the material list for a snapshot
    Calculate {
        /// Snapshot JSON file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Settings JSON file (package catalogs and constants)
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },

    /// Report the validation of every applicable step
    Validate {
        /// Snapshot JSON file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Walk through a tile job interactively
    Demo,
}

/// Validation of one step, as printed by `validate`
#[derive(Serialize)]
struct StepReport {
    step: WizardStep,
    #[serde(flatten)]
    validation: StepValidationResult,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let outcome = match cli.command {
        Command::Calculate { input, settings } => run_calculate(&input, settings.as_deref()),
        Command::Validate { input } => run_validate(&input),
        Command::Demo => run_demo(),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn read_snapshot(path: &Path) -> EstimateResult<InputSnapshot> {
    let json = fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read snapshot", path.display().to_string(), e.to_string()))?;
    let snapshot = InputSnapshot::from_json(&json)?;
    debug!(path = %path.display(), kind = ?snapshot.covering_kind(), "snapshot loaded");
    Ok(snapshot)
}

fn session_for(snapshot: InputSnapshot, settings: EstimatorSettings) -> EstimateSession {
    let mut session = EstimateSession::with_settings(settings);
    *session.snapshot_mut() = snapshot;
    session
}

fn run_calculate(input: &Path, settings_path: Option<&Path>) -> EstimateResult<ExitCode> {
    let snapshot = read_snapshot(input)?;
    let settings = match settings_path {
        Some(path) => EstimatorSettings::load(path)?,
        None => EstimatorSettings::default(),
    };

    let mut session = session_for(snapshot, settings);
    if let Some(step) = session.first_invalid_step() {
        let validation = fail_reason(&session, step);
        warn!(step = ?step, reason = %validation, "snapshot incomplete, result may be partial");
    }

    let result = session.calculate();
    info!(lines = result.items.len(), "calculation finished");
    print_json(result)?;
    Ok(ExitCode::SUCCESS)
}

fn run_validate(input: &Path) -> EstimateResult<ExitCode> {
    let session = session_for(read_snapshot(input)?, EstimatorSettings::default());

    let reports: Vec<StepReport> = WizardStep::ALL
        .iter()
        .copied()
        .filter(|step| *step <= WizardStep::Review && session.is_step_visible(*step))
        .map(|step| StepReport {
            step,
            validation: estimate_core::validate(step, session.snapshot()),
        })
        .collect();
    print_json(&reports)?;

    Ok(if reports.iter().all(|r| r.validation.valid) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_demo() -> EstimateResult<ExitCode> {
    println!("Tessera - Tile Estimate Demo");
    println!("============================");
    println!();
    println!("Ceramic floor tile in a dry room.");
    println!();

    let mut session = EstimateSession::new();
    session.advance();
    session.snapshot_mut().set_covering_kind(CoveringKind::Tile);
    session.snapshot_mut().set_surface_kind(SurfaceKind::Ceramic);
    if !step_forward(&mut session) {
        return Ok(ExitCode::FAILURE);
    }

    session.snapshot_mut().set_environment(EnvironmentClass::Dry);
    if !step_forward(&mut session) {
        return Ok(ExitCode::FAILURE);
    }

    let area = prompt_f64("Enter area (m²) [20.0]: ", 20.0);
    session.snapshot_mut().set_total_area_m2(Some(area));
    if !step_forward(&mut session) {
        return Ok(ExitCode::FAILURE);
    }

    let length = prompt_f64("Enter tile length (cm) [60.0]: ", 60.0);
    let width = prompt_f64("Enter tile width (cm) [60.0]: ", 60.0);
    let joint = prompt_f64("Enter joint width (mm) [3.0]: ", 3.0);
    let waste = prompt_f64("Enter waste (%) [10.0]: ", 10.0);
    let snapshot = session.snapshot_mut();
    snapshot.set_piece_length_cm(Some(length));
    snapshot.set_piece_width_cm(Some(width));
    snapshot.set_joint_mm(Some(joint));
    snapshot.set_waste_percent(Some(waste));

    while session.step() < WizardStep::Review {
        if !step_forward(&mut session) {
            return Ok(ExitCode::FAILURE);
        }
    }

    let result = session.calculate().clone();
    print_result(&result);

    println!();
    println!("JSON Output:");
    print_json(&result)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

/// Advance the session, printing the validation message when blocked
fn step_forward(session: &mut EstimateSession) -> bool {
    if session.advance() {
        return true;
    }
    let validation = session.current_validation();
    eprintln!(
        "Cannot continue past {}: {}",
        session.step().display_name(),
        validation.reason.as_deref().unwrap_or("invalid input")
    );
    false
}

fn fail_reason(session: &EstimateSession, step: WizardStep) -> String {
    estimate_core::validate(step, session.snapshot())
        .reason
        .unwrap_or_default()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn print_result(result: &ResultBundle) {
    let header = &result.header;
    println!();
    println!("═══════════════════════════════════════");
    println!("  MATERIAL LIST");
    println!("═══════════════════════════════════════");
    println!();
    println!("  Area:     {:.2} m²", header.base_area_m2);
    println!("  Coverage: {:.2} m²", header.coverage_area_m2);
    println!("  Waste:    {:.0}%", header.waste_percent);
    if let Some(class) = result.adhesive_class {
        println!("  Adhesive: {}", class.code());
    }
    println!();
    for item in &result.items {
        println!(
            "  {:<22} {:>10} {:<3} {}",
            item.material.display_name(),
            item.quantity,
            item.unit.symbol(),
            item.purchase_note
        );
    }
    println!("═══════════════════════════════════════");
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}
