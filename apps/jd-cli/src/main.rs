use clap::{Parser, Subcommand};
use jd_config::ConfigError;
use jd_core::JointSet;
use jd_ident::{Dataset, EffectModel, IdentError, stack_measured, stack_regressor, stack_torque};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jd-cli")]
#[command(about = "Joint dynamics effects - build and evaluate identification models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every configured effect of a robot and list its parameters
    Check {
        /// Path to the parameter file (YAML or JSON)
        config_path: PathBuf,
        /// Robot name (top-level key of the parameter file)
        robot: String,
    },
    /// Evaluate the model on a file of samples
    Eval {
        /// Path to the parameter file (YAML or JSON)
        config_path: PathBuf,
        /// Robot name (top-level key of the parameter file)
        robot: String,
        /// Samples file: a list of {q, dq, ddq, tau?} records
        samples_path: PathBuf,
        /// Also build the stacked regressor
        #[arg(long)]
        regressor: bool,
        /// Write the stacked problem as JSON (implies --regressor)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ident(#[from] IdentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

/// Stacked identification problem as written by `eval --output`.
#[derive(Serialize)]
struct StackedExport<'a> {
    robot: &'a str,
    joints: &'a JointSet,
    labels: Vec<String>,
    nominal: Vec<f64>,
    /// Row-major (K·N) × P
    regressor: Vec<Vec<f64>>,
    torque: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    measured: Option<Vec<f64>>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config_path, robot } => cmd_check(&config_path, &robot),
        Commands::Eval {
            config_path,
            robot,
            samples_path,
            regressor,
            output,
        } => cmd_eval(
            &config_path,
            &robot,
            &samples_path,
            regressor || output.is_some(),
            output.as_deref(),
        ),
    }
}

fn load_model(config_path: &Path, robot: &str) -> CliResult<EffectModel> {
    info!(path = %config_path.display(), robot, "loading parameters");
    let params = jd_config::load(config_path)?;
    Ok(EffectModel::from_config(robot, &params)?)
}

fn cmd_check(config_path: &Path, robot: &str) -> CliResult<()> {
    let model = load_model(config_path, robot)?;

    println!("Robot '{}': {} joints", robot, model.joints().len());
    for (i, joint) in model.joints().iter().enumerate() {
        println!("  [{}] {}", i, joint);
    }

    if model.components().is_empty() {
        println!("No effects configured");
        return Ok(());
    }

    println!("Effects ({} parameters):", model.parameter_count());
    for (component, offset) in model.components().iter().zip(model.column_offsets()) {
        println!(
            "  {} (joint {}, columns {}..{})",
            component.name(),
            component.binding().index(),
            offset,
            offset + component.parameter_count()
        );
    }

    println!("Nominal parameters:");
    for (label, value) in model.parameter_labels().iter().zip(model.parameters().iter()) {
        println!("  {:<28} {:>12.6}", label, value);
    }
    println!("✓ Model is valid");
    Ok(())
}

fn cmd_eval(
    config_path: &Path,
    robot: &str,
    samples_path: &Path,
    with_regressor: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let model = load_model(config_path, robot)?;
    let data = Dataset::load(samples_path, model.joints().len())?;
    println!("Evaluating {} samples for robot '{}'", data.len(), robot);

    for (k, sample) in data.samples().iter().enumerate() {
        let torque = model.compute_torque(sample.as_joint_sample());
        let values: Vec<String> = torque.iter().map(|v| format!("{:.6}", v)).collect();
        match &sample.tau {
            Some(measured) => {
                let error = (measured - &torque).norm();
                println!("  {:>5}: tau = [{}]  |error| = {:.6}", k, values.join(", "), error);
            }
            None => println!("  {:>5}: tau = [{}]", k, values.join(", ")),
        }
    }

    if !with_regressor {
        return Ok(());
    }

    let phi = stack_regressor(&model, &data)?;
    let torque = stack_torque(&model, &data)?;
    println!("Stacked regressor: {} x {}", phi.nrows(), phi.ncols());

    let measured = stack_measured(&data).ok();
    if let Some(measured) = &measured {
        let residual = measured - &phi * model.parameters();
        let rms = residual.norm() / (residual.len() as f64).sqrt();
        println!("  RMS error at nominal parameters: {:.6}", rms);
    }

    if let Some(path) = output {
        let export = StackedExport {
            robot,
            joints: model.joints(),
            labels: model.parameter_labels(),
            nominal: model.parameters().iter().copied().collect(),
            regressor: phi
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
            torque: torque.iter().copied().collect(),
            measured: measured.map(|m| m.iter().copied().collect()),
        };
        std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
        println!("✓ Wrote {}", path.display());
    }

    Ok(())
}
