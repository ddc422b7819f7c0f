//! coinscale CLI: measure distance, tilt and object size against a coin.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use coinscale::app::{FrameReport, ImageSequence, MetrologyApp};
use coinscale::pipeline::edge_inset;
use coinscale::scene::INSET_SCALE;
use coinscale::{AppError, MetrologyConfig};
use log::{info, LevelFilter};

#[derive(Parser)]
#[command(name = "coinscale")]
#[command(about = "Measure distance, tilt and object size against a reference coin")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure every frame of the given images or directories.
    Measure {
        /// Image files or directories of images, processed in order.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// JSON config; missing keys keep their defaults.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save a quarter-scale edge-mask PNG per frame into this directory.
        #[arg(long)]
        inset_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = LogLevel::Info)]
        log_level: LogLevel,
    },

    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Measure {
            inputs,
            config,
            output,
            inset_dir,
            log_level,
        } => {
            coinscale::init_logging(log_level.into());
            run_measure(&inputs, config.as_deref(), output.as_deref(), inset_dir.as_deref())
        }
        Commands::DefaultConfig => run_default_config(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run_default_config() -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(&MetrologyConfig::default())?);
    Ok(())
}

fn run_measure(
    inputs: &[PathBuf],
    config: Option<&Path>,
    output: Option<&Path>,
    inset_dir: Option<&Path>,
) -> Result<(), AppError> {
    let config = match config {
        Some(path) => MetrologyConfig::from_json_file(path)?,
        None => MetrologyConfig::default(),
    };
    if let Some(dir) = inset_dir {
        fs::create_dir_all(dir).map_err(|source| AppError::Output {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let source = ImageSequence::from_inputs(inputs)?;
    info!("measuring {} frames", source.len());
    let mut app = MetrologyApp::new(source, config);

    let mut reports: Vec<FrameReport> = Vec::new();
    let outcome = app.run(|report, mask| {
        if let Some(dir) = inset_dir {
            let path = dir.join(format!("edges_{:04}.png", report.index));
            edge_inset(mask, INSET_SCALE)
                .save(&path)
                .map_err(|source| AppError::Inset { path, source })?;
        }
        reports.push(report);
        Ok(())
    });

    // frames measured before a fatal read error are still reported
    write_report(&reports, output)?;
    outcome.map(|_| ())
}

fn write_report(reports: &[FrameReport], output: Option<&Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(reports)?;
    match output {
        Some(path) => {
            fs::write(path, json).map_err(|source| AppError::Output {
                path: path.to_path_buf(),
                source,
            })?;
            info!("report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
