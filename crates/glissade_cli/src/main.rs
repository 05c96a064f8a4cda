//! Glissade CLI
//!
//! Run scripted slider scenarios headlessly and inspect slider options.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glissade_slider::{SliderEventKind, SliderOptions};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod scenario;

use config::ScenarioConfig;
use scenario::{ScenarioReport, ScenarioRunner};

#[derive(Parser)]
#[command(name = "glissade")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Glissade slider CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file against a headless slider
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Pace frames in real time instead of running as fast as possible
        #[arg(long)]
        realtime: bool,
    },

    /// Validate a scenario file without running it
    Check {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },

    /// Print the default slider options
    Options {
        #[arg(short, long, value_enum, default_value_t = OptionsFormat::Toml)]
        format: OptionsFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OptionsFormat {
    Json,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            scenario,
            json,
            realtime,
        } => cmd_simulate(&scenario, json, realtime),

        Commands::Check { scenario } => cmd_check(&scenario),

        Commands::Options { format } => cmd_options(format),
    }
}

fn cmd_simulate(path: &Path, json: bool, realtime: bool) -> Result<()> {
    let config = ScenarioConfig::load(path)?;
    info!(
        "Running {} ({} steps, {} cells)",
        config.scenario.name,
        config.steps.len(),
        config.cells.build()?.len()
    );

    let report = ScenarioRunner::new(&config, realtime)?.run(&config.steps)?;

    if json {
        let output = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", output);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = ScenarioConfig::load(path)?;
    config.validate()?;

    info!("Checking scenario: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        info!("  {}", description);
    }
    info!("  viewport: {}px", config.scenario.viewport);
    info!("  cells: {}", config.cells.build()?.len());
    info!("  steps: {}", config.steps.len());
    info!("Scenario is valid");
    Ok(())
}

fn cmd_options(format: OptionsFormat) -> Result<()> {
    let options = SliderOptions::default();
    let output = match format {
        OptionsFormat::Json => serde_json::to_string_pretty(&options)?,
        OptionsFormat::Toml => {
            let table = toml::to_string_pretty(&options)?;
            format!("[slider]\n{}", table)
        }
    };
    println!("{}", output);
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    println!("Scenario: {}", report.name);
    println!("{}", "=".repeat(report.name.len() + 10));
    println!();

    for step in &report.steps {
        let selected = step
            .selected_index
            .map(|index| index.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}. {:<10} t={:>6}ms  selected={:<3} x={:>9.2}{}",
            step.step,
            step.action,
            step.time_ms,
            selected,
            step.x,
            if step.is_animating { "  (moving)" } else { "" }
        );
    }

    println!();
    println!("Events:");
    for record in &report.events {
        match &record.detail {
            Some(detail) => println!("  {:>6}ms  {} {}", record.time_ms, record.event, detail),
            None => println!("  {:>6}ms  {}", record.time_ms, record.event),
        }
    }

    println!();
    println!(
        "Finished after {} frames: selected {:?}, {} selects, {} settles",
        report.frames,
        report.final_state.selected_index,
        report.count(SliderEventKind::Select),
        report.count(SliderEventKind::Settle)
    );
}
