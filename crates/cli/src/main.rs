//! pwconfig CLI - Main Entry Point
//!
//! Builds the browser test run configuration from the environment and
//! lets you inspect, validate and export it for the test runner.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

use commands::{check, export, init, inspect, Context};
use pwconfig_common::DEFAULT_OVERRIDES_FILE;

/// pwconfig - Typed run configuration for browser end-to-end tests
#[derive(Parser)]
#[command(name = "pwconfig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Override file layered over the built configuration
    #[arg(long, env = "PWCONFIG_FILE", default_value = DEFAULT_OVERRIDES_FILE, global = true)]
    config: PathBuf,

    /// JSON file with connect options for the remote-browser project
    #[arg(long, env = "PWCONFIG_CONNECT_OPTIONS", global = true)]
    connect_options: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective run configuration
    Show,

    /// List projects with their effective browser settings
    Projects,

    /// Show one project's merged options
    Project(inspect::ProjectArgs),

    /// List device emulation presets, or show one by name
    Devices(inspect::DevicesArgs),

    /// Write a starter override file at the --config path
    Init(init::InitArgs),

    /// Validate the configuration and report the CI policy
    Check,

    /// Write the runner config module
    Export(export::ExportArgs),

    /// Export, then run the suite through the test runner
    Test(export::TestArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // These don't need the built configuration
    match cli.command {
        Commands::Devices(args) => return inspect::execute_devices(args, cli.format),
        Commands::Init(args) => return init::execute(args, &cli.config),
        _ => {}
    }

    let ctx = match Context::load(&cli.config, cli.connect_options.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Show => inspect::execute_show(&ctx, cli.format)?,
        Commands::Projects => inspect::execute_projects(&ctx, cli.format)?,
        Commands::Project(args) => inspect::execute_project(args, &ctx, cli.format)?,
        Commands::Devices(_) | Commands::Init(_) => {}
        Commands::Check => {
            let base_dir = std::env::current_dir()?;
            if let Err(e) = check::execute(&ctx, &base_dir) {
                output::print_error(&format!("{:#}", e));
                std::process::exit(1);
            }
        }
        Commands::Export(args) => export::execute_export(args, &ctx)?,
        Commands::Test(args) => {
            let code = export::execute_test(args, &ctx)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
