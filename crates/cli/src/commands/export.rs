//! Export Commands
//!
//! Write the configuration as a runner config module, and hand it to the
//! runner directly.

use anyhow::{bail, Context as _, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use pwconfig_common::{render, DEFAULT_MODULE_FILE};

use super::Context;
use crate::output::print_success;

#[derive(Args)]
pub struct ExportArgs {
    /// Where to write the config module
    #[arg(short, long, default_value = DEFAULT_MODULE_FILE)]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct TestArgs {
    /// Run only these projects
    #[arg(short, long)]
    pub project: Vec<String>,

    /// Where to write the config module before launching
    #[arg(short, long, default_value = DEFAULT_MODULE_FILE)]
    pub out: PathBuf,

    /// Extra arguments passed through to the runner
    #[arg(last = true)]
    pub runner_args: Vec<String>,
}

pub fn execute_export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let path = render::write_config_module(&ctx.config, &args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    print_success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Export, then run the tests through the runner's own CLI
///
/// Returns the runner's exit code.
pub fn execute_test(args: TestArgs, ctx: &Context) -> Result<i32> {
    for name in &args.project {
        ctx.config.project(name)?;
    }

    check_runner_installed()?;

    let path = render::write_config_module(&ctx.config, &args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    let argv = runner_argv(&path, &args.project, &args.runner_args);
    debug!(?argv, "launching runner");

    let status = Command::new("npx")
        .args(&argv)
        .status()
        .context("Failed to launch the test runner")?;

    Ok(status.code().unwrap_or(1))
}

/// Arguments for `npx` that run the suite against `config`
fn runner_argv(config: &Path, projects: &[String], extra: &[String]) -> Vec<String> {
    let mut argv = vec![
        "playwright".to_string(),
        "test".to_string(),
        "--config".to_string(),
        config.display().to_string(),
    ];
    for project in projects {
        argv.push(format!("--project={}", project));
    }
    argv.extend(extra.iter().cloned());
    argv
}

fn check_runner_installed() -> Result<()> {
    let status = Command::new("npx")
        .args(["playwright", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => bail!("Playwright not found. Install with: npm i -D @playwright/test && npx playwright install"),
    }
}
