//! Check Command
//!
//! Validates the effective configuration and reports the CI policy in
//! force, plus anything that will likely trip the runner.

use anyhow::Result;
use std::path::Path;

use pwconfig_common::builder::PROJECT_REMOTE;
use pwconfig_common::{RunConfig, CI_ENV_VAR};

use super::Context;
use crate::output::{print_info, print_success, print_warning};

pub fn execute(ctx: &Context, base_dir: &Path) -> Result<()> {
    ctx.config.validate()?;

    if ctx.ci {
        print_info(&format!(
            "{} is set: forbidOnly={}, retries={}, workers={}",
            CI_ENV_VAR, ctx.config.forbid_only, ctx.config.retries, ctx.config.workers
        ));
    } else {
        print_info(&format!(
            "{} not set: local defaults (retries={}, workers={})",
            CI_ENV_VAR, ctx.config.retries, ctx.config.workers
        ));
    }

    if !ctx.overrides.is_empty() {
        print_info("Override file applied");
    }

    let warnings = warnings(&ctx.config, base_dir);
    for warning in &warnings {
        print_warning(warning);
    }

    print_success(&format!(
        "Configuration is valid ({} project(s), {} warning(s))",
        ctx.config.projects.len(),
        warnings.len()
    ));
    Ok(())
}

/// Problems that don't invalidate the configuration but will likely
/// surprise at run time
fn warnings(config: &RunConfig, base_dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    let test_dir = base_dir.join(&config.test_dir);
    if !test_dir.is_dir() {
        warnings.push(format!("Test directory {} does not exist", test_dir.display()));
    }

    if let Some(state) = &config.use_options.storage_state {
        let state = base_dir.join(state);
        if !state.is_file() {
            warnings.push(format!("Storage state file {} does not exist", state.display()));
        }
    }

    if let Ok(remote) = config.effective_use(PROJECT_REMOTE) {
        match &remote.connect_options {
            None => warnings.push(format!(
                "Project '{}' has no connect options; pass --connect-options to attach to a remote browser",
                PROJECT_REMOTE
            )),
            Some(opts) if opts.is_empty() => warnings.push(format!(
                "Project '{}' has an empty connect options object; the runner needs at least wsEndpoint",
                PROJECT_REMOTE
            )),
            Some(_) => {}
        }
    }

    warnings
}
