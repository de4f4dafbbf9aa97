//! CLI Commands

pub mod check;
pub mod export;
pub mod init;
pub mod inspect;

use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

use pwconfig_common::{ConnectOptions, EnvSnapshot, Overrides, RunConfig, RunConfigBuilder};

/// Everything a command needs: the effective configuration and how it was
/// derived
#[derive(Debug, Clone)]
pub struct Context {
    pub config: RunConfig,
    pub ci: bool,
    pub overrides: Overrides,
}

impl Context {
    /// Capture the environment, build, then layer the override file
    pub fn load(overrides_path: &Path, connect_options: Option<&Path>) -> Result<Self> {
        Self::load_with_env(&EnvSnapshot::capture(), overrides_path, connect_options)
    }

    pub fn load_with_env(
        env: &EnvSnapshot,
        overrides_path: &Path,
        connect_options: Option<&Path>,
    ) -> Result<Self> {
        let mut builder = RunConfigBuilder::new(env);

        if let Some(path) = connect_options {
            let options = ConnectOptions::load(path).with_context(|| {
                format!("Failed to load connect options from {}", path.display())
            })?;
            builder = builder.connect_options(options);
        }

        let overrides = Overrides::load(overrides_path).with_context(|| {
            format!("Failed to load overrides from {}", overrides_path.display())
        })?;

        let ci = builder.is_ci();
        let config = overrides
            .apply(builder.build(), ci)
            .context("Overrides produced an invalid configuration")?;

        debug!(ci, projects = config.projects.len(), "configuration ready");

        Ok(Self {
            config,
            ci,
            overrides,
        })
    }
}
