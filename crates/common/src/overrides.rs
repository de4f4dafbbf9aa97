//! Override file handling
//!
//! An optional `pwconfig.toml` layered over the built configuration.
//! Every key is optional; a missing file means no overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::types::{Reporter, RunConfig, WebServer, Workers};

/// Values layered over the built configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// Integer, `"50%"`, or `"unbounded"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<Workers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,

    /// Base URL for relative navigations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Storage state file used to pre-seed every browser context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_server: Option<WebServerOverride>,
}

/// Dev server settings; `reuse_existing_server` defaults to "not on CI"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebServerOverride {
    pub command: String,
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_existing_server: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    /// Load overrides from file
    ///
    /// Returns empty overrides if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let overrides = Self::from_toml_str(&content)?;
            debug!(path = %path.display(), "loaded overrides");
            Ok(overrides)
        } else {
            debug!(path = %path.display(), "no override file");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save overrides to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer these overrides over `config` and re-validate the result
    ///
    /// `ci` decides the default for `web_server.reuse_existing_server`.
    pub fn apply(&self, mut config: RunConfig, ci: bool) -> Result<RunConfig> {
        if let Some(dir) = &self.test_dir {
            config.test_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(reporter) = self.reporter {
            config.reporter = reporter;
        }
        if let Some(url) = &self.base_url {
            config.use_options.base_url = Some(url.clone());
        }
        if let Some(state) = &self.storage_state {
            config.use_options.storage_state = Some(state.clone());
        }
        if let Some(server) = &self.web_server {
            config.web_server = Some(WebServer {
                command: server.command.clone(),
                url: server.url.clone(),
                reuse_existing_server: server.reuse_existing_server.unwrap_or(!ci),
                timeout_ms: server.timeout_ms,
            });
        }

        config.validate()?;
        debug!(overrides = ?self, "applied overrides");
        Ok(config)
    }
}
