//! Run configuration builder
//!
//! A pure function from an [`EnvSnapshot`] to a [`RunConfig`]. The only
//! environment input is the CI flag; everything else is static.

use std::path::PathBuf;
use tracing::debug;

use crate::devices;
use crate::env::EnvSnapshot;
use crate::types::{
    ConnectOptions, LaunchOptions, Project, Reporter, RunConfig, TraceMode, UseOptions, Workers,
};
use crate::CI_ENV_VAR;

/// Port the CDP profile exposes for remote debugging
pub const REMOTE_DEBUGGING_PORT: u16 = 9222;

pub const PROJECT_CHROMIUM: &str = "chromium";
pub const PROJECT_CHROME_CDP: &str = "chrome-cdp-macos";
pub const PROJECT_REMOTE: &str = "remote-browser";

/// Retry and concurrency policy derived from the CI flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CiPolicy {
    pub forbid_only: bool,
    pub retries: u32,
    pub workers: Workers,
}

impl CiPolicy {
    /// Strict policy on CI, permissive local-development policy otherwise
    pub fn for_ci(ci: bool) -> Self {
        if ci {
            Self {
                forbid_only: true,
                retries: 2,
                workers: Workers::Limit(1),
            }
        } else {
            Self {
                forbid_only: false,
                retries: 0,
                workers: Workers::Unbounded,
            }
        }
    }
}

/// Builds the [`RunConfig`] from an environment snapshot
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    ci: bool,
    connect_options: Option<ConnectOptions>,
}

impl RunConfigBuilder {
    pub fn new(env: &EnvSnapshot) -> Self {
        let ci = env.flag(CI_ENV_VAR);
        debug!(ci, raw = ?env.get(CI_ENV_VAR), "resolved CI flag");
        Self {
            ci,
            connect_options: None,
        }
    }

    /// Inject connection details for the remote-browser project
    pub fn connect_options(mut self, options: ConnectOptions) -> Self {
        self.connect_options = Some(options);
        self
    }

    pub fn is_ci(&self) -> bool {
        self.ci
    }

    pub fn policy(&self) -> CiPolicy {
        CiPolicy::for_ci(self.ci)
    }

    /// Produce the run configuration
    pub fn build(&self) -> RunConfig {
        let policy = self.policy();

        RunConfig {
            test_dir: PathBuf::from("tests"),
            output_dir: PathBuf::from("output"),
            fully_parallel: true,
            forbid_only: policy.forbid_only,
            retries: policy.retries,
            workers: policy.workers,
            reporter: Reporter::Html,
            use_options: shared_use_options(),
            projects: self.projects(),
            web_server: None,
        }
    }

    fn projects(&self) -> Vec<Project> {
        let chrome = devices::desktop_chrome();

        vec![
            Project::new(PROJECT_CHROMIUM, chrome.clone()),
            Project::new(
                PROJECT_CHROME_CDP,
                chrome.merged_with(&UseOptions {
                    channel: Some("chrome".to_string()),
                    launch_options: Some(LaunchOptions {
                        args: vec![format!("--remote-debugging-port={}", REMOTE_DEBUGGING_PORT)],
                        headless: Some(false),
                    }),
                    ..Default::default()
                }),
            ),
            Project::new(
                PROJECT_REMOTE,
                chrome.merged_with(&UseOptions {
                    connect_options: self.connect_options.clone(),
                    ..Default::default()
                }),
            ),
        ]
    }
}

/// Defaults merged into every project
pub fn shared_use_options() -> UseOptions {
    UseOptions {
        trace: Some(TraceMode::OnFirstRetry),
        ignore_https_errors: Some(true),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BrowserName;

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_local_policy() {
        let config = RunConfigBuilder::new(&EnvSnapshot::empty()).build();
        assert!(!config.forbid_only);
        assert_eq!(config.retries, 0);
        assert_eq!(config.workers, Workers::Unbounded);
    }

    #[test]
    fn test_ci_policy() {
        let config = RunConfigBuilder::new(&env(&[("CI", "true")])).build();
        assert!(config.forbid_only);
        assert_eq!(config.retries, 2);
        assert_eq!(config.workers, Workers::Limit(1));
    }

    #[test]
    fn test_empty_ci_uses_local_policy() {
        let builder = RunConfigBuilder::new(&env(&[("CI", "")]));
        assert!(!builder.is_ci());
        assert_eq!(builder.policy(), CiPolicy::for_ci(false));
    }

    #[test]
    fn test_false_string_ci_uses_ci_policy() {
        let builder = RunConfigBuilder::new(&env(&[("CI", "false")]));
        assert!(builder.is_ci());
        assert_eq!(builder.build().workers, Workers::Limit(1));
    }

    #[test]
    fn test_static_fields() {
        let config = RunConfigBuilder::new(&EnvSnapshot::empty()).build();
        assert_eq!(config.test_dir, PathBuf::from("tests"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(config.fully_parallel);
        assert_eq!(config.reporter, Reporter::Html);
        assert_eq!(config.use_options.trace, Some(TraceMode::OnFirstRetry));
        assert_eq!(config.use_options.ignore_https_errors, Some(true));
        assert!(config.use_options.storage_state.is_none());
        assert!(config.web_server.is_none());
    }

    #[test]
    fn test_cdp_project_options() {
        let config = RunConfigBuilder::new(&EnvSnapshot::empty()).build();
        let cdp = config.effective_use(PROJECT_CHROME_CDP).unwrap();

        assert_eq!(cdp.channel.as_deref(), Some("chrome"));
        let launch = cdp.launch_options.as_ref().unwrap();
        assert_eq!(launch.remote_debugging_port(), Some(REMOTE_DEBUGGING_PORT));
        assert_eq!(launch.headless, Some(false));
        assert!(!cdp.effective_headless());
        assert_eq!(cdp.browser(), BrowserName::Chromium);
    }

    #[test]
    fn test_remote_browser_without_connect_options() {
        let config = RunConfigBuilder::new(&EnvSnapshot::empty()).build();
        let remote = config.effective_use(PROJECT_REMOTE).unwrap();
        assert!(remote.connect_options.is_none());
        assert_eq!(remote.user_agent, devices::desktop_chrome().user_agent);
    }

    #[test]
    fn test_connect_options_only_reach_remote_project() {
        let opts = ConnectOptions::from_json_str(r#"{"wsEndpoint":"ws://grid:3000/"}"#).unwrap();
        let config = RunConfigBuilder::new(&EnvSnapshot::empty())
            .connect_options(opts.clone())
            .build();

        assert_eq!(
            config.effective_use(PROJECT_REMOTE).unwrap().connect_options,
            Some(opts)
        );
        assert!(config
            .effective_use(PROJECT_CHROMIUM)
            .unwrap()
            .connect_options
            .is_none());
        assert!(config.use_options.connect_options.is_none());
    }

    #[test]
    fn test_built_config_is_valid() {
        for ci in ["", "1"] {
            let config = RunConfigBuilder::new(&env(&[("CI", ci)])).build();
            assert!(config.validate().is_ok());
        }
    }
}
