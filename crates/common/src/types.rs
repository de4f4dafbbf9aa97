//! Core types for pwconfig
//!
//! Field names serialize in the runner's own camelCase shape so a
//! [`RunConfig`] can be handed to it with no translation layer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Concurrency limit for parallel test execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "WorkersRepr", into = "WorkersRepr")]
pub enum Workers {
    /// No cap; the runner picks based on available cores
    #[default]
    Unbounded,
    /// At most this many worker processes
    Limit(u32),
    /// Percentage of logical cores (1..=100)
    Percent(u8),
}

impl Workers {
    /// Parse `"unbounded"`, a positive integer, or a percentage like `"50%"`
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("unbounded") {
            return Ok(Workers::Unbounded);
        }

        if let Some(pct) = trimmed.strip_suffix('%') {
            return match pct.trim().parse::<u8>() {
                Ok(p) if (1..=100).contains(&p) => Ok(Workers::Percent(p)),
                _ => Err(Error::InvalidWorkers(value.to_string())),
            };
        }

        match trimmed.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Workers::Limit(n)),
            _ => Err(Error::InvalidWorkers(value.to_string())),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Workers::Unbounded)
    }

    /// Check the value is usable by the runner
    pub fn validate(&self) -> Result<()> {
        match self {
            Workers::Limit(0) => Err(Error::InvalidWorkers("0".to_string())),
            Workers::Percent(p) if !(1..=100).contains(p) => {
                Err(Error::InvalidWorkers(format!("{}%", p)))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Workers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Workers::Unbounded => write!(f, "unbounded"),
            Workers::Limit(n) => write!(f, "{}", n),
            Workers::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Wire form of [`Workers`]: a bare integer or a string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WorkersRepr {
    Count(u32),
    Text(String),
}

impl TryFrom<WorkersRepr> for Workers {
    type Error = Error;

    fn try_from(repr: WorkersRepr) -> Result<Self> {
        match repr {
            WorkersRepr::Count(0) => Err(Error::InvalidWorkers("0".to_string())),
            WorkersRepr::Count(n) => Ok(Workers::Limit(n)),
            WorkersRepr::Text(s) => Workers::parse(&s),
        }
    }
}

impl From<Workers> for WorkersRepr {
    fn from(workers: Workers) -> Self {
        match workers {
            Workers::Limit(n) => WorkersRepr::Count(n),
            other => WorkersRepr::Text(other.to_string()),
        }
    }
}

/// Reporter selected for summarizing run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Reporter {
    List,
    Line,
    Dot,
    #[default]
    Html,
    Json,
    Junit,
    Github,
    Blob,
    Null,
}

impl Reporter {
    pub const ALL: [Reporter; 9] = [
        Reporter::List,
        Reporter::Line,
        Reporter::Dot,
        Reporter::Html,
        Reporter::Json,
        Reporter::Junit,
        Reporter::Github,
        Reporter::Blob,
        Reporter::Null,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reporter::List => "list",
            Reporter::Line => "line",
            Reporter::Dot => "dot",
            Reporter::Html => "html",
            Reporter::Json => "json",
            Reporter::Junit => "junit",
            Reporter::Github => "github",
            Reporter::Blob => "blob",
            Reporter::Null => "null",
        }
    }
}

impl std::fmt::Display for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Reporter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Reporter::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| Error::InvalidReporter(s.to_string()))
    }
}

impl TryFrom<String> for Reporter {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Reporter> for String {
    fn from(r: Reporter) -> Self {
        r.as_str().to_string()
    }
}

/// Trace capture policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceMode {
    Off,
    On,
    RetainOnFailure,
    OnFirstRetry,
    OnAllRetries,
    RetainOnFirstFailure,
}

impl std::fmt::Display for TraceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceMode::Off => write!(f, "off"),
            TraceMode::On => write!(f, "on"),
            TraceMode::RetainOnFailure => write!(f, "retain-on-failure"),
            TraceMode::OnFirstRetry => write!(f, "on-first-retry"),
            TraceMode::OnAllRetries => write!(f, "on-all-retries"),
            TraceMode::RetainOnFirstFailure => write!(f, "retain-on-first-failure"),
        }
    }
}

/// Browser engine a project runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserName {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserName::Chromium => "chromium",
            BrowserName::Firefox => "firefox",
            BrowserName::Webkit => "webkit",
        }
    }
}

impl std::fmt::Display for BrowserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Options passed to the browser at launch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptions {
    /// Extra command-line arguments for the browser process
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
}

impl LaunchOptions {
    /// The remote-debugging port requested through `args`, if any
    pub fn remote_debugging_port(&self) -> Option<u16> {
        self.args
            .iter()
            .find_map(|a| a.strip_prefix("--remote-debugging-port="))
            .and_then(|p| p.parse().ok())
    }
}

/// Connection details for attaching to a remote browser
///
/// The shape belongs to whoever supplies it; this type only guarantees a
/// JSON object and passes it through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectOptions(serde_json::Map<String, serde_json::Value>);

impl ConnectOptions {
    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidConnectOptions(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(s)?)
    }

    /// Load connect options from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Browser context options
///
/// Every field is optional so records can be layered: shared defaults,
/// then a device preset, then per-project overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceMode>,

    #[serde(default, rename = "ignoreHTTPSErrors", skip_serializing_if = "Option::is_none")]
    pub ignore_https_errors: Option<bool>,

    /// Pre-seeded cookies and local storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<PathBuf>,

    #[serde(default, rename = "baseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_scale_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_touch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_browser_type: Option<BrowserName>,

    /// Branded browser channel such as `chrome` or `msedge`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_options: Option<LaunchOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_options: Option<ConnectOptions>,
}

impl UseOptions {
    /// Shallow merge: fields set in `over` win, nested records are
    /// replaced wholesale rather than merged.
    pub fn merged_with(&self, over: &UseOptions) -> UseOptions {
        UseOptions {
            trace: over.trace.or(self.trace),
            ignore_https_errors: over.ignore_https_errors.or(self.ignore_https_errors),
            storage_state: over.storage_state.clone().or_else(|| self.storage_state.clone()),
            base_url: over.base_url.clone().or_else(|| self.base_url.clone()),
            user_agent: over.user_agent.clone().or_else(|| self.user_agent.clone()),
            viewport: over.viewport.or(self.viewport),
            device_scale_factor: over.device_scale_factor.or(self.device_scale_factor),
            is_mobile: over.is_mobile.or(self.is_mobile),
            has_touch: over.has_touch.or(self.has_touch),
            default_browser_type: over.default_browser_type.or(self.default_browser_type),
            channel: over.channel.clone().or_else(|| self.channel.clone()),
            headless: over.headless.or(self.headless),
            launch_options: over
                .launch_options
                .clone()
                .or_else(|| self.launch_options.clone()),
            connect_options: over
                .connect_options
                .clone()
                .or_else(|| self.connect_options.clone()),
        }
    }

    /// Effective headless flag: launch options first, then the context
    /// option, then the runner's default (headless).
    pub fn effective_headless(&self) -> bool {
        self.launch_options
            .as_ref()
            .and_then(|l| l.headless)
            .or(self.headless)
            .unwrap_or(true)
    }

    /// Browser engine, defaulting to chromium like the runner does
    pub fn browser(&self) -> BrowserName {
        self.default_browser_type.unwrap_or_default()
    }
}

/// A named browser execution profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,

    /// Device preset merged with project overrides
    #[serde(rename = "use", default)]
    pub use_options: UseOptions,
}

impl Project {
    pub fn new(name: impl Into<String>, use_options: UseOptions) -> Self {
        Self {
            name: name.into(),
            use_options,
        }
    }
}

/// Dev server the runner starts before the tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebServer {
    /// Shell command that starts the server
    pub command: String,

    /// URL polled until the server answers
    pub url: String,

    /// Reuse a server already listening on `url`
    pub reuse_existing_server: bool,

    /// Startup timeout in milliseconds
    #[serde(default, rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// The complete run configuration handed to the test runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Directory scanned for test files, relative to the config file
    pub test_dir: PathBuf,

    /// Directory where run artifacts are written
    pub output_dir: PathBuf,

    /// Tests within a single file may run concurrently
    pub fully_parallel: bool,

    /// Fail the run if any test is marked as the only one to run
    pub forbid_only: bool,

    /// Re-executions attempted after a failing test
    pub retries: u32,

    pub workers: Workers,

    pub reporter: Reporter,

    /// Defaults merged into every project
    #[serde(rename = "use")]
    pub use_options: UseOptions,

    pub projects: Vec<Project>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_server: Option<WebServer>,
}

impl RunConfig {
    /// Look up a project by name
    pub fn project(&self, name: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))
    }

    /// Project names in declaration order
    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    /// Shared defaults with a project's options layered on top
    pub fn effective_use(&self, name: &str) -> Result<UseOptions> {
        let project = self.project(name)?;
        Ok(self.use_options.merged_with(&project.use_options))
    }

    /// Check the invariants the runner relies on
    pub fn validate(&self) -> Result<()> {
        if self.test_dir.as_os_str().is_empty() {
            return Err(Error::invalid_config("testDir must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::invalid_config("outputDir must not be empty"));
        }

        self.workers.validate()?;

        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.name.trim().is_empty() {
                return Err(Error::invalid_config("project name must not be empty"));
            }
            if !seen.insert(project.name.as_str()) {
                return Err(Error::DuplicateProject {
                    name: project.name.clone(),
                });
            }
        }

        if let Some(server) = &self.web_server {
            if server.command.trim().is_empty() {
                return Err(Error::invalid_config("webServer.command must not be empty"));
            }
            if server.url.trim().is_empty() {
                return Err(Error::invalid_config("webServer.url must not be empty"));
            }
        }

        Ok(())
    }
}
