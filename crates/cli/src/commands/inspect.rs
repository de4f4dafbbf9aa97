//! Inspection Commands
//!
//! Show the effective configuration, its projects and the device presets.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use pwconfig_common::{devices, RunConfig, UseOptions};

use super::Context;
use crate::output::{print_document, print_list, OutputFormat, SettingRow, TableDisplay};

#[derive(Args)]
pub struct ProjectArgs {
    /// Project name
    pub name: String,
}

#[derive(Args)]
pub struct DevicesArgs {
    /// Show every option of one preset instead of the list
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Project summary for display
#[derive(Serialize, Clone)]
pub struct ProjectInfo {
    pub name: String,
    pub browser: String,
    pub channel: String,
    pub headless: bool,
    pub viewport: String,
    pub remote: bool,
}

impl ProjectInfo {
    fn from_options(name: &str, opts: &UseOptions) -> Self {
        Self {
            name: name.to_string(),
            browser: opts.browser().to_string(),
            channel: opts.channel.clone().unwrap_or_else(|| "-".to_string()),
            headless: opts.effective_headless(),
            viewport: opts
                .viewport
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            remote: opts.connect_options.is_some(),
        }
    }
}

impl TableDisplay for ProjectInfo {
    fn headers() -> Vec<&'static str> {
        vec!["Project", "Browser", "Channel", "Headless", "Viewport", "Remote"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.browser.clone(),
            self.channel.clone(),
            self.headless.to_string(),
            self.viewport.clone(),
            self.remote.to_string(),
        ]
    }
}

/// Device preset summary for display
#[derive(Serialize, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub browser: String,
    pub viewport: String,
    pub scale_factor: f64,
    pub mobile: bool,
}

impl TableDisplay for DeviceInfo {
    fn headers() -> Vec<&'static str> {
        vec!["Device", "Browser", "Viewport", "Scale", "Mobile"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.browser.clone(),
            self.viewport.clone(),
            self.scale_factor.to_string(),
            self.mobile.to_string(),
        ]
    }
}

pub fn execute_show(ctx: &Context, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => print_list(&settings(&ctx.config), format),
        _ => print_document(&ctx.config, format),
    }
}

pub fn execute_projects(ctx: &Context, format: OutputFormat) -> Result<()> {
    let mut rows = Vec::with_capacity(ctx.config.projects.len());
    for project in &ctx.config.projects {
        let opts = ctx.config.effective_use(&project.name)?;
        rows.push(ProjectInfo::from_options(&project.name, &opts));
    }
    print_list(&rows, format)
}

pub fn execute_project(args: ProjectArgs, ctx: &Context, format: OutputFormat) -> Result<()> {
    let opts = ctx.config.effective_use(&args.name)?;
    match format {
        OutputFormat::Table | OutputFormat::Plain => print_list(&option_rows(&opts)?, format),
        _ => print_document(&opts, format),
    }
}

pub fn execute_devices(args: DevicesArgs, format: OutputFormat) -> Result<()> {
    if let Some(name) = args.name {
        let opts = devices::lookup(&name)?;
        return match format {
            OutputFormat::Table | OutputFormat::Plain => print_list(&option_rows(&opts)?, format),
            _ => print_document(&opts, format),
        };
    }

    let rows: Vec<DeviceInfo> = devices::all()
        .iter()
        .map(|(name, opts)| DeviceInfo {
            name: name.to_string(),
            browser: opts.browser().to_string(),
            viewport: opts
                .viewport
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            scale_factor: opts.device_scale_factor.unwrap_or(1.0),
            mobile: opts.is_mobile.unwrap_or(false),
        })
        .collect();
    print_list(&rows, format)
}

/// Top-level settings as rows
fn settings(config: &RunConfig) -> Vec<SettingRow> {
    let shared = &config.use_options;
    let mut rows = vec![
        SettingRow::new("testDir", config.test_dir.display()),
        SettingRow::new("outputDir", config.output_dir.display()),
        SettingRow::new("fullyParallel", config.fully_parallel),
        SettingRow::new("forbidOnly", config.forbid_only),
        SettingRow::new("retries", config.retries),
        SettingRow::new("workers", config.workers),
        SettingRow::new("reporter", config.reporter),
    ];

    if let Some(trace) = shared.trace {
        rows.push(SettingRow::new("use.trace", trace));
    }
    if let Some(ignore) = shared.ignore_https_errors {
        rows.push(SettingRow::new("use.ignoreHTTPSErrors", ignore));
    }
    if let Some(url) = &shared.base_url {
        rows.push(SettingRow::new("use.baseURL", url));
    }
    if let Some(state) = &shared.storage_state {
        rows.push(SettingRow::new("use.storageState", state.display()));
    }
    if let Some(server) = &config.web_server {
        rows.push(SettingRow::new(
            "webServer",
            format!(
                "{} @ {} (reuse: {})",
                server.command, server.url, server.reuse_existing_server
            ),
        ));
    }

    rows.push(SettingRow::new("projects", config.project_names().join(", ")));
    rows
}

/// Every set option as a row, values shown as compact JSON
fn option_rows(opts: &UseOptions) -> Result<Vec<SettingRow>> {
    let value = serde_json::to_value(opts)?;
    let rows = match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => SettingRow::new(key, s),
                other => SettingRow::new(key, other),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(rows)
}
