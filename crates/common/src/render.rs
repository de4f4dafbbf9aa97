//! Rendering the configuration for the test runner
//!
//! The runner loads a JavaScript module, so the configuration is emitted
//! as a CommonJS module whose export is the runner-shaped JSON object.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::types::RunConfig;

/// Runner-shaped JSON
///
/// Unbounded workers are left out entirely so the runner falls back to
/// its own default.
pub fn to_runner_json(config: &RunConfig) -> Result<Value> {
    let mut value = serde_json::to_value(config)?;
    if config.workers.is_unbounded() {
        if let Value::Object(map) = &mut value {
            map.remove("workers");
        }
    }
    Ok(value)
}

/// CommonJS module text the runner can load with `--config`
pub fn to_config_module(config: &RunConfig) -> Result<String> {
    let body = serde_json::to_string_pretty(&to_runner_json(config)?)?;

    let mut module = String::new();
    module.push_str(&format!(
        "// Generated by pwconfig {}. Do not edit by hand.\n",
        crate::VERSION
    ));
    module.push_str("// @ts-check\n\n");
    module.push_str(&format!("module.exports = {};\n", body));
    Ok(module)
}

/// Write the config module to `path`, creating parent directories
pub fn write_config_module(config: &RunConfig, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, to_config_module(config)?)?;
    info!("Runner config written to: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RunConfigBuilder;
    use crate::env::EnvSnapshot;
    use serde_json::json;

    fn build(ci: &str) -> RunConfig {
        let env: EnvSnapshot = [("CI", ci)].into_iter().collect();
        RunConfigBuilder::new(&env).build()
    }

    #[test]
    fn test_runner_json_shape() {
        let value = to_runner_json(&build("")).unwrap();

        assert_eq!(value["testDir"], json!("tests"));
        assert_eq!(value["outputDir"], json!("output"));
        assert_eq!(value["fullyParallel"], json!(true));
        assert_eq!(value["forbidOnly"], json!(false));
        assert_eq!(value["retries"], json!(0));
        assert_eq!(value["reporter"], json!("html"));
        assert_eq!(value["use"]["trace"], json!("on-first-retry"));
        assert_eq!(value["use"]["ignoreHTTPSErrors"], json!(true));
        assert!(value.get("workers").is_none());
        assert!(value.get("webServer").is_none());

        let cdp = &value["projects"][1];
        assert_eq!(cdp["name"], json!("chrome-cdp-macos"));
        assert_eq!(
            cdp["use"]["launchOptions"],
            json!({ "args": ["--remote-debugging-port=9222"], "headless": false })
        );
    }

    #[test]
    fn test_runner_json_ci_workers() {
        let value = to_runner_json(&build("1")).unwrap();
        assert_eq!(value["workers"], json!(1));
        assert_eq!(value["retries"], json!(2));
        assert_eq!(value["forbidOnly"], json!(true));
    }

    #[test]
    fn test_config_module() {
        let module = to_config_module(&build("")).unwrap();
        assert!(module.starts_with("// Generated by pwconfig"));
        assert!(module.contains("module.exports = {"));
        assert!(module.trim_end().ends_with("};"));
    }

    #[test]
    fn test_write_config_module() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen").join("playwright.config.js");

        let written = write_config_module(&build(""), &path).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"testDir\": \"tests\""));
    }
}
