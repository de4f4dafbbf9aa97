//! Output formatting for CLI

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// TOML format
    Toml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// A two-column setting/value row
#[derive(Debug, Clone, Serialize)]
pub struct SettingRow {
    pub setting: String,
    pub value: String,
}

impl SettingRow {
    pub fn new(setting: impl Into<String>, value: impl ToString) -> Self {
        Self {
            setting: setting.into(),
            value: value.to_string(),
        }
    }
}

impl TableDisplay for SettingRow {
    fn headers() -> Vec<&'static str> {
        vec!["Setting", "Value"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.setting.clone(), self.value.clone()]
    }
}

/// Wrapper so TOML, which needs a table at the root, can carry a list
#[derive(Serialize)]
struct Items<'a, T> {
    items: &'a [T],
}

/// Serialize a document in one of the structured formats
///
/// Table and plain fall back to pretty JSON; callers that have a tabular
/// view should use [`print_list`] for those formats instead.
pub fn to_document<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Toml => {
            let mut value = serde_json::to_value(value)?;
            strip_nulls(&mut value);
            toml::to_string_pretty(&value).context("failed to encode TOML document")?
        }
        OutputFormat::Json | OutputFormat::Table | OutputFormat::Plain => {
            serde_json::to_string_pretty(value)?
        }
    };
    Ok(text)
}

/// TOML has no null; drop null object entries and array elements
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

/// Print a serializable document
pub fn print_document<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    println!("{}", to_document(value, format)?.trim_end());
    Ok(())
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) -> Result<()> {
    if items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }

            println!("{table}");
        }
        OutputFormat::Json | OutputFormat::Yaml => print_document(items, format)?,
        OutputFormat::Toml => print_document(&Items { items }, format)?,
        OutputFormat::Plain => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                let row = item.row();
                for (header, value) in T::headers().iter().zip(row.iter()) {
                    println!("{}: {}", header, value);
                }
            }
        }
    }

    Ok(())
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "i".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwconfig_common::{ConnectOptions, EnvSnapshot, RunConfigBuilder, UseOptions};

    #[test]
    fn test_toml_list_is_wrapped() {
        let rows = vec![SettingRow::new("retries", 2)];
        let text = to_document(&Items { items: &rows }, OutputFormat::Toml).unwrap();
        assert!(text.contains("[[items]]"));
        assert!(text.contains("setting = \"retries\""));
    }

    #[test]
    fn test_toml_skips_nulls_in_connect_options() {
        let opts = UseOptions {
            connect_options: Some(
                ConnectOptions::from_json_str(
                    r#"{"headers":null,"wsEndpoint":"ws://grid:3000/","exposeNetwork":["a",null]}"#,
                )
                .unwrap(),
            ),
            ..Default::default()
        };
        let text = to_document(&opts, OutputFormat::Toml).unwrap();
        let parsed: toml::Value = toml::from_str(&text).unwrap();
        let connect = &parsed["connectOptions"];
        assert_eq!(connect["wsEndpoint"].as_str(), Some("ws://grid:3000/"));
        assert!(connect.get("headers").is_none());
        assert_eq!(connect["exposeNetwork"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_toml_show_with_remote_connect_options() {
        let config = RunConfigBuilder::new(&EnvSnapshot::empty())
            .connect_options(
                ConnectOptions::from_json_str(r#"{"timeout":null,"wsEndpoint":"ws://grid:3000/"}"#)
                    .unwrap(),
            )
            .build();
        let text = to_document(&config, OutputFormat::Toml).unwrap();
        assert!(text.contains("ws://grid:3000/"));
    }

    #[test]
    fn test_yaml_document() {
        let row = SettingRow::new("reporter", "html");
        let text = to_document(&row, OutputFormat::Yaml).unwrap();
        assert!(text.contains("value: html"));
    }
}
