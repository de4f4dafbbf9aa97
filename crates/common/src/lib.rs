//! pwconfig Common Library
//!
//! Typed run configuration for a browser end-to-end test runner.
//!
//! The process environment is read once into an [`EnvSnapshot`]; a pure
//! builder turns that snapshot into an immutable [`RunConfig`], which can
//! then be rendered in the runner's own configuration shape.
//!
//! ```text
//! EnvSnapshot ──build()──▶ RunConfig ──apply(Overrides)──▶ RunConfig
//!                              │
//!                              └──render──▶ playwright.config.js
//! ```

pub mod builder;
pub mod devices;
pub mod env;
pub mod error;
pub mod overrides;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use builder::RunConfigBuilder;
pub use env::EnvSnapshot;
pub use error::{Error, Result};
pub use overrides::Overrides;
pub use types::*;

/// pwconfig version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the environment variable that marks a CI run
pub const CI_ENV_VAR: &str = "CI";

/// Default override file name, looked up in the working directory
pub const DEFAULT_OVERRIDES_FILE: &str = "pwconfig.toml";

/// Default file name for the exported runner configuration module
pub const DEFAULT_MODULE_FILE: &str = "playwright.config.js";

/// Build the run configuration from the current process environment
pub fn build_from_process() -> RunConfig {
    RunConfigBuilder::new(&EnvSnapshot::capture()).build()
}
