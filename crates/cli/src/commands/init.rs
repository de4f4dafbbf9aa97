//! Init Command
//!
//! Writes a starter override file holding the static settings of a fresh
//! build, ready to edit.

use anyhow::{bail, Context as _, Result};
use clap::Args;
use std::path::Path;

use pwconfig_common::{EnvSnapshot, Overrides, RunConfigBuilder};

use crate::output::{print_info, print_success};

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing override file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    starter()
        .save(path)
        .with_context(|| format!("Failed to write override file {}", path.display()))?;

    print_success(&format!("Wrote {}", path.display()));
    print_info("retries and workers are left to the CI flag; add them to pin a value");
    Ok(())
}

/// CI-independent settings only, so the file never masks the CI policy
fn starter() -> Overrides {
    let config = RunConfigBuilder::new(&EnvSnapshot::empty()).build();
    Overrides {
        test_dir: Some(config.test_dir),
        output_dir: Some(config.output_dir),
        reporter: Some(config.reporter),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwconfig_common::Workers;

    #[test]
    fn test_init_writes_loadable_starter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pwconfig.toml");

        execute(InitArgs { force: false }, &path).unwrap();

        let loaded = Overrides::load(&path).unwrap();
        assert_eq!(loaded, starter());
        assert!(loaded.retries.is_none());
        assert!(loaded.workers.is_none());
    }

    #[test]
    fn test_starter_keeps_ci_policy() {
        let env: EnvSnapshot = [("CI", "1")].into_iter().collect();
        let built = RunConfigBuilder::new(&env).build();

        let applied = starter().apply(built.clone(), true).unwrap();
        assert_eq!(applied, built);
        assert_eq!(applied.workers, Workers::Limit(1));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pwconfig.toml");
        std::fs::write(&path, "retries = 5\n").unwrap();

        let err = execute(InitArgs { force: false }, &path).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "retries = 5\n");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pwconfig.toml");
        std::fs::write(&path, "retries = 5\n").unwrap();

        execute(InitArgs { force: true }, &path).unwrap();
        assert_eq!(Overrides::load(&path).unwrap(), starter());
    }
}
