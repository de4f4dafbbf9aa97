//! Properties the built run configuration must hold for any environment

use std::path::PathBuf;

use pwconfig_common::builder::{PROJECT_CHROME_CDP, PROJECT_CHROMIUM, PROJECT_REMOTE};
use pwconfig_common::{
    EnvSnapshot, LaunchOptions, RunConfig, RunConfigBuilder, UseOptions, Workers,
};

const CI_VALUES: &[Option<&str>] = &[
    None,
    Some(""),
    Some("0"),
    Some("false"),
    Some("off"),
    Some(" "),
    Some("1"),
    Some("true"),
    Some("yes"),
    Some("azure-pipelines"),
];

fn env_with_ci(ci: Option<&str>) -> EnvSnapshot {
    let mut pairs = vec![("HOME", "/home/runner"), ("PATH", "/usr/bin")];
    if let Some(value) = ci {
        pairs.push(("CI", value));
    }
    pairs.into_iter().collect()
}

fn build(ci: Option<&str>) -> RunConfig {
    RunConfigBuilder::new(&env_with_ci(ci)).build()
}

fn ci_is_truthy(ci: Option<&str>) -> bool {
    ci.is_some_and(|v| !v.is_empty())
}

#[test]
fn ci_flag_selects_retry_and_worker_policy() {
    for &ci in CI_VALUES {
        let config = build(ci);
        if ci_is_truthy(ci) {
            assert!(config.forbid_only, "CI={ci:?}");
            assert_eq!(config.retries, 2, "CI={ci:?}");
            assert_eq!(config.workers, Workers::Limit(1), "CI={ci:?}");
        } else {
            assert!(!config.forbid_only, "CI={ci:?}");
            assert_eq!(config.retries, 0, "CI={ci:?}");
            assert_eq!(config.workers, Workers::Unbounded, "CI={ci:?}");
        }
    }
}

#[test]
fn false_looking_ci_values_still_select_ci_policy() {
    for value in ["0", "false", " "] {
        let config = build(Some(value));
        assert!(config.forbid_only, "CI={value:?}");
        assert_eq!(config.retries, 2, "CI={value:?}");
        assert_eq!(config.workers, Workers::Limit(1), "CI={value:?}");
    }
}

#[test]
fn projects_are_fixed_and_ordered() {
    for &ci in CI_VALUES {
        assert_eq!(
            build(ci).project_names(),
            vec![PROJECT_CHROMIUM, PROJECT_CHROME_CDP, PROJECT_REMOTE]
        );
    }
}

#[test]
fn cdp_profile_is_headed_with_debugging_port() {
    for &ci in CI_VALUES {
        let cdp = build(ci).effective_use(PROJECT_CHROME_CDP).unwrap();
        let launch = cdp.launch_options.expect("cdp project has launch options");
        assert!(launch
            .args
            .iter()
            .any(|a| a == "--remote-debugging-port=9222"));
        assert_eq!(launch.headless, Some(false));
    }
}

#[test]
fn rebuilding_is_deterministic() {
    for &ci in CI_VALUES {
        let env = env_with_ci(ci);
        let first = RunConfigBuilder::new(&env).build();
        let second = RunConfigBuilder::new(&env).build();
        assert_eq!(first, second);
    }
}

#[test]
fn directories_do_not_depend_on_environment() {
    for &ci in CI_VALUES {
        let config = build(ci);
        assert_eq!(config.test_dir, PathBuf::from("tests"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }
}

#[test]
fn project_values_override_shared_defaults() {
    let mut config = build(None);
    config.projects[0].use_options = config.projects[0].use_options.merged_with(&UseOptions {
        ignore_https_errors: Some(false),
        launch_options: Some(LaunchOptions {
            args: vec!["--mute-audio".to_string()],
            headless: None,
        }),
        ..Default::default()
    });

    let effective = config.effective_use(PROJECT_CHROMIUM).unwrap();
    assert_eq!(effective.ignore_https_errors, Some(false));
    // shared value not redefined by the project survives
    assert_eq!(effective.trace, config.use_options.trace);
    assert_eq!(
        effective.launch_options.unwrap().args,
        vec!["--mute-audio".to_string()]
    );
}

#[test]
fn unrelated_environment_is_ignored() {
    let noisy: EnvSnapshot = [
        ("CI_COMMIT_SHA", "abc123"),
        ("GITHUB_ACTIONS", "true"),
        ("WORKERS", "8"),
    ]
    .into_iter()
    .collect();
    assert_eq!(RunConfigBuilder::new(&noisy).build(), build(None));
}
