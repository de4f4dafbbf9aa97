//! Environment snapshot
//!
//! The process environment is captured exactly once; everything downstream
//! reads from the snapshot so builds stay pure and repeatable.

use std::collections::BTreeMap;

/// An immutable copy of environment variables taken at a single point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// An empty environment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get a variable's raw value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether a variable is present and truthy
    ///
    /// Truthy means set to any non-empty string, so `0`, `false` and a
    /// lone space all count as set.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(is_truthy)
    }

    /// Whether no variables were captured
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flag_is_false() {
        assert!(!EnvSnapshot::empty().flag("CI"));
    }

    #[test]
    fn test_any_non_empty_value_is_truthy() {
        for value in ["1", "true", "github-actions", "0", "false", "off", " "] {
            let env: EnvSnapshot = [("CI", value)].into_iter().collect();
            assert!(env.flag("CI"), "expected {value:?} to be truthy");
        }
    }

    #[test]
    fn test_empty_value_is_falsy() {
        let env: EnvSnapshot = [("CI", "")].into_iter().collect();
        assert!(!env.flag("CI"));
    }

    #[test]
    fn test_capture_reads_process_env() {
        // PATH is set in every sane test environment
        let env = EnvSnapshot::capture();
        assert!(!env.is_empty());
    }
}
