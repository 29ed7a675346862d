//! Core domain types for stack provisioning
//!
//! Every managed piece of the stack is a [`Component`](ComponentId) whose
//! observed state is re-derived from the host on every run. The engine
//! consumes [`ComponentState`] exhaustively and records exactly one
//! [`Outcome`] per component per run.

use serde::Serialize;
use std::fmt;

/// Identifier for each managed component, in convergence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentId {
    BasePackages,
    Driver,
    Runtime,
    UserGroups,
    ShellProfile,
    AppCheckout,
    PythonEnv,
    TorchFramework,
    PluginCheckout,
    ModelDirs,
    LaunchScripts,
}

impl ComponentId {
    /// All components in the fixed convergence order
    pub const ALL: [ComponentId; 11] = [
        ComponentId::BasePackages,
        ComponentId::Driver,
        ComponentId::Runtime,
        ComponentId::UserGroups,
        ComponentId::ShellProfile,
        ComponentId::AppCheckout,
        ComponentId::PythonEnv,
        ComponentId::TorchFramework,
        ComponentId::PluginCheckout,
        ComponentId::ModelDirs,
        ComponentId::LaunchScripts,
    ];

    /// Human-readable label used in the status table and summary
    pub fn label(&self) -> &'static str {
        match self {
            ComponentId::BasePackages => "Base packages",
            ComponentId::Driver => "AMDGPU driver",
            ComponentId::Runtime => "ROCm runtime",
            ComponentId::UserGroups => "GPU user groups",
            ComponentId::ShellProfile => "Shell profile exports",
            ComponentId::AppCheckout => "ComfyUI checkout",
            ComponentId::PythonEnv => "Python environment",
            ComponentId::TorchFramework => "PyTorch (ROCm nightly)",
            ComponentId::PluginCheckout => "ComfyUI-Manager checkout",
            ComponentId::ModelDirs => "Model directories",
            ComponentId::LaunchScripts => "Launch scripts",
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observed state of a component, re-derived from the host each run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ComponentState {
    NotInstalled,
    Current { version: String },
    Stale { current: String, available: String },
}

/// Classify installed/candidate version strings into a [`ComponentState`].
///
/// "Update available" means the candidate string differs from the installed
/// string; no semantic-version ordering is applied. An empty or missing
/// candidate while installed classifies as current, so the update is
/// silently skipped.
pub fn classify(installed: Option<&str>, candidate: Option<&str>) -> ComponentState {
    match installed {
        None => ComponentState::NotInstalled,
        Some(current) => match candidate {
            Some(available) if !available.is_empty() && available != current => {
                ComponentState::Stale {
                    current: current.to_string(),
                    available: available.to_string(),
                }
            }
            _ => ComponentState::Current {
                version: current.to_string(),
            },
        },
    }
}

/// Shorten a commit SHA to the conventional seven characters for display
pub fn short_sha(sha: &str) -> String {
    sha.chars().take(7).collect()
}

/// What the engine did for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Installed,
    Updated { before: String, after: String },
    Skipped,
}

/// One recorded convergence outcome; created once, never mutated
#[derive(Debug, Clone)]
pub struct Outcome {
    pub component: ComponentId,
    pub kind: OutcomeKind,
    pub detail: String,
}

/// Single-pass inspection result: one row per component, in order
#[derive(Debug, Clone, Serialize)]
pub struct StackSnapshot {
    pub rows: Vec<SnapshotRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRow {
    pub component: ComponentId,
    #[serde(flatten)]
    pub state: ComponentState,
}

impl StackSnapshot {
    pub fn new(rows: Vec<SnapshotRow>) -> Self {
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_absent() {
        assert_eq!(classify(None, None), ComponentState::NotInstalled);
        assert_eq!(classify(None, Some("6.2.4")), ComponentState::NotInstalled);
    }

    #[test]
    fn test_classify_current_on_equal_strings() {
        assert_eq!(
            classify(Some("6.2.4-1"), Some("6.2.4-1")),
            ComponentState::Current {
                version: "6.2.4-1".to_string()
            }
        );
    }

    #[test]
    fn test_classify_stale_on_differing_strings() {
        assert_eq!(
            classify(Some("6.2.2-1"), Some("6.2.4-1")),
            ComponentState::Stale {
                current: "6.2.2-1".to_string(),
                available: "6.2.4-1".to_string()
            }
        );
    }

    #[test]
    fn test_classify_no_semver_ordering() {
        // A "downgrade" candidate still counts as stale; only string
        // equality matters.
        assert!(matches!(
            classify(Some("6.2.4-1"), Some("6.1.0-1")),
            ComponentState::Stale { .. }
        ));
    }

    #[test]
    fn test_classify_empty_candidate_is_current() {
        assert_eq!(
            classify(Some("6.2.4-1"), Some("")),
            ComponentState::Current {
                version: "6.2.4-1".to_string()
            }
        );
        assert_eq!(
            classify(Some("6.2.4-1"), None),
            ComponentState::Current {
                version: "6.2.4-1".to_string()
            }
        );
    }

    #[test]
    fn test_component_order_is_total() {
        // The convergence order is a hard contract: leaves first.
        assert_eq!(ComponentId::ALL[0], ComponentId::BasePackages);
        assert_eq!(ComponentId::ALL[1], ComponentId::Driver);
        assert_eq!(ComponentId::ALL[10], ComponentId::LaunchScripts);
    }

    #[test]
    fn test_short_sha_truncates_safely() {
        assert_eq!(
            short_sha("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            "aaaaaaa"
        );
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha(""), "");
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = StackSnapshot::new(vec![SnapshotRow {
            component: ComponentId::Driver,
            state: ComponentState::Stale {
                current: "6.2.2".to_string(),
                available: "6.2.4".to_string(),
            },
        }]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"driver\""));
        assert!(json.contains("\"stale\""));
        assert!(json.contains("6.2.4"));
    }
}
