//! Idempotent shell-profile export block
//!
//! A sentinel comment guards the block as a whole; each exported variable
//! is additionally checked on its own, so a profile that was edited by
//! hand still converges without ever duplicating a line.

use std::path::Path;

use crate::config::ExportVar;
use crate::error::{Result, RocstrapError};

/// Merge missing exports into existing profile content.
///
/// Returns the new content when something must be appended, `None` when
/// the profile already carries the sentinel and every export.
pub fn merge_exports(existing: &str, sentinel: &str, exports: &[ExportVar]) -> Option<String> {
    let has_sentinel = existing.lines().any(|line| line.trim() == sentinel);

    let missing: Vec<&ExportVar> = exports
        .iter()
        .filter(|var| !has_export(existing, &var.name))
        .collect();

    if has_sentinel && missing.is_empty() {
        return None;
    }

    let mut content = existing.to_string();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    if !has_sentinel {
        content.push_str(sentinel);
        content.push('\n');
    }
    for var in missing {
        content.push_str(&format!("export {}={}\n", var.name, var.value));
    }
    Some(content)
}

fn has_export(content: &str, name: &str) -> bool {
    let prefix = format!("export {name}=");
    content.lines().any(|line| line.trim().starts_with(&prefix))
}

/// What converging the profile file observed and did, from a single read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// Sentinel and every export already present; nothing written
    Converged,
    /// Sentinel present but exports were missing; they were appended
    Completed,
    /// No sentinel; the full block was written
    Written,
}

/// Converge the profile file on disk
pub fn ensure_exports(path: &Path, sentinel: &str, exports: &[ExportVar]) -> Result<ProfileOutcome> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(RocstrapError::FileWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    };
    let had_sentinel = existing.lines().any(|line| line.trim() == sentinel);

    match merge_exports(&existing, sentinel, exports) {
        Some(content) => {
            std::fs::write(path, content).map_err(|e| RocstrapError::FileWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            if had_sentinel {
                Ok(ProfileOutcome::Completed)
            } else {
                Ok(ProfileOutcome::Written)
            }
        }
        None => Ok(ProfileOutcome::Converged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "# Added by rocstrap (ROCm environment)";

    fn exports() -> Vec<ExportVar> {
        vec![
            ExportVar {
                name: "HSA_OVERRIDE_GFX_VERSION".to_string(),
                value: "11.0.0".to_string(),
            },
            ExportVar {
                name: "PATH".to_string(),
                value: "$PATH:/opt/rocm/bin".to_string(),
            },
        ]
    }

    #[test]
    fn test_fresh_profile_gets_sentinel_and_exports() {
        let merged = merge_exports("# ~/.profile\n", SENTINEL, &exports()).unwrap();
        assert!(merged.contains(SENTINEL));
        assert!(merged.contains("export HSA_OVERRIDE_GFX_VERSION=11.0.0"));
        assert!(merged.contains("export PATH=$PATH:/opt/rocm/bin"));
    }

    #[test]
    fn test_merge_twice_is_idempotent() {
        let once = merge_exports("", SENTINEL, &exports()).unwrap();
        assert_eq!(merge_exports(&once, SENTINEL, &exports()), None);
        // No duplicate sentinel or exports in the converged content
        assert_eq!(once.matches(SENTINEL).count(), 1);
        assert_eq!(once.matches("export HSA_OVERRIDE_GFX_VERSION=").count(), 1);
    }

    #[test]
    fn test_individual_missing_export_appended_without_second_sentinel() {
        let existing = format!("{SENTINEL}\nexport HSA_OVERRIDE_GFX_VERSION=11.0.0\n");
        let merged = merge_exports(&existing, SENTINEL, &exports()).unwrap();
        assert_eq!(merged.matches(SENTINEL).count(), 1);
        assert!(merged.contains("export PATH=$PATH:/opt/rocm/bin"));
        assert_eq!(merged.matches("export HSA_OVERRIDE_GFX_VERSION=").count(), 1);
    }

    #[test]
    fn test_hand_edited_value_counts_as_present() {
        // Converging never overwrites an existing export, even with a
        // different value.
        let existing = format!("{SENTINEL}\nexport HSA_OVERRIDE_GFX_VERSION=10.3.0\nexport PATH=$PATH:/opt/rocm/bin\n");
        assert_eq!(merge_exports(&existing, SENTINEL, &exports()), None);
    }

    #[test]
    fn test_missing_trailing_newline_is_fixed() {
        let merged = merge_exports("export FOO=bar", SENTINEL, &exports()).unwrap();
        assert!(merged.contains("bar\n# Added by rocstrap"));
    }

    #[test]
    fn test_ensure_exports_on_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".profile");

        assert_eq!(
            ensure_exports(&path, SENTINEL, &exports()).unwrap(),
            ProfileOutcome::Written
        );
        let first = std::fs::read_to_string(&path).unwrap();

        assert_eq!(
            ensure_exports(&path, SENTINEL, &exports()).unwrap(),
            ProfileOutcome::Converged
        );
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_exports_completes_partial_block() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".profile");
        std::fs::write(
            &path,
            format!("{SENTINEL}\nexport HSA_OVERRIDE_GFX_VERSION=11.0.0\n"),
        )
        .unwrap();

        assert_eq!(
            ensure_exports(&path, SENTINEL, &exports()).unwrap(),
            ProfileOutcome::Completed
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(SENTINEL).count(), 1);
        assert!(content.contains("export PATH=$PATH:/opt/rocm/bin"));
    }
}
