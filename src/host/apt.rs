//! Parsing of `apt-cache policy` output
//!
//! The policy block looks like:
//!
//! ```text
//! amdgpu-dkms:
//!   Installed: 1:6.8.5.60204-1
//!   Candidate: 1:6.10.5.60204-2
//!   Version table:
//! ```
//!
//! `(none)` in either field means absent; both fields are treated as
//! opaque strings (no version ordering is ever applied to them).

use super::PkgPolicy;

/// Extract installed/candidate fields from `apt-cache policy` output.
///
/// Unparseable output yields an empty policy, which classifies as not
/// installed; absence is an expected outcome, not an error.
pub fn parse_policy(output: &str) -> PkgPolicy {
    let mut policy = PkgPolicy::default();
    for line in output.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("Installed:") {
            policy.installed = clean_field(value);
        } else if let Some(value) = line.strip_prefix("Candidate:") {
            policy.candidate = clean_field(value);
        }
    }
    policy
}

fn clean_field(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "(none)" {
        None
    } else {
        Some(value.to_string())
    }
}
