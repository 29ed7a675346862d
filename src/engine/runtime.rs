//! Compute runtime, GPU group membership and shell environment
//!
//! Three components converge here: the ROCm meta package (versioned, same
//! weak-equality rule as the driver), the render/video group membership
//! (condition-based; changes only take effect after re-login, so they flag
//! reboot-required) and the sentinel-guarded profile export block.

use super::RunContext;
use crate::config::StackConfig;
use crate::domain::{ComponentId, ComponentState, classify};
use crate::error::Result;
use crate::host::Host;
use crate::profile::{self, ProfileOutcome};

pub fn converge(ctx: &mut RunContext, host: &mut dyn Host, config: &StackConfig) -> Result<()> {
    let policy = host.apt_policy(&config.runtime_package)?;
    let state = classify(policy.installed.as_deref(), policy.candidate.as_deref());

    match state {
        ComponentState::NotInstalled => {
            host.apt_install(std::slice::from_ref(&config.runtime_package))?;
            let installed = host
                .apt_policy(&config.runtime_package)?
                .installed
                .unwrap_or_else(|| "unknown".to_string());
            ctx.record_installed(
                ComponentId::Runtime,
                format!("{} {}", config.runtime_package, installed),
            );
        }
        ComponentState::Stale { current, available } => {
            host.apt_install(std::slice::from_ref(&config.runtime_package))?;
            ctx.record_updated(ComponentId::Runtime, current, available);
        }
        ComponentState::Current { version } => {
            ctx.record_skipped(ComponentId::Runtime, format!("already at {version}"));
        }
    }

    Ok(())
}

pub fn converge_groups(
    ctx: &mut RunContext,
    host: &mut dyn Host,
    config: &StackConfig,
) -> Result<()> {
    let current = host.user_groups()?;
    let missing: Vec<String> = config
        .gpu_groups
        .iter()
        .filter(|g| !current.contains(g))
        .cloned()
        .collect();

    if missing.is_empty() {
        ctx.record_skipped(
            ComponentId::UserGroups,
            format!("member of {}", config.gpu_groups.join(", ")),
        );
        return Ok(());
    }

    let had_any = config.gpu_groups.iter().any(|g| current.contains(g));
    host.add_user_to_groups(&missing)?;
    if had_any {
        let before: Vec<&str> = config
            .gpu_groups
            .iter()
            .filter(|g| current.contains(*g))
            .map(String::as_str)
            .collect();
        ctx.record_updated(
            ComponentId::UserGroups,
            before.join(", "),
            config.gpu_groups.join(", "),
        );
    } else {
        ctx.record_installed(ComponentId::UserGroups, missing.join(", "));
    }
    ctx.require_reboot();
    Ok(())
}

pub fn converge_profile(ctx: &mut RunContext, config: &StackConfig) -> Result<()> {
    let outcome = profile::ensure_exports(
        &config.profile_path,
        &config.profile_sentinel,
        &config.profile_exports,
    )?;

    match outcome {
        ProfileOutcome::Converged => {
            ctx.record_skipped(ComponentId::ShellProfile, "export block present");
        }
        ProfileOutcome::Completed => {
            ctx.record_updated(
                ComponentId::ShellProfile,
                "partial export block",
                "complete export block",
            );
        }
        ProfileOutcome::Written => {
            ctx.record_installed(
                ComponentId::ShellProfile,
                format!("export block in {}", config.profile_path.display()),
            );
        }
    }
    Ok(())
}
