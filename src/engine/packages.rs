//! Base package prerequisites
//!
//! Presence-only convergence: whatever apt reports as not installed gets
//! installed in one transaction. Upgrading base tooling that is already
//! present is left to the distribution's own upgrade cadence; a top-up of
//! a partially present set records as an update, a wholly absent set as
//! an install.

use super::RunContext;
use crate::config::StackConfig;
use crate::domain::ComponentId;
use crate::error::Result;
use crate::host::Host;

pub fn converge(ctx: &mut RunContext, host: &mut dyn Host, config: &StackConfig) -> Result<()> {
    let mut missing = Vec::new();
    for package in &config.base_packages {
        if host.apt_policy(package)?.installed.is_none() {
            missing.push(package.clone());
        }
    }

    let total = config.base_packages.len();
    if missing.is_empty() {
        ctx.record_skipped(
            ComponentId::BasePackages,
            format!("all {total} packages present"),
        );
        return Ok(());
    }

    let present = total - missing.len();
    host.apt_install(&missing)?;
    if present == 0 {
        ctx.record_installed(ComponentId::BasePackages, missing.join(", "));
    } else {
        ctx.record_updated(
            ComponentId::BasePackages,
            format!("{present}/{total} present"),
            format!("{total}/{total} present"),
        );
    }
    Ok(())
}
