//! Kernel driver convergence
//!
//! Installing or updating the DKMS driver touches kernel modules, so both
//! paths flag the run as reboot-required. A fresh machine first gets the
//! vendor bootstrap .deb that configures the apt repository, followed by a
//! metadata refresh so the driver candidate becomes visible.

use super::RunContext;
use crate::config::StackConfig;
use crate::domain::{ComponentId, ComponentState, classify};
use crate::error::Result;
use crate::host::Host;

pub fn converge(ctx: &mut RunContext, host: &mut dyn Host, config: &StackConfig) -> Result<()> {
    let policy = host.apt_policy(&config.driver_package)?;
    let state = classify(policy.installed.as_deref(), policy.candidate.as_deref());

    match state {
        ComponentState::NotInstalled => {
            ensure_vendor_repo(host, config)?;
            host.apt_install(std::slice::from_ref(&config.driver_package))?;
            let installed = host
                .apt_policy(&config.driver_package)?
                .installed
                .unwrap_or_else(|| "unknown".to_string());
            ctx.record_installed(
                ComponentId::Driver,
                format!("{} {}", config.driver_package, installed),
            );
            ctx.require_reboot();
        }
        ComponentState::Stale { current, available } => {
            host.apt_install(std::slice::from_ref(&config.driver_package))?;
            ctx.record_updated(ComponentId::Driver, current, available);
            ctx.require_reboot();
        }
        ComponentState::Current { version } => {
            ctx.record_skipped(ComponentId::Driver, format!("already at {version}"));
        }
    }

    Ok(())
}

/// Make sure the vendor apt repository is configured
fn ensure_vendor_repo(host: &mut dyn Host, config: &StackConfig) -> Result<()> {
    if host.apt_policy(&config.installer_package)?.installed.is_some() {
        return Ok(());
    }

    let file_name = config
        .installer_deb_url
        .rsplit('/')
        .next()
        .unwrap_or("amdgpu-install.deb");
    let dest = std::env::temp_dir().join(file_name);
    host.download(&config.installer_deb_url, &dest)?;
    host.apt_install_deb(&dest)?;
    // The new repository's packages only become visible after a refresh
    host.apt_refresh()?;
    Ok(())
}
