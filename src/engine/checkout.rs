//! Application and plugin checkout convergence
//!
//! A checkout is stale when its local HEAD differs from the remote HEAD of
//! the first branch that resolves (primary branch name, then fallback).
//! Updates are strictly fast-forward. When the remote cannot be probed and
//! a checkout exists, the component is treated as current and skipped;
//! the next run with connectivity reconciles it.

use std::path::Path;

use super::RunContext;
use crate::config::StackConfig;
use crate::domain::{ComponentId, short_sha};
use crate::error::Result;
use crate::host::Host;

pub fn converge_app(ctx: &mut RunContext, host: &mut dyn Host, config: &StackConfig) -> Result<()> {
    converge_checkout(
        ctx,
        host,
        ComponentId::AppCheckout,
        &config.app_repo_url,
        &config.install_root,
        &config.branch_fallback,
    )
}

pub fn converge_plugin(
    ctx: &mut RunContext,
    host: &mut dyn Host,
    config: &StackConfig,
) -> Result<()> {
    converge_checkout(
        ctx,
        host,
        ComponentId::PluginCheckout,
        &config.plugin_repo_url,
        &config.plugin_dir(),
        &config.branch_fallback,
    )
}

fn converge_checkout(
    ctx: &mut RunContext,
    host: &mut dyn Host,
    component: ComponentId,
    url: &str,
    dir: &Path,
    branches: &[String],
) -> Result<()> {
    let local = host.git_local_head(dir)?;
    let remote = host.git_remote_head(url, branches)?;

    match local {
        None => {
            let branch = remote.as_ref().map(|(branch, _)| branch.as_str());
            host.git_clone(url, dir, branch)?;
            let head = host
                .git_local_head(dir)?
                .map(|sha| short_sha(&sha))
                .unwrap_or_else(|| "HEAD".to_string());
            ctx.record_installed(component, format!("{url} at {head}"));
        }
        Some(local_sha) => match remote {
            Some((_, remote_sha)) if remote_sha != local_sha => {
                host.git_pull_ff(dir)?;
                ctx.record_updated(component, short_sha(&local_sha), short_sha(&remote_sha));
            }
            _ => {
                ctx.record_skipped(
                    component,
                    format!("up to date at {}", short_sha(&local_sha)),
                );
            }
        },
    }

    Ok(())
}
