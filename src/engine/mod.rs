//! Convergence engine
//!
//! A straight-line sequence of component-converge calls in a fixed total
//! order reflecting the real dependency constraints (driver before runtime,
//! checkout before venv, venv before torch). Each step re-probes the host
//! at the moment of action, matches the observed [`ComponentState`]
//! exhaustively, performs the minimal action and records exactly one
//! outcome. Any failing step aborts the run immediately; there is no
//! rollback, a re-run converges the remainder.
//!
//! [`ComponentState`]: crate::domain::ComponentState

mod checkout;
mod context;
mod driver;
mod layout;
mod packages;
mod python;
mod runtime;
mod scripts;


pub use context::RunContext;

use crate::config::StackConfig;
use crate::error::Result;
use crate::host::Host;

/// Run every component converge step in order, fail-fast
pub fn converge_all(
    ctx: &mut RunContext,
    host: &mut dyn Host,
    config: &StackConfig,
) -> Result<()> {
    packages::converge(ctx, host, config)?;
    driver::converge(ctx, host, config)?;
    runtime::converge(ctx, host, config)?;
    runtime::converge_groups(ctx, host, config)?;
    runtime::converge_profile(ctx, config)?;
    checkout::converge_app(ctx, host, config)?;
    python::converge_venv(ctx, host, config)?;
    python::converge_torch(ctx, host, config)?;
    checkout::converge_plugin(ctx, host, config)?;
    layout::converge(ctx, config)?;
    scripts::converge(ctx, config)?;
    Ok(())
}
