//! Provision command implementation
//!
//! Single-pass pipeline, in order:
//! 1. Preflight checks (OS identity, hardware), confirm on mismatch
//! 2. Package-index metadata refresh (unless --skip-refresh)
//! 3. One inspection pass, rendered as a status table
//! 4. Pre-install confirmation (unless --yes), or stop at --dry-run
//! 5. Fixed-order convergence, fail-fast
//! 6. Summary and, when disruptive changes happened, the reboot prompt

use std::path::PathBuf;

use crate::cli::ProvisionArgs;
use crate::config::StackConfig;
use crate::engine::{self, RunContext};
use crate::error::Result;
use crate::host::{Host, SystemHost};
use crate::preflight::{self, PreflightDecision};
use crate::progress::Spinner;
use crate::prompt;
use crate::{inspect, report, summary};

pub fn run(config_path: Option<PathBuf>, args: ProvisionArgs) -> Result<()> {
    let config = StackConfig::load(config_path.as_deref())?;
    let mut host = SystemHost::new();

    if preflight::run(&mut host, &config, args.yes)? == PreflightDecision::Declined {
        println!("Aborted.");
        return Ok(());
    }

    if !args.skip_refresh {
        println!("Refreshing package index...");
        host.apt_refresh()?;
    }

    let spinner = Spinner::new("Inspecting stack state...");
    let snapshot = inspect::snapshot(&mut host, &config)?;
    spinner.finish_and_clear();
    report::print_table(&snapshot);

    if args.dry_run {
        return Ok(());
    }

    if !prompt::confirm("Proceed with provisioning?", true, args.yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let mut ctx = RunContext::new();
    engine::converge_all(&mut ctx, &mut host, &config)?;

    summary::print(&ctx);
    summary::follow_up(&ctx, &mut host, args.yes)
}
