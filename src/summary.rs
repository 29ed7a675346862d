//! End-of-run summary and reboot follow-up
//!
//! Restates every outcome grouped by kind in the same skip/install/update
//! vocabulary used during the run, then handles the reboot prompt when a
//! disruptive action occurred.

use console::Style;

use crate::domain::Outcome;
use crate::engine::RunContext;
use crate::error::Result;
use crate::host::Host;
use crate::prompt;

pub fn print(ctx: &RunContext) {
    println!();
    println!("{}", Style::new().bold().apply_to("Summary"));

    print_group("Installed", &ctx.installed, Style::new().green());
    print_group("Updated", &ctx.updated, Style::new().yellow());
    print_group("Skipped", &ctx.skipped, Style::new().dim());

    if !ctx.changed() {
        println!();
        println!("Everything was already up to date.");
    }
}

fn print_group(heading: &str, outcomes: &[Outcome], style: Style) {
    if outcomes.is_empty() {
        return;
    }
    println!("  {}", style.bold().apply_to(heading));
    for outcome in outcomes {
        println!("    {} ({})", outcome.component.label(), outcome.detail);
    }
}

/// Prompt for an immediate restart when driver or group changes demand one.
///
/// With `--yes` the prompt is suppressed and a notice printed instead; an
/// unattended run must not reboot the machine out from under its operator.
pub fn follow_up(ctx: &RunContext, host: &mut dyn Host, assume_yes: bool) -> Result<()> {
    if !ctx.reboot_required() {
        return Ok(());
    }

    println!();
    println!(
        "{}",
        Style::new().yellow().apply_to(
            "Driver or group membership changed; a restart is required before the GPU is usable."
        )
    );

    if assume_yes {
        println!("Run 'sudo reboot' when convenient.");
        return Ok(());
    }

    if prompt::confirm("Reboot now?", false, false)? {
        host.reboot()?;
    } else {
        println!("Run 'sudo reboot' when convenient.");
    }
    Ok(())
}
