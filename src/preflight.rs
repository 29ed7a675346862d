//! Preflight checks: OS identity/version and target hardware
//!
//! Mismatches are survivable with explicit operator consent; a declined
//! confirmation exits the run cleanly.

use console::Style;

use crate::config::StackConfig;
use crate::error::Result;
use crate::host::Host;
use crate::prompt;

#[derive(Debug, PartialEq, Eq)]
pub enum PreflightDecision {
    Proceed,
    Declined,
}

pub fn run(
    host: &mut dyn Host,
    config: &StackConfig,
    assume_yes: bool,
) -> Result<PreflightDecision> {
    let os = host.os_release()?;
    if os.id == config.target_os_id && os.version_id == config.target_os_version {
        println!(
            "{} {}",
            Style::new().green().apply_to("OS:"),
            os.pretty_name
        );
    } else {
        println!(
            "{} detected {} ({} {}), expected {} {}",
            Style::new().yellow().apply_to("OS mismatch:"),
            os.pretty_name,
            os.id,
            os.version_id,
            config.target_os_id,
            config.target_os_version
        );
        if !prompt::confirm("Continue on this OS anyway?", false, assume_yes)? {
            return Ok(PreflightDecision::Declined);
        }
    }

    if host.has_amd_adapter()? {
        println!("{} AMD display adapter found", Style::new().green().apply_to("GPU:"));
    } else {
        println!(
            "{} no AMD display adapter detected",
            Style::new().yellow().apply_to("GPU:")
        );
        if !prompt::confirm("Continue without a detected AMD GPU?", false, assume_yes)? {
            return Ok(PreflightDecision::Declined);
        }
    }

    Ok(PreflightDecision::Proceed)
}
