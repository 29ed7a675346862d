//! Blocking yes/no confirmations
//!
//! All interactive decision points go through here so `--yes` can bypass
//! them uniformly. A negative answer is a decision, not an error.

use inquire::Confirm;

use crate::error::Result;

pub fn confirm(question: &str, default: bool, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    let answer = Confirm::new(question)
        .with_default(default)
        .with_help_message("Press Enter for the default answer")
        .prompt()?;
    Ok(answer)
}
