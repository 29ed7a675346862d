//! Launch/update script convergence
//!
//! Scripts are rewritten unconditionally; overwrite-with-identical-content
//! is the idempotency mechanism, so only their initial appearance is
//! recorded as an install.

use super::RunContext;
use crate::artifacts;
use crate::config::StackConfig;
use crate::domain::ComponentId;
use crate::error::Result;

pub fn converge(ctx: &mut RunContext, config: &StackConfig) -> Result<()> {
    let run_path = config.install_root.join(&config.run_script);
    let update_path = config.install_root.join(&config.update_script);
    let existed_before = run_path.exists() && update_path.exists();

    artifacts::write_scripts(config)?;

    if existed_before {
        ctx.record_skipped(ComponentId::LaunchScripts, "regenerated in place");
    } else {
        ctx.record_installed(
            ComponentId::LaunchScripts,
            format!("{}, {}", config.run_script, config.update_script),
        );
    }
    Ok(())
}
