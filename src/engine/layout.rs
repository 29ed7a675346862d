//! Model directory layout convergence
//!
//! Missing directories are always created, but only a wholly-missing set
//! counts as a fresh install; topping up a partially present layout stays
//! a skip so re-runs read as no-ops.

use super::RunContext;
use crate::artifacts;
use crate::config::StackConfig;
use crate::domain::ComponentId;
use crate::error::Result;

pub fn converge(ctx: &mut RunContext, config: &StackConfig) -> Result<()> {
    let (all_missing, created) =
        artifacts::create_model_dirs(&config.install_root, &config.model_dirs)?;

    if all_missing && created > 0 {
        ctx.record_installed(
            ComponentId::ModelDirs,
            format!("{created} directories under {}", config.install_root.display()),
        );
    } else if created > 0 {
        ctx.record_skipped(
            ComponentId::ModelDirs,
            format!("{created} missing directories re-created"),
        );
    } else {
        ctx.record_skipped(ComponentId::ModelDirs, "all present");
    }
    Ok(())
}
