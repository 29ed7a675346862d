//! Status command implementation
//!
//! Read-only: one inspection pass, no metadata refresh, no prompts. The
//! table and the JSON form render the same snapshot.

use std::path::PathBuf;

use crate::cli::StatusArgs;
use crate::config::StackConfig;
use crate::error::{Result, RocstrapError};
use crate::host::SystemHost;
use crate::{inspect, report};

pub fn run(config_path: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let config = StackConfig::load(config_path.as_deref())?;
    let mut host = SystemHost::new();

    let snapshot = inspect::snapshot(&mut host, &config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| {
            RocstrapError::IoError {
                message: e.to_string(),
            }
        })?;
        println!("{json}");
    } else {
        report::print_table(&snapshot);
    }

    Ok(())
}
