//! Version command implementation

use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("rocstrap {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
