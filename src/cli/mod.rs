//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - provision: Provision command arguments
//! - status: Status command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod provision;
pub mod status;

pub use completions::CompletionsArgs;
pub use provision::ProvisionArgs;
pub use status::StatusArgs;

/// rocstrap - ROCm + ComfyUI stack provisioner
#[derive(Parser, Debug)]
#[command(
    name = "rocstrap",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Idempotent provisioner for a ROCm + ComfyUI stack on Ubuntu",
    long_about = "rocstrap converges a single machine onto a working ROCm + ComfyUI stack: \
                  kernel driver, compute runtime, GPU groups, shell environment, application \
                  checkout, Python environment and launch scripts. Every run re-inspects the \
                  host and performs only the minimal missing actions.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  rocstrap status                 \x1b[90m# Inspect without changing anything\x1b[0m\n   \
                  rocstrap provision              \x1b[90m# Converge the whole stack\x1b[0m\n   \
                  rocstrap provision --dry-run    \x1b[90m# Report what a run would do\x1b[0m\n   \
                  rocstrap provision --yes        \x1b[90m# Unattended run\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration override file (defaults to ./rocstrap.yaml when present)
    #[arg(long, short = 'c', global = true, env = "ROCSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and converge the whole stack
    Provision(ProvisionArgs),

    /// Report the observed state of every component without changing anything
    Status(StatusArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_status() {
        let cli = Cli::try_parse_from(["rocstrap", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["rocstrap", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli =
            Cli::try_parse_from(["rocstrap", "-v", "-c", "/tmp/stack.yaml", "status"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/stack.yaml")));
    }

    #[test]
    #[serial_test::serial]
    fn test_cli_config_from_env() {
        unsafe {
            std::env::set_var("ROCSTRAP_CONFIG", "/tmp/env-config.yaml");
        }
        let cli = Cli::try_parse_from(["rocstrap", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/env-config.yaml")));
        unsafe {
            std::env::remove_var("ROCSTRAP_CONFIG");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_cli_config_flag_overrides_env() {
        unsafe {
            std::env::set_var("ROCSTRAP_CONFIG", "/tmp/env-config.yaml");
        }
        let cli = Cli::try_parse_from(["rocstrap", "-c", "/tmp/flag-config.yaml", "status"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/flag-config.yaml")));
        unsafe {
            std::env::remove_var("ROCSTRAP_CONFIG");
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["rocstrap", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "bash"),
            _ => panic!("Expected Completions command"),
        }
    }
}
