//! rocstrap - ROCm + ComfyUI stack provisioner
//!
//! A single-machine provisioner that converges the GPU driver, compute
//! runtime, user permissions, shell environment, application checkout,
//! Python environment and launch scripts onto their desired state, and
//! reports exactly what it installed, updated or skipped.

use clap::Parser;

mod artifacts;
mod cli;
mod commands;
mod config;
mod domain;
mod engine;
mod error;
mod host;
mod inspect;
mod preflight;
mod profile;
mod progress;
mod prompt;
mod report;
mod summary;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::run(cli.config, args),
        Commands::Status(args) => commands::status::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
