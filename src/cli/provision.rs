use clap::Parser;

/// Arguments for the provision command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Full run with prompts:\n    rocstrap provision\n\n\
                   Unattended run:\n    rocstrap provision --yes\n\n\
                   Report only, change nothing:\n    rocstrap provision --dry-run --yes\n\n\
                   Skip the apt metadata refresh:\n    rocstrap provision --skip-refresh")]
pub struct ProvisionArgs {
    /// Answer yes to every confirmation (the reboot prompt becomes a notice)
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show the status report and stop before any convergence action
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the package-index metadata refresh before inspecting
    #[arg(long)]
    pub skip_refresh: bool,
}
