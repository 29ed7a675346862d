use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Human-readable table:\n    rocstrap status\n\n\
                  Machine-readable snapshot:\n    rocstrap status --json")]
pub struct StatusArgs {
    /// Emit the snapshot as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_status() {
        let cli = Cli::try_parse_from(["rocstrap", "status"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert!(!args.json),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parsing_status_json() {
        let cli = Cli::try_parse_from(["rocstrap", "status", "--json"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert!(args.json),
            _ => panic!("Expected Status command"),
        }
    }
}
