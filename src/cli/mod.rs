//! Command-line interface for bugdesk.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bugdesk - a small multi-user bug tracker
#[derive(Parser)]
#[command(name = "bugdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create a default config.toml in the working directory
    #[command(alias = "--init")]
    Init,

    /// Write every bug as CSV without starting the server
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    #[must_use]
    pub fn command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["bugdesk"]).unwrap();
        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn test_export_output_flag() {
        let cli = Cli::try_parse_from(["bugdesk", "export", "-o", "out.csv"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Export {
                output: Some(PathBuf::from("out.csv"))
            }
        );

        let cli = Cli::try_parse_from(["bugdesk", "export"]).unwrap();
        assert_eq!(cli.command(), Commands::Export { output: None });
    }
}
