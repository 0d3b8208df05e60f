//! CLI module for clipsub
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// clipsub
///
/// Cuts social-media clips out of long videos along subtitle timelines and
/// burns the rebased subtitles into them.
#[derive(Parser, Debug)]
#[command(name = "clipsub")]
#[command(about = "Subtitle-driven clip extraction and subtitle burn-in")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./clipsub.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the segment covered by a subtitle file
    Clip(args::ClipArgs),
    /// Burn a subtitle file into a trimmed clip
    Burn(args::BurnArgs),
    /// Report the window and gate verdict for a subtitle file
    Inspect(args::InspectArgs),
    /// Extract and burn every video against every subtitle file
    Run(args::RunArgs),
    /// Burn every trimmed clip with its matching subtitle file
    BurnAll(args::BurnAllArgs),
    /// Wait until a file exists and can be opened for writing
    Wait(args::WaitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_burn_all_with_globals() {
        let cli = Cli::try_parse_from([
            "clipsub",
            "burn-all",
            "--clips-dir",
            "clips",
            "--subtitles-dir",
            "subs",
            "--output-dir",
            "final",
            "--json-logs",
        ])
        .unwrap();
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Commands::BurnAll(_)));
    }
}
