//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{build::BuildCommand, clean::CleanCommand, list::ListCommand};

/// claw - declarative C build orchestrator
///
/// Reads the build.claw descriptor and drives the C compiler once per
/// target. Without a subcommand, every target is built in debug kind.
#[derive(Parser, Debug)]
#[command(name = "claw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build one named target, or all targets in descriptor order
    Build(BuildCommand),

    /// List the environment and targets declared in the descriptor
    List(ListCommand),

    /// Remove build output directories
    Clean(CleanCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // Execute the subcommand; no subcommand means "build everything"
        match self.command {
            Some(Commands::Build(cmd)) => cmd.execute(self.verbose),
            Some(Commands::List(cmd)) => cmd.execute(self.verbose),
            Some(Commands::Clean(cmd)) => cmd.execute(self.verbose),
            None => BuildCommand::default().execute(self.verbose),
        }
    }
}
