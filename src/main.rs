//! claw - a minimal declarative build orchestrator for C executables
//!
//! Reads a `build.claw` descriptor declaring named targets and shared
//! environment variables, then drives `cc` once per target with a fixed,
//! order-sensitive flag set.
//!
//! ## Architecture
//!
//! ```text
//! CLI → descriptor parser → BuildPlan → flag assembler → cc subprocess
//! ```

mod build;
mod cli;
mod commands;
mod descriptor;
mod error;
mod exec;
mod utils;

use clap::Parser;

use cli::Cli;
use error::ClawError;
use utils::terminal::print_error;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        match err.downcast_ref::<ClawError>() {
            Some(claw_err) => claw_err.display_with_hints(),
            None => print_error(&format!("{err:#}")),
        }
        std::process::exit(1);
    }
}
