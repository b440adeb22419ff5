//! List command implementation

use std::collections::HashMap;

use anyhow::Result;
use clap::Args;

use crate::descriptor::{BuildPlan, DESCRIPTOR_FILE};
use crate::utils::paths::find_project_root;

/// List the environment and targets declared in the descriptor
#[derive(Args, Debug)]
pub struct ListCommand {}

impl ListCommand {
    /// Execute the list command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let plan = BuildPlan::load(&project_root.join(DESCRIPTOR_FILE))?;

        print_environment(&plan.environment);
        println!();
        println!("targets:");
        for target in &plan.targets {
            println!("  {}", target.name);
            if verbose {
                println!("    root: {}", target.root_source_file);
                if !target.links.is_empty() {
                    println!("    links: {}", target.links.join(", "));
                }
            }
        }
        Ok(())
    }
}

/// Print the shared environment block, sorted by name for stable output
pub fn print_environment(environment: &HashMap<String, String>) {
    println!("env:");
    if environment.is_empty() {
        println!("  (none)");
        return;
    }

    let mut entries: Vec<_> = environment.iter().collect();
    entries.sort();
    for (name, value) in entries {
        println!("  {name}: {value}");
    }
}
