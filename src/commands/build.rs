//! Build command implementation

use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::build::{self, BuildContext, BuildKind, BuildOptions};
use crate::commands::list::print_environment;
use crate::descriptor::{BuildPlan, DESCRIPTOR_FILE};
use crate::utils::paths::find_project_root;
use crate::utils::terminal::print_success;

/// Build one named target, or all targets in descriptor order
#[derive(Args, Debug, Default)]
pub struct BuildCommand {
    /// Target to build; omit to build every target in declaration order
    pub target: Option<String>,

    /// Build kind selecting the optimization/debug-info flags
    #[arg(long, value_enum, default_value_t = BuildKind::Debug)]
    pub kind: BuildKind,

    /// Shorthand for --kind release
    #[arg(long, conflicts_with = "kind")]
    pub release: bool,

    /// Enable the compiler's static analysis pass
    #[arg(long)]
    pub analyzer: bool,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let started = Instant::now();

        let project_root = find_project_root()?;
        let plan = BuildPlan::load(&project_root.join(DESCRIPTOR_FILE))?;

        let kind = if self.release {
            BuildKind::Release
        } else {
            self.kind
        };

        print_environment(&plan.environment);
        println!();
        println!("make [{kind}] build");
        println!();

        let options = BuildOptions {
            kind,
            target: self.target,
            analyzer: self.analyzer,
            verbose,
        };
        let ctx = BuildContext::new(project_root, plan, options);
        build::execute(&ctx)?;

        print_success(&format!(
            "built in {:.2}s",
            started.elapsed().as_secs_f64()
        ));
        Ok(())
    }
}
