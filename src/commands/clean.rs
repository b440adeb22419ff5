//! Clean command implementation

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Args;
use walkdir::WalkDir;

use crate::build::BUILD_DIR;
use crate::descriptor::{BuildPlan, DESCRIPTOR_FILE};
use crate::error::ClawError;
use crate::utils::paths::find_project_root;
use crate::utils::terminal::{print_info, print_warning};

/// Remove build output directories
#[derive(Args, Debug)]
pub struct CleanCommand {
    /// Target whose output directory to remove; omit to remove the whole
    /// build root
    pub target: Option<String>,

    /// Show what would be deleted
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

struct BuildDirCleaner {
    dry_run: bool,
    skip_confirm: bool,
    cleaned_dirs: Vec<String>,
    cleaned_size: u64,
    failed_dirs: Vec<(String, String)>,
}

impl BuildDirCleaner {
    fn new(dry_run: bool, skip_confirm: bool) -> Self {
        Self {
            dry_run,
            skip_confirm,
            cleaned_dirs: Vec::new(),
            cleaned_size: 0,
            failed_dirs: Vec::new(),
        }
    }

    fn get_dir_size(path: &Path) -> u64 {
        let mut total_size = 0u64;
        for entry in WalkDir::new(path).into_iter().flatten() {
            if let Ok(metadata) = entry.metadata() {
                if metadata.is_file() {
                    total_size += metadata.len();
                }
            }
        }
        total_size
    }

    fn format_size(size_bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = size_bytes as f64;
        let mut unit_idx = 0;

        while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
            size /= 1024.0;
            unit_idx += 1;
        }

        format!("{:.2} {}", size, UNITS[unit_idx])
    }

    fn confirm_clean(&self, message: &str) -> bool {
        if self.skip_confirm || self.dry_run {
            return true;
        }

        print!("{message} (y/N): ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        let input = input.trim().to_lowercase();

        input == "y" || input == "yes"
    }

    fn remove_directory(&mut self, dir_path: &Path, display_name: &str) {
        if !dir_path.is_dir() {
            print_warning(&format!("{display_name} does not exist, nothing to clean"));
            return;
        }

        if !self.confirm_clean(&format!("remove {display_name}?")) {
            println!("  skipped: {display_name}");
            return;
        }

        let size = Self::get_dir_size(dir_path);

        if self.dry_run {
            println!(
                "  [dry run] would remove: {} ({})",
                display_name,
                Self::format_size(size)
            );
            return;
        }

        match fs::remove_dir_all(dir_path) {
            Ok(()) => {
                println!("  removed: {} ({})", display_name, Self::format_size(size));
                self.cleaned_dirs.push(display_name.to_string());
                self.cleaned_size += size;
            }
            Err(err) => {
                self.failed_dirs
                    .push((display_name.to_string(), err.to_string()));
            }
        }
    }

    fn print_summary(&self) {
        if self.dry_run {
            print_info("dry run, nothing was deleted");
            return;
        }

        if !self.cleaned_dirs.is_empty() {
            print_info(&format!(
                "cleaned {} directories, freed {}",
                self.cleaned_dirs.len(),
                Self::format_size(self.cleaned_size)
            ));
        }

        for (name, error) in &self.failed_dirs {
            print_warning(&format!("failed to remove {name}: {error}"));
        }
    }
}

impl CleanCommand {
    /// Execute the clean command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let build_root = project_root.join(BUILD_DIR);

        let mut cleaner = BuildDirCleaner::new(self.dry_run, self.yes);

        match &self.target {
            Some(name) => {
                // validate the name against the descriptor so a typo does
                // not silently clean nothing
                let plan = BuildPlan::load(&project_root.join(DESCRIPTOR_FILE))?;
                if plan.find_target(name).is_none() {
                    return Err(
                        ClawError::unknown_target(name.as_str(), plan.target_names()).into(),
                    );
                }
                cleaner.remove_directory(
                    &build_root.join(name),
                    &format!("{BUILD_DIR}/{name}/"),
                );
            }
            None => {
                cleaner.remove_directory(&build_root, &format!("{BUILD_DIR}/"));
            }
        }

        cleaner.print_summary();

        if !cleaner.failed_dirs.is_empty() {
            anyhow::bail!("failed to clean {} directories", cleaner.failed_dirs.len());
        }
        Ok(())
    }
}
