//! Build orchestration
//!
//! Selects which target(s) to build, prepares output directories and hands
//! the assembled argument vector to the compiler subprocess. Targets build
//! one at a time, in descriptor order, and the first failure aborts the
//! rest of the run.

pub mod flags;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::ValueEnum;

use crate::descriptor::{BuildPlan, BuildTarget};
use crate::error::{hints, ClawError};
use crate::exec::subprocess::{command_exists, run_command};
use crate::utils::paths::ensure_dir;
use flags::{assemble, CompileSpec, FlagConfig};

/// The externally supplied compiler, driven once per target
pub const COMPILER: &str = "cc";

/// Source root; `#root` paths are relative to this directory
pub const SOURCE_DIR: &str = "src";

/// Build output root; each target produces `build/<name>/<name>`
pub const BUILD_DIR: &str = "build";

/// Optimization/debug-info profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BuildKind {
    #[default]
    Debug,
    Test,
    Release,
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildKind::Debug => write!(f, "debug"),
            BuildKind::Test => write!(f, "test"),
            BuildKind::Release => write!(f, "release"),
        }
    }
}

impl BuildKind {
    /// Kind-dependent flag section. `Test` and `Debug` currently share an
    /// arm; diverging them is a one-line change here.
    pub fn optimization_flags(self) -> &'static [&'static str] {
        match self {
            BuildKind::Release => &["-O2"],
            BuildKind::Debug | BuildKind::Test => &["-Og", "-ggdb"],
        }
    }
}

/// Build options from the CLI
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub kind: BuildKind,

    /// Build only this target; `None` builds all in declaration order
    pub target: Option<String>,

    /// Enable the compiler's static analysis pass
    pub analyzer: bool,

    pub verbose: bool,
}

/// Build context: the parsed plan plus everything derived once per run
#[derive(Debug)]
pub struct BuildContext {
    pub project_root: PathBuf,
    pub plan: BuildPlan,
    pub options: BuildOptions,
    pub flags: FlagConfig,
}

impl BuildContext {
    pub fn new(project_root: PathBuf, plan: BuildPlan, options: BuildOptions) -> Self {
        let flags = FlagConfig::with_analyzer(options.analyzer);
        Self {
            project_root,
            plan,
            options,
            flags,
        }
    }
}

/// Build the selected target, or every target in declaration order
pub fn execute(ctx: &BuildContext) -> Result<()> {
    if let Some(name) = &ctx.options.target {
        // resolve the name before anything touches the filesystem or
        // spawns a process
        let target = ctx
            .plan
            .find_target(name)
            .ok_or_else(|| ClawError::unknown_target(name.as_str(), ctx.plan.target_names()))?;
        ensure_compiler()?;
        return build_target(ctx, target);
    }

    ensure_compiler()?;
    for target in &ctx.plan.targets {
        // fail fast: the first failing target aborts the remaining ones;
        // already-built artifacts stay on disk
        build_target(ctx, target)
            .map_err(|err| ClawError::target_failure(target.name.as_str(), err))?;
    }
    Ok(())
}

fn ensure_compiler() -> Result<()> {
    if !command_exists(COMPILER) {
        return Err(
            ClawError::missing_tool(COMPILER, "compiling build targets", hints::compiler())
                .into(),
        );
    }
    Ok(())
}

/// Derive the per-target compile spec. Paths stay relative to the project
/// root; the compiler subprocess runs with the root as its working
/// directory.
fn compile_spec(ctx: &BuildContext, target: &BuildTarget) -> CompileSpec {
    let out_dir = Path::new(BUILD_DIR).join(&target.name);

    CompileSpec {
        source_file: Path::new(SOURCE_DIR).join(&target.root_source_file),
        out_path: out_dir.join(&target.name),
        links: target.links.clone(),
        link_search: ctx
            .plan
            .environment
            .get("link.dir")
            .filter(|dir| !dir.is_empty())
            .cloned(),
        kind: ctx.options.kind,
    }
}

fn build_target(ctx: &BuildContext, target: &BuildTarget) -> Result<()> {
    println!("build [{}]: (link {:?})", target.name, target.links);

    let spec = compile_spec(ctx, target);
    ensure_dir(&ctx.project_root.join(BUILD_DIR).join(&target.name))?;

    let args = assemble(&spec, &ctx.flags);
    if ctx.options.verbose {
        eprintln!("{} {}", COMPILER, args.join(" "));
    }

    let result = run_command(COMPILER, &args, &ctx.project_root)?;
    if !result.success {
        bail!("{COMPILER} exited with status {}", result.exit_code);
    }
    if ctx.options.verbose {
        eprintln!("compiled {} in {:.2}s", target.name, result.duration.as_secs_f64());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parser;

    fn context(text: &str, options: BuildOptions) -> BuildContext {
        let plan = parser::parse(text).unwrap();
        BuildContext::new(PathBuf::from("."), plan, options)
    }

    #[test]
    fn test_unknown_target_fails_before_any_build() {
        let ctx = context(
            "#build one\n#root one.c\n}\n",
            BuildOptions {
                target: Some("nosuch".to_string()),
                ..BuildOptions::default()
            },
        );

        let err = execute(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "unknown build target: nosuch");
        match err.downcast_ref::<ClawError>() {
            Some(ClawError::UnknownTarget { known, .. }) => {
                assert_eq!(known.as_slice(), ["one"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_compile_spec_paths() {
        let ctx = context(
            "#build tool\n#root main.c\n#link m\n}\n",
            BuildOptions::default(),
        );

        let spec = compile_spec(&ctx, &ctx.plan.targets[0]);
        assert_eq!(spec.source_file, Path::new("src").join("main.c"));
        assert_eq!(
            spec.out_path,
            Path::new("build").join("tool").join("tool")
        );
        assert_eq!(spec.links, vec!["m"]);
        assert_eq!(spec.link_search, None);
        assert_eq!(spec.kind, BuildKind::Debug);
    }

    #[test]
    fn test_compile_spec_picks_up_link_dir() {
        let ctx = context(
            "#set link.dir = ./libs\n#build tool\n#root main.c\n}\n",
            BuildOptions::default(),
        );

        let spec = compile_spec(&ctx, &ctx.plan.targets[0]);
        assert_eq!(spec.link_search.as_deref(), Some("./libs"));
    }

    #[test]
    fn test_build_kind_display_and_flag_table() {
        assert_eq!(BuildKind::Debug.to_string(), "debug");
        assert_eq!(BuildKind::Test.to_string(), "test");
        assert_eq!(BuildKind::Release.to_string(), "release");

        assert_eq!(BuildKind::Release.optimization_flags(), ["-O2"]);
        assert_eq!(BuildKind::Debug.optimization_flags(), ["-Og", "-ggdb"]);
        assert_eq!(
            BuildKind::Test.optimization_flags(),
            BuildKind::Debug.optimization_flags()
        );
    }
}
