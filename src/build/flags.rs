//! Compiler flag assembly
//!
//! [`assemble`] is a pure transformation from a [`CompileSpec`] and an
//! immutable [`FlagConfig`] to the exact argument vector handed to the
//! compiler. Argument order is part of the contract: libraries in
//! particular must reach the linker in declaration order.

use std::path::PathBuf;

use super::{BuildKind, SOURCE_DIR};

/// Code generation flags, always present
const CODEGEN_FLAGS: &[&str] = &[
    "-fwrapv",
    "-funsigned-char",
    "-fno-asynchronous-unwind-tables",
    "-fomit-frame-pointer",
];

/// Stop after the first error
const MAX_COMPILER_ERRORS_FLAG: &str = "-fmax-errors=1";

/// Warning flags: a broad diagnostic set with a few noise categories
/// suppressed
const WARNING_FLAGS: &[&str] = &[
    "-Wall",
    "-Wextra",
    "-Wconversion",
    "-Wunreachable-code",
    "-Wshadow",
    "-Wundef",
    "-Wfloat-equal",
    "-Wformat=0",
    "-Wpointer-arith",
    "-Winit-self",
    "-Wuninitialized",
    "-Wduplicated-branches",
    "-Wduplicated-cond",
    "-Wdouble-promotion",
    "-Wstrict-prototypes",
    "-Wpointer-sign",
    "-Wswitch-default",
    "-Wshadow=local",
    "-Wno-main",
    "-Wno-shadow",
    "-Wno-unused-parameter",
    "-Wno-unused-function",
    "-Wno-unused-const-variable",
];

/// Remaining fixed flags
const OTHER_FLAGS: &[&str] = &["-Werror", "-pipe"];

/// GCC static analysis pass, enabled by `--analyzer`
const ANALYZER_FLAG: &str = "-fanalyzer";

/// Immutable flag configuration, constructed once per run and passed
/// explicitly into [`assemble`]
#[derive(Debug, Clone)]
pub struct FlagConfig {
    pub codegen: &'static [&'static str],
    pub max_errors: &'static str,
    pub warnings: &'static [&'static str],
    pub other: &'static [&'static str],

    /// Run the compiler's static analysis pass as well
    pub analyzer: bool,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            codegen: CODEGEN_FLAGS,
            max_errors: MAX_COMPILER_ERRORS_FLAG,
            warnings: WARNING_FLAGS,
            other: OTHER_FLAGS,
            analyzer: false,
        }
    }
}

impl FlagConfig {
    pub fn with_analyzer(analyzer: bool) -> Self {
        Self {
            analyzer,
            ..Self::default()
        }
    }
}

/// Everything needed to compile one executable. Derived per target,
/// consumed by [`assemble`], then discarded.
#[derive(Debug, Clone)]
pub struct CompileSpec {
    /// Entry source file, e.g. `src/main.c`
    pub source_file: PathBuf,

    /// Output executable path, e.g. `build/mytool/mytool`
    pub out_path: PathBuf,

    /// Libraries in declaration order
    pub links: Vec<String>,

    /// Library search directory from the `link.dir` environment entry
    pub link_search: Option<String>,

    pub kind: BuildKind,
}

/// Build the compiler argument vector for one target.
///
/// Concatenation order: codegen flags, the max-errors flag, warning flags,
/// other flags (plus the analyzer pass when enabled), kind-dependent
/// optimization/debug flags, the include path, the optional `-L` search
/// directory, `-o` and the output path, the source file, and one `-l` per
/// linked library.
pub fn assemble(spec: &CompileSpec, flags: &FlagConfig) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    args.extend(flags.codegen.iter().map(|f| f.to_string()));
    args.push(flags.max_errors.to_string());
    args.extend(flags.warnings.iter().map(|f| f.to_string()));
    args.extend(flags.other.iter().map(|f| f.to_string()));
    if flags.analyzer {
        args.push(ANALYZER_FLAG.to_string());
    }

    args.extend(spec.kind.optimization_flags().iter().map(|f| f.to_string()));

    args.push(format!("-I{SOURCE_DIR}"));

    if let Some(dir) = &spec.link_search {
        args.push(format!("-L{dir}"));
    }

    args.push("-o".to_string());
    args.push(spec.out_path.display().to_string());
    args.push(spec.source_file.display().to_string());

    for link in &spec.links {
        args.push(format!("-l{link}"));
    }

    args
}
