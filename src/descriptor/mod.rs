//! build.claw descriptor parsing
//!
//! The descriptor is a line-oriented format: `#set` assigns a shared
//! environment variable, `#build`/`#root`/`#link` fill in the target under
//! construction, and a lone `}` closes it. Parsing produces an immutable
//! [`BuildPlan`] that the rest of the tool only reads.

pub mod parser;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{hints, ClawError};

/// Descriptor file name, looked up from the current directory upwards
pub const DESCRIPTOR_FILE: &str = "build.claw";

/// The fully parsed descriptor
#[derive(Debug, Clone, Default)]
pub struct BuildPlan {
    /// Targets in declaration order; never sorted or deduplicated
    pub targets: Vec<BuildTarget>,

    /// Shared environment variables; last assignment to a name wins
    pub environment: HashMap<String, String>,
}

/// One compilation unit declared by the descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTarget {
    /// Target name; non-empty for every emitted target
    pub name: String,

    /// Entry source file, relative to the source root
    pub root_source_file: String,

    /// Libraries to link, in declaration order. Order is load-bearing:
    /// inter-dependent static libraries must be declared in resolution
    /// order and are passed to the compiler untouched.
    pub links: Vec<String>,
}

impl BuildPlan {
    /// Read and parse a descriptor file
    pub fn load(path: &Path) -> Result<Self, ClawError> {
        let text = fs::read_to_string(path).map_err(|err| {
            ClawError::descriptor_error_with_hint(
                format!("read {}: {err}", path.display()),
                Some(err.into()),
                hints::descriptor(),
            )
        })?;

        parser::parse(&text).map_err(|err| {
            ClawError::descriptor_error_with_hint(
                err.to_string(),
                Some(err.into()),
                hints::descriptor(),
            )
        })
    }

    /// Look up a target by exact name: first match, declaration order
    pub fn find_target(&self, name: &str) -> Option<&BuildTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Names of all declared targets, in declaration order
    pub fn target_names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name.clone()).collect()
    }
}
