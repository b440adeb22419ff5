//! Error types and helpers for user-friendly error messages
//!
//! Every failure the tool can surface is one of a small set of variants;
//! some carry a hint shown after the error itself.

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum ClawError {
    /// Descriptor file errors: unreadable file or the first syntax error
    #[error("{message}")]
    Descriptor {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// A build was requested for a target the descriptor does not declare
    #[error("unknown build target: {name}")]
    UnknownTarget { name: String, known: Vec<String> },

    /// Compiler executable not found on PATH
    #[error("missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// A single target failed to build (directory preparation or compile)
    #[error("build \"{target}\" target: {source}")]
    TargetFailure {
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ClawError {
    /// Create a descriptor error with source and hint
    pub fn descriptor_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Descriptor {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create an unknown-target error carrying the declared target names
    pub fn unknown_target(name: impl Into<String>, known: Vec<String>) -> Self {
        Self::UnknownTarget {
            name: name.into(),
            known,
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Wrap a per-target failure with the failing target's name
    pub fn target_failure(target: impl Into<String>, source: anyhow::Error) -> Self {
        Self::TargetFailure {
            target: target.into(),
            source,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{} {}", style("error:").red().bold(), self);

        match self {
            ClawError::Descriptor { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("hint:").yellow().bold(), h);
                }
            }
            ClawError::UnknownTarget { known, .. } => {
                if !known.is_empty() {
                    eprintln!("\n{}", style("declared targets:").cyan().bold());
                    for name in known {
                        eprintln!("  {name}");
                    }
                }
            }
            ClawError::MissingTool {
                required_for, hint, ..
            } => {
                eprintln!("  required for: {required_for}");
                eprintln!("\n{} {}", style("hint:").yellow().bold(), hint);
            }
            ClawError::TargetFailure { .. } => {}
        }
    }
}

/// Common error hints
pub mod hints {
    /// Hint for a missing C compiler
    pub fn compiler() -> &'static str {
        "Install GCC or Clang and make sure `cc` is on PATH:\n\
         • Ubuntu: sudo apt install build-essential\n\
         • Fedora: sudo dnf install gcc\n\
         • macOS: xcode-select --install"
    }

    /// Hint for a missing or malformed build.claw
    pub fn descriptor() -> &'static str {
        "A build.claw descriptor declares targets line by line:\n\
         \n\
         #set link.dir = ./libs\n\
         #build mytool\n\
         #root main.c\n\
         #link m\n\
         }\n\
         \n\
         Run claw from the project directory (or any directory below it)."
    }
}
