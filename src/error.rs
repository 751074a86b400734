//! Error types for workon operations.
//!
//! This module defines [`WorkonError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `WorkonError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `WorkonError::Other`) for unexpected errors
//! - The core never prints or exits; the CLI maps errors with [`WorkonError::exit_code`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for workon operations.
#[derive(Debug, Error)]
pub enum WorkonError {
    /// A referenced filesystem path does not exist.
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but fails structural validation.
    #[error("{path} is not a valid virtual environment")]
    NotAVirtualEnvironment { path: PathBuf },

    /// Resolution exhausted all strategies.
    #[error("No virtual environment found (tried: {})", attempted.join(", "))]
    NoVirtualEnvironment { attempted: Vec<String> },

    /// Symlink exists but its target is missing or no longer valid.
    #[error("Broken symlink: {link} -> {target}")]
    BrokenSymlink { link: PathBuf, target: PathBuf },

    /// A link name that is not a single entry of the home directory.
    #[error("Invalid environment name '{name}': must be a plain name inside the workon home")]
    InvalidLinkName { name: String },

    /// Path exists but is not a symlink.
    #[error("{path} exists and is not a symlink")]
    NotASymlink { path: PathBuf },

    /// Creating a link would overwrite a differently-targeted entry.
    #[error("Link {link} already exists and points to {existing}")]
    LinkAlreadyExists { link: PathBuf, existing: String },

    /// No environment patterns configured.
    #[error("No venv patterns specified. Either pass --venv or allow the defaults.")]
    EmptyPatternSet,

    /// A pattern is not a valid glob.
    #[error("Invalid venv pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Failed to parse the user config file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WorkonError {
    /// Process exit code the CLI uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PathNotFound { .. }
            | Self::NotAVirtualEnvironment { .. }
            | Self::NoVirtualEnvironment { .. }
            | Self::BrokenSymlink { .. }
            | Self::InvalidLinkName { .. } => 2,
            Self::EmptyPatternSet | Self::InvalidPattern { .. } | Self::ConfigParseError { .. } => 3,
            Self::LinkAlreadyExists { .. } | Self::NotASymlink { .. } => 4,
            Self::CommandFailed { code, .. } => code.unwrap_or(1),
            Self::Io(_) | Self::Other(_) => 1,
        }
    }
}

/// Result type alias for workon operations.
pub type Result<T> = std::result::Result<T, WorkonError>;
