//! workon - Manage symlinks to Python virtual environments.
//!
//! workon finds virtual environments scattered across project directories,
//! links them into one home directory (`~/.virtualenvs` by default) and
//! prints shell code that activates them or changes to their projects.
//!
//! # Modules
//!
//! - [`venv`] - Environment patterns, validation, discovery and resolution
//! - [`registry`] - Symlinks in the workon home
//! - [`shell`] - Shell code generation and running `uv`
//! - [`config`] - Config file loading and settings layering
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Terminal output and confirmation prompts
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use workon::venv::{EnvironmentResolver, ResolutionRequest};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let venv = temp.path().join("project/.venv");
//! fs::create_dir_all(venv.join("bin")).unwrap();
//! fs::write(venv.join("pyvenv.cfg"), "home = /usr/bin\n").unwrap();
//!
//! let resolver = EnvironmentResolver::from_patterns(temp.path().join("home"), &[".venv"]).unwrap();
//! let request = ResolutionRequest::new(temp.path().join("project"));
//! let found = resolver.resolve(&request).unwrap();
//! assert_eq!(found.name(), "project");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod shell;
pub mod ui;
pub mod venv;

pub use error::{Result, WorkonError};
