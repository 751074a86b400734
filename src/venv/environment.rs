//! The [`VirtualEnvironment`] value type.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

use super::pattern::VenvPatterns;
use super::validate::validate_is_virtual_environment;

/// A validated virtual environment directory.
///
/// Only constructed through [`VirtualEnvironment::new`], which checks the
/// structural markers, so holding one means the path validated at the time
/// it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualEnvironment {
    path: PathBuf,
    name: String,
}

impl VirtualEnvironment {
    /// Validate `path` and derive a name from it.
    pub fn new(path: impl Into<PathBuf>, patterns: &VenvPatterns) -> Result<Self> {
        let path = path.into();
        validate_is_virtual_environment(&path)?;
        let name = infer_name(&path, patterns);
        Ok(Self { path, name })
    }

    /// Replace the derived name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Environment directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display / link name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project directory holding the environment.
    pub fn project_dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

impl fmt::Display for VirtualEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// Infer a name from an environment path.
///
/// A directory named like a pattern (`proj/.venv`) takes its parent's name
/// (`proj`); anything else keeps its own name.
pub fn infer_name(path: &Path, patterns: &VenvPatterns) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let own = file_name(&resolved);

    if patterns.matches(&own) {
        if let Some(parent) = resolved.parent() {
            let parent_name = file_name(parent);
            if !parent_name.is_empty() {
                return parent_name;
            }
        }
    }
    own
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
