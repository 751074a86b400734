//! Managed link entries and their classification.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::venv::is_valid_virtual_environment;

/// State of one entry in the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Symlink to a valid environment.
    Valid,
    /// Symlink whose target is missing or no longer validates.
    Broken,
    /// Not a symlink. Never modified by the registry.
    Foreign,
}

impl LinkStatus {
    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Broken => "broken",
            Self::Foreign => "unmanaged",
        }
    }
}

/// One entry in the managed home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedLink {
    /// Entry name (the environment name users type).
    pub name: String,
    /// Full path of the entry.
    pub link_path: PathBuf,
    /// Raw symlink target, as stored. `None` for foreign entries.
    pub target: Option<PathBuf>,
    /// Classification at scan time.
    pub status: LinkStatus,
}

impl ManagedLink {
    /// Classify the entry at `path`.
    ///
    /// Does not follow the entry itself when deciding whether it is a
    /// symlink, but does follow it when validating the target.
    pub fn classify(path: &Path) -> Result<Self> {
        let meta = fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !meta.file_type().is_symlink() {
            return Ok(Self {
                name,
                link_path: path.to_path_buf(),
                target: None,
                status: LinkStatus::Foreign,
            });
        }

        let target = fs::read_link(path)?;
        let status = if is_valid_virtual_environment(path) {
            LinkStatus::Valid
        } else {
            LinkStatus::Broken
        };

        Ok(Self {
            name,
            link_path: path.to_path_buf(),
            target: Some(target),
            status,
        })
    }

    /// Target with symlinks resolved, if it exists.
    pub fn resolved_target(&self) -> Option<PathBuf> {
        self.link_path.canonicalize().ok()
    }

    /// Whether this is a symlink to a valid environment.
    pub fn is_valid(&self) -> bool {
        self.status == LinkStatus::Valid
    }

    /// Whether this is a symlink that `clean` would remove.
    pub fn is_broken(&self) -> bool {
        self.status == LinkStatus::Broken
    }

    /// Target as shown to users.
    pub fn display_target(&self) -> String {
        match (&self.target, self.resolved_target()) {
            (_, Some(resolved)) => resolved.display().to_string(),
            (Some(raw), None) => raw.display().to_string(),
            (None, None) => String::new(),
        }
    }
}
