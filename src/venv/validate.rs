//! Structural validation of virtual environments and symlinks.
//!
//! A directory is a virtual environment when it carries the configuration
//! marker (`pyvenv.cfg`) and an interpreter directory (`bin/` or
//! `Scripts/`). These checks only stat the filesystem; the interpreter is
//! never run.

use std::fs;
use std::path::{Component, Path};

use crate::error::{Result, WorkonError};

/// Configuration marker written by `venv`, `virtualenv` and `uv venv`.
pub const CONFIG_MARKER: &str = "pyvenv.cfg";

/// Interpreter directories, POSIX layout first.
pub const INTERPRETER_DIRS: &[&str] = &["bin", "Scripts"];

/// Whether `path` holds the `pyvenv.cfg` marker file.
pub fn has_config_marker(path: &Path) -> bool {
    path.join(CONFIG_MARKER).is_file()
}

/// Whether `path` holds an interpreter directory.
pub fn has_interpreter_dir(path: &Path) -> bool {
    INTERPRETER_DIRS.iter().any(|dir| path.join(dir).is_dir())
}

/// Whether `path` is an existing directory with environment markers.
///
/// Follows symlinks, so a link into the home directory validates through
/// to its target.
pub fn is_valid_virtual_environment(path: &Path) -> bool {
    path.is_dir() && has_config_marker(path) && has_interpreter_dir(path)
}

/// Fail with [`WorkonError::PathNotFound`] unless `path` is a directory.
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(WorkonError::PathNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Fail unless `path` is a valid virtual environment.
///
/// Distinguishes a missing path ([`WorkonError::PathNotFound`]) from one
/// that exists but lacks the markers ([`WorkonError::NotAVirtualEnvironment`]).
pub fn validate_is_virtual_environment(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(WorkonError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !is_valid_virtual_environment(path) {
        return Err(WorkonError::NotAVirtualEnvironment {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Check a would-be or existing link path.
///
/// A missing path is fine. An existing non-symlink fails with
/// [`WorkonError::NotASymlink`]; a symlink to nothing fails with
/// [`WorkonError::BrokenSymlink`].
pub fn validate_symlink(link: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(link) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if !meta.file_type().is_symlink() {
        return Err(WorkonError::NotASymlink {
            path: link.to_path_buf(),
        });
    }

    if !link.exists() {
        return Err(WorkonError::BrokenSymlink {
            link: link.to_path_buf(),
            target: fs::read_link(link)?,
        });
    }

    Ok(())
}

/// Accept `name` only if it is one normal path component, so that
/// `home.join(name)` stays an immediate child of the home directory.
pub fn validate_link_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(WorkonError::InvalidLinkName {
            name: name.to_string(),
        }),
    }
}

/// Reject an empty pattern set before anything touches the filesystem.
pub fn validate_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<()> {
    if patterns.iter().all(|p| p.as_ref().trim().is_empty()) {
        return Err(WorkonError::EmptyPatternSet);
    }
    Ok(())
}
