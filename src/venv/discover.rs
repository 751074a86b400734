//! Locating environments inside user-supplied directories.
//!
//! Used by the resolver for explicit paths and the default-venv search, and
//! by `workon link` to turn paths and parent directories into link
//! candidates.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::debug;

use crate::error::Result;

use super::environment::VirtualEnvironment;
use super::pattern::VenvPatterns;
use super::validate::is_valid_virtual_environment;

/// Find the first environment directly inside `dir`.
///
/// Patterns are tried in order. Literal patterns are joined onto `dir`;
/// glob patterns are expanded against the directory's entries sorted by
/// name so the result does not depend on filesystem order.
pub fn find_in_dir(dir: &Path, patterns: &VenvPatterns) -> Option<PathBuf> {
    for (index, pattern) in patterns.iter().enumerate() {
        if patterns.is_glob(index) {
            let mut names: Vec<String> = match fs::read_dir(dir) {
                Ok(entries) => entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|name| patterns.matches_at(index, name))
                    .collect(),
                Err(_) => continue,
            };
            names.sort();
            if let Some(found) = names
                .into_iter()
                .map(|name| dir.join(name))
                .find(|p| is_valid_virtual_environment(p))
            {
                return Some(found);
            }
        } else {
            let candidate = dir.join(pattern);
            if is_valid_virtual_environment(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// The environment at `path`: the path itself, or a pattern-named child.
pub fn infer_environment_path(path: &Path, patterns: &VenvPatterns) -> Option<PathBuf> {
    if is_valid_virtual_environment(path) {
        return Some(path.to_path_buf());
    }
    find_in_dir(path, patterns)
}

/// Expand explicit paths and the children of parent directories.
///
/// `workon link --parent a/path` behaves like `workon link a/path/*`.
pub fn collect_input_paths(paths: &[PathBuf], parents: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = paths.to_vec();
    for parent in parents {
        let mut children: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        children.sort();
        out.extend(children);
    }
    Ok(out)
}

/// Build environments from input paths, optionally with explicit names.
///
/// Names pair with input paths positionally. Inputs that hold no
/// environment are skipped and logged.
pub fn discover(
    inputs: &[PathBuf],
    names: &[String],
    patterns: &VenvPatterns,
) -> Result<Vec<VirtualEnvironment>> {
    if !names.is_empty() && names.len() < inputs.len() {
        return Err(anyhow!(
            "--link-name given {} time(s), which is shorter than the {} path(s) to link",
            names.len(),
            inputs.len()
        )
        .into());
    }

    let mut found = Vec::new();
    for (index, input) in inputs.iter().enumerate() {
        let Some(path) = infer_environment_path(input, patterns) else {
            debug!("No virtual environment at {}", input.display());
            continue;
        };
        let venv = VirtualEnvironment::new(path, patterns)?;
        let venv = match names.get(index) {
            Some(name) => venv.with_name(name.clone()),
            None => venv,
        };
        found.push(venv);
    }
    Ok(found)
}
