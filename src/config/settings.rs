//! Effective settings for one invocation.
//!
//! Layers, highest priority first:
//! 1. Command-line flags (and their environment variables, via clap)
//! 2. The user config file
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use crate::config::schema::ConfigFile;
use crate::error::Result;
use crate::venv::VenvPatterns;

/// Home directory used when nothing else is configured, relative to `~`.
pub const DEFAULT_WORKON_HOME: &str = ".virtualenvs";

/// Values taken from the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub workon_home: Option<PathBuf>,
    pub venv_patterns: Vec<String>,
    pub no_default_venv: bool,
    pub no_search: bool,
    pub max_depth: Option<usize>,
}

/// Fully layered settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workon_home: PathBuf,
    /// User patterns, in priority order, without the defaults.
    pub venv_patterns: Vec<String>,
    /// Append the default patterns after `venv_patterns`.
    pub default_venv: bool,
    /// Search the working directory and its ancestors.
    pub search: bool,
    pub max_depth: Option<usize>,
    pub resolve: bool,
}

impl Settings {
    /// Layer `overrides` over `file` over the defaults.
    ///
    /// `home_dir` is the user's home, used for `~` expansion and the default
    /// workon home. Pattern lists are not merged: command-line patterns
    /// replace patterns from the file.
    pub fn layer(file: &ConfigFile, overrides: &Overrides, home_dir: Option<&Path>) -> Self {
        let workon_home = overrides
            .workon_home
            .as_ref()
            .map(|p| expand_tilde(&p.to_string_lossy(), home_dir))
            .or_else(|| {
                file.workon_home
                    .as_deref()
                    .map(|p| expand_tilde(p, home_dir))
            })
            .unwrap_or_else(|| default_workon_home(home_dir));

        let venv_patterns = if overrides.venv_patterns.is_empty() {
            file.venv_patterns.clone()
        } else {
            overrides.venv_patterns.clone()
        };

        Self {
            workon_home,
            venv_patterns,
            default_venv: !overrides.no_default_venv && file.default_venv.unwrap_or(true),
            search: !overrides.no_search && file.search.unwrap_or(true),
            max_depth: overrides.max_depth.or(file.max_depth),
            resolve: file.resolve.unwrap_or(false),
        }
    }

    /// Compile the effective pattern set.
    ///
    /// Fails with `EmptyPatternSet` when there are no user patterns and the
    /// defaults are disabled.
    pub fn patterns(&self) -> Result<VenvPatterns> {
        VenvPatterns::with_defaults(&self.venv_patterns, self.default_venv)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::layer(
            &ConfigFile::default(),
            &Overrides::default(),
            dirs::home_dir().as_deref(),
        )
    }
}

fn default_workon_home(home_dir: Option<&Path>) -> PathBuf {
    home_dir
        .map(|h| h.join(DEFAULT_WORKON_HOME))
        .unwrap_or_else(|| PathBuf::from("~").join(DEFAULT_WORKON_HOME))
}

/// Expand a leading `~` or `~/` against `home_dir`.
pub fn expand_tilde(path: &str, home_dir: Option<&Path>) -> PathBuf {
    match (path, home_dir) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
