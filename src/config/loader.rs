//! Config file discovery and loading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::ConfigFile;
use crate::error::{Result, WorkonError};

/// Default user config location: `~/.workon/config.yml`.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".workon").join("config.yml"))
}

/// Load the config file at `path`.
///
/// A missing file is an empty config. Invalid YAML or unknown keys are
/// [`WorkonError::ConfigParseError`].
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No config file at {}", path.display());
            return Ok(ConfigFile::default());
        }
        Err(e) => return Err(e.into()),
    };

    debug!("Loading config from {}", path.display());
    parse_config(&content, path)
}

/// Parse YAML content. `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| WorkonError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load `config_override` if given, otherwise the user config file.
pub fn load_config(config_override: Option<&Path>) -> Result<ConfigFile> {
    match config_override.map(Path::to_path_buf).or_else(user_config_path) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigFile::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_config() {
        let temp = TempDir::new().unwrap();
        let config = load_config_file(&temp.path().join("nope.yml")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn empty_file_is_empty_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "max_depth: 4\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.max_depth, Some(4));
    }

    #[test]
    fn load_config_file_returns_parse_error_for_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "venv_patterns: [unclosed").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, WorkonError::ConfigParseError { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn load_config_prefers_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "resolve: true\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.resolve, Some(true));
    }

    #[test]
    fn user_config_path_is_under_dot_workon() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with(".workon/config.yml"));
        }
    }
}
