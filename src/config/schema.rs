//! User config file schema.

use serde::{Deserialize, Serialize};

/// Contents of `~/.workon/config.yml`.
///
/// Every key is optional; missing keys fall through to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Managed home directory. `~` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workon_home: Option<String>,

    /// Extra environment directory patterns, tried before the defaults.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub venv_patterns: Vec<String>,

    /// Include the default `.venv` and `venv` patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_venv: Option<bool>,

    /// Search the working directory and its ancestors when no name or path
    /// is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,

    /// Ancestor levels to search above the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Canonicalize symlinks by default (`--resolve`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn parses_all_keys() {
        let yaml = r#"
workon_home: ~/envs
venv_patterns: [".env-*", "env"]
default_venv: false
search: false
max_depth: 3
resolve: true
"#;
        let config: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.workon_home.as_deref(), Some("~/envs"));
        assert_eq!(config.venv_patterns, vec![".env-*", "env"]);
        assert_eq!(config.default_venv, Some(false));
        assert_eq!(config.search, Some(false));
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.resolve, Some(true));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<ConfigFile, _> = serde_yaml::from_str("wokron_home: x");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_only_set_keys() {
        let config = ConfigFile {
            max_depth: Some(2),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(yaml.trim(), "max_depth: 2");
    }
}
