//! Configuration loading and layering.
//!
//! - [`schema`] - The user config file format
//! - [`loader`] - Finding and parsing `~/.workon/config.yml`
//! - [`settings`] - Layering flags, the config file and defaults
//!
//! # Example
//!
//! ```
//! use workon::config::{parse_config, Overrides, Settings};
//! use std::path::Path;
//!
//! let file = parse_config("venv_patterns: [env]\nmax_depth: 2", Path::new("config.yml")).unwrap();
//! let settings = Settings::layer(&file, &Overrides::default(), Some(Path::new("/home/me")));
//!
//! assert_eq!(settings.max_depth, Some(2));
//! assert_eq!(settings.patterns().unwrap().len(), 3);
//! ```

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{load_config, load_config_file, parse_config, user_config_path};
pub use schema::ConfigFile;
pub use settings::{expand_tilde, Overrides, Settings, DEFAULT_WORKON_HOME};
