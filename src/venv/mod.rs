//! Virtual environment discovery, validation and resolution.
//!
//! - [`pattern`] - Environment directory name patterns
//! - [`validate`] - Structural checks for environments and symlinks
//! - [`environment`] - The validated [`VirtualEnvironment`] type
//! - [`discover`] - Finding environments inside given directories
//! - [`resolver`] - Path / name / default-venv resolution

pub mod discover;
pub mod environment;
pub mod pattern;
pub mod resolver;
pub mod validate;

pub use discover::{collect_input_paths, discover, find_in_dir, infer_environment_path};
pub use environment::{infer_name, VirtualEnvironment};
pub use pattern::{VenvPatterns, DEFAULT_VENV_PATTERNS};
pub use resolver::{EnvironmentResolver, Resolution, ResolutionRequest, ResolutionSource};
pub use validate::{
    is_valid_virtual_environment, validate_directory_exists, validate_is_virtual_environment,
    validate_link_name, validate_patterns, validate_symlink,
};
