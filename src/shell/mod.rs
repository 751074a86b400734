//! Shell-facing output and external command execution.

pub mod command;
pub mod config;
pub mod platform;

pub use command::CommandLine;
pub use config::{activation_script, generate, integration_script, quote, ShellOptions, ENV_VAR};
pub use platform::ShellType;
