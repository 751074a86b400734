//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command receives the same
//! [`Context`]: layered settings, the working directory and `$SHELL`.

pub mod activate;
pub mod cd;
pub mod clean;
pub mod completions;
pub mod dispatcher;
pub mod link;
pub mod list;
pub mod run;
pub mod shell_config;
pub mod unlink;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Context};
