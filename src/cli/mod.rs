//! Command-line interface for workon.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ActivateArgs, CdArgs, CleanArgs, Cli, Commands, CompletionsArgs, LinkArgs, ListArgs, RunArgs,
    ShellConfigArgs, TargetArgs, UnlinkArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, Context};
