//! User interface for the command-line front end.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, scripts and CI
//! - [`MockUI`] for tests
//!
//! Shell text and machine-readable output go through
//! [`UserInterface::emit`] to stdout unchanged. Warnings and errors go to
//! stderr so `eval "$(workon activate)"` only ever sees shell text.
//!
//! # Example
//!
//! ```
//! use workon::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Linked proj");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, WorkonTheme, NAME_WIDTH};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write data to stdout regardless of output mode.
    fn emit(&mut self, text: &str);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Stable key, used for overrides and test responses.
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer when the user just presses enter or cannot be asked.
    pub default: bool,
}

impl Prompt {
    pub fn confirm(key: &str, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.into(),
            default,
        }
    }
}

/// Parse a yes/no answer.
pub fn parse_answer(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}
