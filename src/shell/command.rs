//! External command execution for `workon run`.
//!
//! Commands are spawned directly with inherited stdio. No shell is involved,
//! so arguments reach the child unchanged.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, WorkonError};

use super::config::quote;
use super::platform::ShellType;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// `uv run -p <venv> --no-project <args>`.
    pub fn uv_run(venv: &Path, args: &[String]) -> Self {
        let mut all = vec![
            "run".to_string(),
            "-p".to_string(),
            venv.display().to_string(),
            "--no-project".to_string(),
        ];
        all.extend(args.iter().cloned());
        Self {
            program: "uv".to_string(),
            args: all,
        }
    }

    /// The command as a POSIX shell would need it typed.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|word| display_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion with inherited stdio.
    ///
    /// Returns the child's exit code. A child killed by a signal, or a
    /// program that cannot be started, is [`WorkonError::CommandFailed`].
    pub fn execute(&self) -> Result<i32> {
        debug!("Running {}", self.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| {
                debug!("Failed to start {}: {}", self.program, e);
                WorkonError::CommandFailed {
                    command: self.display(),
                    code: None,
                }
            })?;

        status.code().ok_or_else(|| WorkonError::CommandFailed {
            command: self.display(),
            code: None,
        })
    }
}

fn display_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        word.to_string()
    } else {
        quote(ShellType::Sh, word)
    }
}
