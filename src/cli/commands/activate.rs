//! Activate command implementation.
//!
//! Prints shell code for `eval`. The `workon` shell function installed by
//! `shell-config` evaluates it automatically.

use crate::cli::args::ActivateArgs;
use crate::error::{Result, WorkonError};
use crate::shell::{activation_script, generate, ShellOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Context};

/// The activate command implementation.
pub struct ActivateCommand {
    ctx: Context,
    args: ActivateArgs,
}

impl ActivateCommand {
    /// Create a new activate command.
    pub fn new(ctx: Context, args: ActivateArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for ActivateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let venv = self.ctx.resolve_target(&self.args.target, self.args.resolve)?;
        let shell = self.ctx.shell(self.args.shell);

        let Some(script) = activation_script(venv.path(), shell) else {
            ui.error(&format!(
                "No activate script found for {}",
                venv.path().display()
            ));
            return Ok(CommandResult::failure(1));
        };

        if self.args.no_command {
            ui.emit(&format!("{}\n", script.display()));
        } else {
            let options = ShellOptions::new(shell).with_activate(true);
            let text = generate(&venv, &options).ok_or_else(|| WorkonError::PathNotFound {
                path: script.clone(),
            })?;
            ui.emit(&text);
        }
        Ok(CommandResult::success())
    }
}
