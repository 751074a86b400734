//! Cd command implementation.

use crate::cli::args::CdArgs;
use crate::error::{Result, WorkonError};
use crate::shell::{generate, ShellOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Context};

/// The cd command implementation.
///
/// Always works on the resolved environment path, so `--name` lands in the
/// project directory rather than the workon home.
pub struct CdCommand {
    ctx: Context,
    args: CdArgs,
}

impl CdCommand {
    /// Create a new cd command.
    pub fn new(ctx: Context, args: CdArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for CdCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let venv = self.ctx.resolve_target(&self.args.target, true)?;
        let project = venv.project_dir().ok_or_else(|| WorkonError::PathNotFound {
            path: venv.path().to_path_buf(),
        })?;

        if self.args.no_command {
            ui.emit(&format!("{}\n", project.display()));
        } else {
            let options = ShellOptions::new(self.ctx.shell(self.args.shell)).with_change_dir(true);
            let text = generate(&venv, &options).ok_or_else(|| WorkonError::PathNotFound {
                path: venv.path().to_path_buf(),
            })?;
            ui.emit(&text);
        }
        Ok(CommandResult::success())
    }
}
