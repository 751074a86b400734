//! Unlink command implementation.

use crate::cli::args::UnlinkArgs;
use crate::error::{Result, WorkonError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Context};

/// The unlink command implementation.
pub struct UnlinkCommand {
    ctx: Context,
    args: UnlinkArgs,
}

impl UnlinkCommand {
    /// Create a new unlink command.
    pub fn new(ctx: Context, args: UnlinkArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for UnlinkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.ctx.registry();
        let mut exit_code = 0;

        for name in &self.args.names {
            match registry.remove(name) {
                Ok(link) => ui.success(&format!("Removed {}", link.name)),
                Err(
                    e @ (WorkonError::PathNotFound { .. }
                    | WorkonError::NotASymlink { .. }
                    | WorkonError::InvalidLinkName { .. }),
                ) => {
                    ui.error(&e.to_string());
                    exit_code = exit_code.max(e.exit_code());
                }
                Err(e) => return Err(e),
            }
        }

        if exit_code == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(exit_code))
        }
    }
}
