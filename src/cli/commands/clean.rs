//! Clean command implementation.
//!
//! Removes symlinks whose targets are gone or are no longer virtual
//! environments. Real files and directories are never touched.

use crate::cli::args::CleanArgs;
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult, Context};

/// The clean command implementation.
pub struct CleanCommand {
    ctx: Context,
    args: CleanArgs,
}

impl CleanCommand {
    /// Create a new clean command.
    pub fn new(ctx: Context, args: CleanArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for CleanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.ctx.registry();

        if self.args.dry_run {
            let candidates = registry.clean(true)?;
            for link in &candidates {
                ui.message(&format!(
                    "Would remove {} -> {}",
                    link.name,
                    link.display_target()
                ));
            }
            if candidates.is_empty() {
                ui.message("No broken links");
            }
            return Ok(CommandResult::success());
        }

        let candidates = registry.find_invalid_links()?;
        if candidates.is_empty() {
            ui.message("No broken links");
            return Ok(CommandResult::success());
        }

        let mut failed = false;
        for link in candidates {
            if !self.args.yes {
                let prompt = Prompt::confirm(
                    "remove_link",
                    format!("Remove {} -> {}?", link.name, link.display_target()),
                    false,
                );
                if !ui.confirm(&prompt)? {
                    ui.message(&format!("Kept {}", link.name));
                    continue;
                }
            }

            match registry.remove_link(&link.link_path) {
                Ok(()) => ui.success(&format!("Removed {}", link.name)),
                Err(e) => {
                    ui.error(&format!("Failed to remove {}: {}", link.name, e));
                    failed = true;
                }
            }
        }

        if failed {
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}
