//! Link command implementation.
//!
//! The `workon link` command discovers environments under the given paths
//! and symlinks them into the workon home.

use std::fs;

use tracing::info;

use crate::cli::args::LinkArgs;
use crate::error::{Result, WorkonError};
use crate::registry::{LinkAction, LinkOptions, LinkOutcome};
use crate::ui::{Prompt, UserInterface};
use crate::venv::{collect_input_paths, discover, validate_link_name, VirtualEnvironment};

use super::dispatcher::{Command, CommandResult, Context};

/// The link command implementation.
pub struct LinkCommand {
    ctx: Context,
    args: LinkArgs,
}

impl LinkCommand {
    /// Create a new link command.
    pub fn new(ctx: Context, args: LinkArgs) -> Self {
        Self { ctx, args }
    }

    fn report(&self, ui: &mut dyn UserInterface, outcome: &LinkOutcome) {
        let target = outcome
            .link
            .target
            .as_ref()
            .map(|t| t.display().to_string())
            .unwrap_or_default();
        let name = &outcome.link.name;
        match (outcome.action, self.args.dry_run) {
            (LinkAction::Created, false) => ui.success(&format!("Linked {} -> {}", name, target)),
            (LinkAction::Created, true) => ui.message(&format!("Would link {} -> {}", name, target)),
            (LinkAction::Replaced, false) => {
                ui.success(&format!("Relinked {} -> {}", name, target))
            }
            (LinkAction::Replaced, true) => {
                ui.message(&format!("Would relink {} -> {}", name, target))
            }
            (LinkAction::Unchanged, _) => {
                if ui.output_mode().shows_details() {
                    ui.message(&format!("{} is already linked", name));
                }
            }
        }
    }

    /// Replace a conflicting link after confirmation. Returns whether the
    /// conflict was resolved.
    fn force(
        &self,
        ui: &mut dyn UserInterface,
        venv: &VirtualEnvironment,
        conflict: &WorkonError,
        options: LinkOptions,
    ) -> Result<bool> {
        if !self.args.yes {
            let prompt = Prompt::confirm(
                "replace_link",
                format!("{}. Replace it?", conflict),
                false,
            );
            if !ui.confirm(&prompt)? {
                ui.message(&format!("Skipped {}", venv.name()));
                return Ok(false);
            }
        }

        match self.ctx.registry().replace_link(venv, None, options) {
            Ok(outcome) => {
                self.report(ui, &outcome);
                Ok(true)
            }
            Err(e @ WorkonError::NotASymlink { .. }) => {
                ui.error(&format!("Cannot replace: {}", e));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

impl Command for LinkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let patterns = self.ctx.settings.patterns()?;

        let paths: Vec<_> = self.args.paths.iter().map(|p| self.ctx.cwd.join(p)).collect();
        let parents: Vec<_> = self.args.parent.iter().map(|p| self.ctx.cwd.join(p)).collect();
        let inputs = collect_input_paths(&paths, &parents)?;
        if inputs.is_empty() {
            ui.warning("Nothing to link. Pass environment paths or --parent.");
            return Ok(CommandResult::failure(2));
        }

        let venvs = discover(&inputs, &self.args.link_names, &patterns)?;
        if venvs.is_empty() {
            ui.warning("No virtual environments found");
            return Ok(CommandResult::failure(2));
        }

        let registry = self.ctx.registry();
        let home = registry.home().to_path_buf();
        if !home.is_dir() {
            if self.args.dry_run {
                ui.message(&format!("Would create {}", home.display()));
                for venv in &venvs {
                    validate_link_name(venv.name())?;
                    ui.message(&format!(
                        "Would link {} -> {}",
                        venv.name(),
                        venv.path().display()
                    ));
                }
                return Ok(CommandResult::success());
            }
            fs::create_dir_all(&home)?;
            info!("Created workon home {}", home.display());
        }

        let options = LinkOptions {
            resolve: self.args.resolve || self.ctx.settings.resolve,
            dry_run: self.args.dry_run,
        };

        let mut unresolved = 0;
        for venv in &venvs {
            match registry.create_link(venv, None, options) {
                Ok(outcome) => self.report(ui, &outcome),
                Err(conflict @ WorkonError::LinkAlreadyExists { .. }) => {
                    if self.args.force {
                        if !self.force(ui, venv, &conflict, options)? {
                            unresolved += 1;
                        }
                    } else {
                        ui.warning(&format!("{}. Use --force to replace it.", conflict));
                        unresolved += 1;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        if unresolved > 0 {
            return Ok(CommandResult::failure(4));
        }
        Ok(CommandResult::success())
    }
}
