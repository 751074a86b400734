//! List command implementation.
//!
//! The `workon list` command shows the environments linked in the workon
//! home, sorted by name.

use serde::Serialize;
use tracing::warn;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::{LinkStatus, ManagedLink};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Context};

/// The list command implementation.
pub struct ListCommand {
    ctx: Context,
    args: ListArgs,
}

/// One row of `list --json`.
#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    link: String,
    target: Option<String>,
    status: LinkStatus,
}

impl<'a> From<&'a ManagedLink> for ListEntry<'a> {
    fn from(link: &'a ManagedLink) -> Self {
        Self {
            name: &link.name,
            link: link.link_path.display().to_string(),
            target: link
                .resolved_target()
                .or_else(|| link.target.clone())
                .map(|t| t.display().to_string()),
            status: link.status,
        }
    }
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(ctx: Context, args: ListArgs) -> Self {
        Self { ctx, args }
    }

    fn wanted(&self, link: &ManagedLink) -> bool {
        self.args.all || link.is_valid()
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.ctx.registry();

        let mut links = Vec::new();
        for entry in registry.list()? {
            match entry {
                Ok(link) if self.wanted(&link) => links.push(link),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }
        links.sort_by(|a, b| a.name.cmp(&b.name));

        if self.args.json {
            let entries: Vec<ListEntry> = links.iter().map(ListEntry::from).collect();
            let json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            ui.emit(&format!("{}\n", json));
            return Ok(CommandResult::success());
        }

        if links.is_empty() {
            ui.message(&format!(
                "No virtual environments linked in {}",
                registry.home().display()
            ));
            return Ok(CommandResult::success());
        }

        let theme = self.ctx.theme();
        for link in &links {
            ui.emit(&format!(
                "{}\n",
                theme.format_link(&link.name, &link.display_target(), link.status)
            ));
        }

        Ok(CommandResult::success())
    }
}
