//! Shell-config command implementation.

use crate::cli::args::ShellConfigArgs;
use crate::error::Result;
use crate::shell::integration_script;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Context};

/// Name the shell function is installed under.
pub const PROGRAM_NAME: &str = "workon";

/// The shell-config command implementation.
pub struct ShellConfigCommand {
    ctx: Context,
    args: ShellConfigArgs,
}

impl ShellConfigCommand {
    /// Create a new shell-config command.
    pub fn new(ctx: Context, args: ShellConfigArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for ShellConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let shell = self.ctx.shell(self.args.shell);
        ui.emit(&integration_script(shell, PROGRAM_NAME));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::dispatcher::testing::Sandbox;
    use crate::shell::ShellType;
    use crate::ui::MockUI;

    #[test]
    fn defaults_to_shell_from_environment() {
        let sandbox = Sandbox::new();
        let mut ui = MockUI::new();

        ShellConfigCommand::new(sandbox.context(), ShellConfigArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.emitted().starts_with("workon() {"));
        assert!(ui.emitted().contains("completions bash"));
    }

    #[test]
    fn explicit_shell_wins() {
        let sandbox = Sandbox::new();
        let mut ui = MockUI::new();

        let args = ShellConfigArgs {
            shell: Some(ShellType::Fish),
        };
        ShellConfigCommand::new(sandbox.context(), args)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.emitted().starts_with("function workon"));
    }
}
