//! Run command implementation.
//!
//! Runs `uv run -p <venv> --no-project ARGS...` directly, without a shell.

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::shell::CommandLine;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Context};

/// The run command implementation.
pub struct RunCommand {
    ctx: Context,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(ctx: Context, args: RunArgs) -> Self {
        Self { ctx, args }
    }

    fn command_line(&self) -> Result<CommandLine> {
        let venv = self.ctx.resolve_target(&self.args.target, self.args.resolve)?;
        Ok(CommandLine::uv_run(venv.path(), &self.args.args))
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = self.command_line()?;

        if self.args.dry_run {
            ui.emit(&format!("{}\n", command.display()));
            return Ok(CommandResult::success());
        }

        match command.execute()? {
            0 => Ok(CommandResult::success()),
            code => Ok(CommandResult::failure(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::TargetArgs;
    use crate::cli::commands::dispatcher::testing::Sandbox;
    use crate::ui::MockUI;
    use crate::venv::validate::fixtures::symlink;

    #[test]
    fn dry_run_prints_uv_command() {
        let sandbox = Sandbox::new();
        let venv = sandbox.venv("proj/.venv");
        symlink(&venv, &sandbox.home().join("proj"));
        let mut ui = MockUI::new();

        let args = RunArgs {
            target: TargetArgs {
                name: Some("proj".into()),
                ..Default::default()
            },
            dry_run: true,
            args: vec!["python".into(), "-V".into()],
            ..Default::default()
        };
        RunCommand::new(sandbox.context(), args)
            .execute(&mut ui)
            .unwrap();

        let expected = format!(
            "uv run -p {} --no-project python -V\n",
            sandbox.home().join("proj").display()
        );
        assert_eq!(ui.emitted(), expected);
    }

    #[test]
    fn resolve_uses_canonical_path() {
        let sandbox = Sandbox::new();
        let venv = sandbox.venv("proj/.venv");
        symlink(&venv, &sandbox.home().join("proj"));

        let args = RunArgs {
            target: TargetArgs {
                name: Some("proj".into()),
                ..Default::default()
            },
            resolve: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(sandbox.context(), args).command_line().unwrap();
        assert_eq!(
            cmd.args[2],
            venv.canonicalize().unwrap().display().to_string()
        );
    }
}
