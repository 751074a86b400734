//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`Context`] for the values every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, TargetArgs};
use crate::config::Settings;
use crate::error::Result;
use crate::registry::SymlinkRegistry;
use crate::shell::ShellType;
use crate::ui::{UserInterface, WorkonTheme};
use crate::venv::{EnvironmentResolver, ResolutionRequest, VirtualEnvironment};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Values read once at startup and shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    /// Working directory for relative paths and the default search.
    pub cwd: PathBuf,
    /// Value of `$SHELL`, used when `--shell` is not given.
    pub shell_var: Option<String>,
    /// Whether human-readable output is colored.
    pub colors: bool,
}

impl Context {
    pub fn new(settings: Settings, cwd: PathBuf) -> Self {
        Self {
            settings,
            cwd,
            shell_var: None,
            colors: false,
        }
    }

    pub fn with_shell_var(mut self, shell_var: Option<String>) -> Self {
        self.shell_var = shell_var;
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn registry(&self) -> SymlinkRegistry {
        SymlinkRegistry::new(&self.settings.workon_home)
    }

    pub fn resolver(&self) -> Result<EnvironmentResolver> {
        Ok(EnvironmentResolver::new(
            &self.settings.workon_home,
            self.settings.patterns()?,
        ))
    }

    /// Resolve the environment selected by `--name` / `--path`, or search
    /// from the working directory.
    pub fn resolve_target(&self, target: &TargetArgs, resolve: bool) -> Result<VirtualEnvironment> {
        let request = ResolutionRequest::new(&self.cwd)
            .with_path(target.path.clone())
            .with_name(target.name.clone())
            .with_default_venv(self.settings.search)
            .with_resolve(resolve || self.settings.resolve)
            .with_max_depth(self.settings.max_depth);
        self.resolver()?.resolve(&request)
    }

    /// `explicit`, else the shell named by `$SHELL`.
    pub fn shell(&self, explicit: Option<ShellType>) -> ShellType {
        explicit.unwrap_or_else(|| ShellType::detect(self.shell_var.as_deref()))
    }

    pub fn theme(&self) -> WorkonTheme {
        if self.colors {
            WorkonTheme::new()
        } else {
            WorkonTheme::plain()
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: Context,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Get the working directory.
    pub fn cwd(&self) -> &Path {
        &self.context.cwd
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.context.clone();
        match &cli.command {
            Commands::Link(args) => super::link::LinkCommand::new(ctx, args.clone()).execute(ui),
            Commands::Unlink(args) => {
                super::unlink::UnlinkCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::List(args) => super::list::ListCommand::new(ctx, args.clone()).execute(ui),
            Commands::Clean(args) => {
                super::clean::CleanCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Activate(args) => {
                super::activate::ActivateCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Cd(args) => super::cd::CdCommand::new(ctx, args.clone()).execute(ui),
            Commands::Run(args) => super::run::RunCommand::new(ctx, args.clone()).execute(ui),
            Commands::ShellConfig(args) => {
                super::shell_config::ShellConfigCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

/// Shared fixtures for command tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::{ConfigFile, Overrides};
    use crate::venv::validate::fixtures::make_venv;
    use std::fs;
    use tempfile::TempDir;

    /// A temp dir with a `home/` workon home and helpers to build projects.
    pub struct Sandbox {
        pub temp: TempDir,
    }

    impl Sandbox {
        pub fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir_all(temp.path().join("home")).unwrap();
            Self { temp }
        }

        pub fn root(&self) -> &Path {
            self.temp.path()
        }

        pub fn home(&self) -> PathBuf {
            self.temp.path().join("home")
        }

        /// Create `<root>/<rel>` as an environment.
        pub fn venv(&self, rel: &str) -> PathBuf {
            make_venv(&self.temp.path().join(rel))
        }

        pub fn context(&self) -> Context {
            self.context_in(self.root())
        }

        pub fn context_in(&self, cwd: &Path) -> Context {
            let overrides = Overrides {
                workon_home: Some(self.home()),
                ..Default::default()
            };
            let settings = Settings::layer(&ConfigFile::default(), &overrides, Some(self.root()));
            Context::new(settings, cwd.to_path_buf()).with_shell_var(Some("/bin/bash".into()))
        }
    }
}
