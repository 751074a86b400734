//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::shell::ShellType;

/// workon - Manage symlinks to Python virtual environments.
#[derive(Debug, Parser)]
#[command(name = "workon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Path to config file [default: ~/.workon/config.yml]
    #[arg(short, long, global = true, env = "WORKON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding environment symlinks [default: ~/.virtualenvs]
    #[arg(short = 'o', long, global = true, env = "WORKON_HOME")]
    pub workon_home: Option<PathBuf>,

    /// Environment directory name pattern (repeatable, tried before the defaults)
    #[arg(
        long = "venv",
        value_name = "PATTERN",
        global = true,
        env = "WORKON_VENV_PATTERNS",
        value_delimiter = ','
    )]
    pub venv_patterns: Vec<String>,

    /// Do not add the default `.venv` and `venv` patterns
    #[arg(long, global = true)]
    pub no_default_venv: bool,

    /// Do not search the working directory and its parents for an environment
    #[arg(long, global = true)]
    pub no_search: bool,

    /// Parent directories to search above the working directory
    #[arg(long, value_name = "N", global = true, env = "WORKON_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings given on the command line or through environment variables.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            workon_home: self.workon_home.clone(),
            venv_patterns: self
                .venv_patterns
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            no_default_venv: self.no_default_venv,
            no_search: self.no_search,
            max_depth: self.max_depth,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create symlinks to virtual environments in the workon home
    Link(LinkArgs),

    /// Remove symlinks from the workon home
    Unlink(UnlinkArgs),

    /// List linked virtual environments
    List(ListArgs),

    /// Remove symlinks whose environments no longer exist
    Clean(CleanArgs),

    /// Print shell code that activates an environment
    Activate(ActivateArgs),

    /// Print shell code that changes to an environment's project directory
    Cd(CdArgs),

    /// Run a command inside an environment with `uv run`
    Run(RunArgs),

    /// Print shell integration code: eval "$(workon shell-config)"
    ShellConfig(ShellConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Selects one environment.
///
/// With neither option, the working directory and its parents are searched.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TargetArgs {
    /// Name of a linked environment in the workon home
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to an environment, or a project directory containing one
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the `link` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LinkArgs {
    /// Environments, or project directories containing one
    pub paths: Vec<PathBuf>,

    /// Link environments found in every subdirectory of this directory
    #[arg(long, value_name = "DIR")]
    pub parent: Vec<PathBuf>,

    /// Link name, paired with paths in order [default: inferred]
    #[arg(long = "link-name", value_name = "NAME")]
    pub link_names: Vec<String>,

    /// Store absolute targets instead of paths relative to the workon home
    #[arg(long)]
    pub resolve: bool,

    /// Replace existing symlinks that point elsewhere
    #[arg(short, long)]
    pub force: bool,

    /// Do not ask before replacing symlinks
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be linked without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `unlink` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UnlinkArgs {
    /// Names of symlinks to remove
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Include broken symlinks and unmanaged entries
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {
    /// Show what would be removed without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask before removing each symlink
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `activate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ActivateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Resolve symlinks in the environment path
    #[arg(long)]
    pub resolve: bool,

    /// Print only the activation script path
    #[arg(long)]
    pub no_command: bool,

    /// Shell to generate code for [default: from $SHELL]
    #[arg(long, value_enum)]
    pub shell: Option<ShellType>,
}

/// Arguments for the `cd` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CdArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print only the directory
    #[arg(long)]
    pub no_command: bool,

    /// Shell to generate code for [default: from $SHELL]
    #[arg(long, value_enum)]
    pub shell: Option<ShellType>,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Resolve symlinks in the environment path
    #[arg(long)]
    pub resolve: bool,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Command and arguments passed to `uv run`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for the `shell-config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShellConfigArgs {
    /// Shell to generate code for [default: from $SHELL]
    #[arg(long, value_enum)]
    pub shell: Option<ShellType>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "workon",
            "list",
            "--workon-home",
            "/envs",
            "--venv",
            "env,.env",
            "--no-default-venv",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.workon_home, Some(PathBuf::from("/envs")));
        assert_eq!(overrides.venv_patterns, vec!["env", ".env"]);
        assert!(overrides.no_default_venv);
    }

    #[test]
    fn parses_link_names_and_parents() {
        let cli = Cli::try_parse_from([
            "workon",
            "link",
            "a",
            "b",
            "--link-name",
            "x",
            "--link-name",
            "y",
            "--parent",
            "projects",
        ])
        .unwrap();

        let Commands::Link(args) = cli.command else {
            panic!("expected link");
        };
        assert_eq!(args.paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.link_names, vec!["x", "y"]);
        assert_eq!(args.parent, vec![PathBuf::from("projects")]);
    }

    #[test]
    fn run_captures_trailing_arguments() {
        let cli =
            Cli::try_parse_from(["workon", "run", "-n", "env", "--", "python", "-V"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.target.name.as_deref(), Some("env"));
        assert_eq!(args.args, vec!["python", "-V"]);
    }

    #[test]
    fn activate_accepts_shell() {
        let cli = Cli::try_parse_from(["workon", "activate", "--shell", "fish"]).unwrap();
        let Commands::Activate(args) = cli.command else {
            panic!("expected activate");
        };
        assert_eq!(args.shell, Some(ShellType::Fish));
    }

    #[test]
    fn unlink_requires_a_name() {
        assert!(Cli::try_parse_from(["workon", "unlink"]).is_err());
    }
}
