//! workon CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use workon::cli::{Cli, CommandDispatcher, CommandResult, Context};
use workon::config::{load_config, Settings};
use workon::ui::{create_ui, should_use_colors, OutputMode, UserInterface};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so shell code on stdout stays clean. Level is
/// controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. `-v` gives INFO, otherwise WARN
fn init_tracing(debug: bool, verbose: bool) {
    let filter = if debug {
        EnvFilter::new("workon=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if verbose { "workon=info" } else { "workon=warn" })
        })
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> workon::Result<CommandResult> {
    let file = load_config(cli.config.as_deref())?;
    let settings = Settings::layer(&file, &cli.overrides(), dirs::home_dir().as_deref());
    tracing::debug!("Settings: {:?}", settings);

    let context = Context::new(settings, std::env::current_dir()?)
        .with_shell_var(std::env::var("SHELL").ok())
        .with_colors(should_use_colors());

    CommandDispatcher::new(context).dispatch(cli, ui)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.verbose);

    tracing::debug!("workon starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let is_interactive = console::Term::stderr().is_term();
    let mut ui = create_ui(is_interactive, output_mode);

    match run(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            ui.error(&e.to_string());
            exit_code(e.exit_code())
        }
    }
}
