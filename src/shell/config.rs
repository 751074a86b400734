//! Shell text generation.
//!
//! Everything here returns plain strings meant for `eval` (or `source` in
//! fish). Nothing is written or executed.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::venv::VirtualEnvironment;

use super::platform::ShellType;

/// Variable exported with the path of the selected environment.
pub const ENV_VAR: &str = "WORKON_VIRTUAL_ENV";

/// What the generated text should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    pub shell: ShellType,
    /// Source the environment's activation script.
    pub activate: bool,
    /// Change to the environment's project directory.
    pub change_dir: bool,
}

impl ShellOptions {
    /// Export only.
    pub fn new(shell: ShellType) -> Self {
        Self {
            shell,
            activate: false,
            change_dir: false,
        }
    }

    pub fn with_activate(mut self, activate: bool) -> Self {
        self.activate = activate;
        self
    }

    pub fn with_change_dir(mut self, change_dir: bool) -> Self {
        self.change_dir = change_dir;
        self
    }
}

/// Shell text that exports the environment path and optionally changes
/// directory and activates it, in that order.
///
/// Returns the same text for the same inputs. Returns `None` when a
/// requested step cannot be emitted: activation without an activate script,
/// or a directory change for an environment with no parent directory.
pub fn generate(venv: &VirtualEnvironment, options: &ShellOptions) -> Option<String> {
    let shell = options.shell;
    let mut out = String::new();

    let path = venv.path().display().to_string();
    match shell {
        ShellType::Fish => {
            let _ = writeln!(out, "set -gx {} {}", ENV_VAR, quote(shell, &path));
        }
        _ => {
            let _ = writeln!(out, "export {}={}", ENV_VAR, quote(shell, &path));
        }
    }

    if options.change_dir {
        let dir = venv.project_dir()?;
        let _ = writeln!(out, "cd {}", quote(shell, &dir.display().to_string()));
    }

    if options.activate {
        let script = activation_script(venv.path(), shell)?;
        let _ = writeln!(out, "source {}", quote(shell, &script.display().to_string()));
    }

    Some(out)
}

/// The activation script for `shell` inside the environment at `venv`.
///
/// POSIX layouts use `bin/`, Windows layouts `Scripts/`. Returns `None`
/// when no script exists.
pub fn activation_script(venv: &Path, shell: ShellType) -> Option<PathBuf> {
    let file = match shell {
        ShellType::Fish => "activate.fish",
        _ => "activate",
    };
    ["bin", "Scripts"]
        .iter()
        .map(|dir| venv.join(dir).join(file))
        .find(|p| p.is_file())
}

/// Quote `value` as a single word for `shell`.
pub fn quote(shell: ShellType, value: &str) -> String {
    match shell {
        ShellType::Fish => format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")),
        _ => format!("'{}'", value.replace('\'', r"'\''")),
    }
}

/// The text for `eval "$(workon shell-config)"`.
///
/// Defines a `program` function that evaluates the output of `activate`
/// and `cd` in the calling shell and forwards every other subcommand, then
/// loads completions when the shell has a generator.
pub fn integration_script(shell: ShellType, program: &str) -> String {
    let mut out = match shell {
        ShellType::Fish => fish_function(program),
        _ => posix_function(program),
    };

    if shell.completion_shell().is_some() {
        if shell.is_posix() {
            let _ = writeln!(out, "eval \"$(command {program} completions {shell})\"");
        } else {
            let _ = writeln!(out, "command {program} completions {shell} | source");
        }
    }

    out
}

fn posix_function(program: &str) -> String {
    format!(
        r#"{program}() {{
    case "$1" in
        activate|cd)
            case " $* " in
                *" --no-command "*|*" -h "*|*" --help "*)
                    command {program} "$@"
                    ;;
                *)
                    __workon_out="$(command {program} "$@")" || return $?
                    eval "$__workon_out"
                    ;;
            esac
            ;;
        *)
            command {program} "$@"
            ;;
    esac
}}
"#
    )
}

fn fish_function(program: &str) -> String {
    format!(
        r#"function {program}
    switch $argv[1]
        case activate cd
            if contains -- --no-command $argv; or contains -- --help $argv; or contains -- -h $argv
                command {program} $argv
            else
                set -l __workon_out (command {program} $argv | string collect); or return $status
                echo $__workon_out | source
            end
        case '*'
            command {program} $argv
    end
end
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venv::validate::fixtures::make_venv;
    use crate::venv::VenvPatterns;
    use std::fs;
    use tempfile::TempDir;

    fn venv_in(temp: &TempDir, rel: &str) -> VirtualEnvironment {
        let path = make_venv(&temp.path().join(rel));
        let patterns = VenvPatterns::new([".venv"]).unwrap();
        VirtualEnvironment::new(path, &patterns).unwrap()
    }

    #[test]
    fn export_only_by_default() {
        let temp = TempDir::new().unwrap();
        let venv = venv_in(&temp, "proj/.venv");

        let text = generate(&venv, &ShellOptions::new(ShellType::Bash)).unwrap();
        let expected = format!("export WORKON_VIRTUAL_ENV='{}'\n", venv.path().display());
        assert_eq!(text, expected);
    }

    #[test]
    fn cd_comes_before_activation() {
        let temp = TempDir::new().unwrap();
        let venv = venv_in(&temp, "proj/.venv");
        let options = ShellOptions::new(ShellType::Zsh)
            .with_activate(true)
            .with_change_dir(true);

        let text = generate(&venv, &options).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("export WORKON_VIRTUAL_ENV="));
        assert_eq!(
            lines[1],
            format!("cd '{}'", temp.path().join("proj").display())
        );
        assert_eq!(
            lines[2],
            format!("source '{}'", venv.path().join("bin/activate").display())
        );
    }

    #[test]
    fn fish_uses_set_and_fish_script() {
        let temp = TempDir::new().unwrap();
        let venv = venv_in(&temp, "proj/.venv");
        let options = ShellOptions::new(ShellType::Fish).with_activate(true);

        let text = generate(&venv, &options).unwrap();
        assert!(text.starts_with("set -gx WORKON_VIRTUAL_ENV '"));
        assert!(text.contains("activate.fish'"));
    }

    #[test]
    fn generate_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let venv = venv_in(&temp, "proj/.venv");
        let options = ShellOptions::new(ShellType::Bash).with_activate(true);

        assert_eq!(generate(&venv, &options), generate(&venv, &options));
    }

    #[test]
    fn activation_without_script_generates_nothing() {
        let temp = TempDir::new().unwrap();
        let venv = venv_in(&temp, "proj/.venv");
        fs::remove_file(venv.path().join("bin/activate.fish")).unwrap();

        let fish = ShellOptions::new(ShellType::Fish).with_activate(true);
        assert_eq!(generate(&venv, &fish), None);
        assert!(generate(&venv, &ShellOptions::new(ShellType::Fish)).is_some());
    }

    #[test]
    fn activation_script_prefers_bin_then_scripts() {
        let temp = TempDir::new().unwrap();
        let venv = temp.path().join("win");
        fs::create_dir_all(venv.join("Scripts")).unwrap();
        fs::write(venv.join("Scripts/activate"), "").unwrap();

        assert_eq!(
            activation_script(&venv, ShellType::Bash),
            Some(venv.join("Scripts/activate"))
        );
        assert_eq!(activation_script(&venv, ShellType::Fish), None);
    }

    #[test]
    fn posix_quote_escapes_single_quotes() {
        assert_eq!(quote(ShellType::Bash, "it's"), r"'it'\''s'");
        assert_eq!(quote(ShellType::Sh, "a b$c"), "'a b$c'");
    }

    #[test]
    fn fish_quote_escapes_backslash_and_quote() {
        assert_eq!(quote(ShellType::Fish, r"a\b'c"), r"'a\\b\'c'");
    }

    #[test]
    fn integration_script_wraps_activate_and_cd() {
        let script = integration_script(ShellType::Bash, "workon");
        assert!(script.starts_with("workon() {"));
        assert!(script.contains("activate|cd)"));
        assert!(script.contains("eval \"$__workon_out\""));
        assert!(script.contains("completions bash"));
    }

    #[test]
    fn integration_script_for_sh_has_no_completions() {
        let script = integration_script(ShellType::Sh, "workon");
        assert!(!script.contains("completions"));
    }

    #[test]
    fn integration_script_for_fish() {
        let script = integration_script(ShellType::Fish, "wo");
        assert!(script.starts_with("function wo"));
        assert!(script.contains("command wo completions fish | source"));
    }
}
