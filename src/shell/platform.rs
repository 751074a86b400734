//! Target shell detection.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;

/// Shells that workon can emit text for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Sh,
}

impl ShellType {
    /// Parse shell type from an executable path such as `$SHELL`.
    pub fn from_executable(exe: &str) -> Option<Self> {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => Some(Self::Bash),
            "zsh" => Some(Self::Zsh),
            "fish" => Some(Self::Fish),
            "sh" | "dash" | "ash" | "ksh" => Some(Self::Sh),
            _ => None,
        }
    }

    /// Shell named by `shell_var` (usually `$SHELL`), falling back to `sh`.
    pub fn detect(shell_var: Option<&str>) -> Self {
        shell_var
            .and_then(Self::from_executable)
            .unwrap_or(Self::Sh)
    }

    /// Whether the shell uses POSIX syntax.
    pub fn is_posix(&self) -> bool {
        !matches!(self, Self::Fish)
    }

    /// Matching completion generator, if clap has one.
    pub fn completion_shell(&self) -> Option<clap_complete::Shell> {
        match self {
            Self::Bash => Some(clap_complete::Shell::Bash),
            Self::Zsh => Some(clap_complete::Shell::Zsh),
            Self::Fish => Some(clap_complete::Shell::Fish),
            Self::Sh => None,
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::Sh => "sh",
        };
        f.write_str(name)
    }
}
