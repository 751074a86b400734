//! Visual theme and styling.

use console::Style;

use crate::registry::LinkStatus;

/// Column width for environment names in listings.
pub const NAME_WIDTH: usize = 25;

/// Styles used for human-readable output.
#[derive(Debug, Clone)]
pub struct WorkonTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warning messages (yellow).
    pub warning: Style,
    /// Error messages (red bold).
    pub error: Style,
    /// Environment names (bold cyan).
    pub name: Style,
    /// Secondary text such as targets (dim).
    pub dim: Style,
}

impl Default for WorkonTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkonTheme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            name: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            name: Style::new(),
            dim: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// One listing row: padded name, target, and a status tag unless valid.
    pub fn format_link(&self, name: &str, target: &str, status: LinkStatus) -> String {
        let padded = format!("{:<width$}", name, width = NAME_WIDTH);
        let row = format!("{} {}", self.name.apply_to(padded), target);
        match status {
            LinkStatus::Valid => row,
            LinkStatus::Broken => {
                format!("{} {}", row, self.error.apply_to(format!("({})", status.label())))
            }
            LinkStatus::Foreign => {
                format!("{} {}", row, self.dim.apply_to(format!("({})", status.label())))
            }
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_status_messages() {
        let theme = WorkonTheme::plain();
        assert_eq!(theme.format_success("Linked"), "✓ Linked");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn link_rows_pad_names() {
        let theme = WorkonTheme::plain();
        let row = theme.format_link("proj", "/p/.venv", LinkStatus::Valid);
        assert_eq!(row, format!("{:<25} /p/.venv", "proj"));
    }

    #[test]
    fn link_rows_tag_non_valid_entries() {
        let theme = WorkonTheme::plain();
        assert!(theme
            .format_link("gone", "/x", LinkStatus::Broken)
            .ends_with("(broken)"));
        assert!(theme
            .format_link("dir", "", LinkStatus::Foreign)
            .ends_with("(unmanaged)"));
    }

    #[test]
    fn colored_theme_keeps_text() {
        let theme = WorkonTheme::new();
        assert!(theme.format_success("test").contains("test"));
    }
}
