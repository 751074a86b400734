//! Non-interactive UI for pipes, scripts and CI.

use std::collections::HashMap;
use std::io::Write;

use tracing::debug;

use crate::error::Result;

use super::{parse_answer, OutputMode, Prompt, UserInterface};

/// Prefix of environment variables that answer prompts, e.g.
/// `WORKON_PROMPT_REMOVE_LINK=yes`.
pub const PROMPT_ENV_PREFIX: &str = "WORKON_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `WORKON_PROMPT_<KEY>` variables, falling back
/// to the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();
        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn emit(&mut self, text: &str) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_warnings() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(answer) = self.env_overrides.get(&env_key).and_then(|v| parse_answer(v)) {
            debug!("Answering '{}' from {}", prompt.key, env_key);
            return Ok(answer);
        }
        Ok(prompt.default)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_uses_default_without_override() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("remove_link", "Remove?", false);
        assert!(!ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn confirm_uses_env_override() {
        let overrides = HashMap::from([(
            "WORKON_PROMPT_REMOVE_LINK".to_string(),
            "yes".to_string(),
        )]);
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt::confirm("remove_link", "Remove?", false);
        assert!(ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn unparseable_override_falls_back_to_default() {
        let overrides = HashMap::from([(
            "WORKON_PROMPT_REMOVE_LINK".to_string(),
            "perhaps".to_string(),
        )]);
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt::confirm("remove_link", "Remove?", true);
        assert!(ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn is_never_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        assert!(!ui.is_interactive());
    }
}
