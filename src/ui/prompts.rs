//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{Result, WorkonError};

use super::Prompt;

fn map_dialoguer_err(e: dialoguer::Error) -> WorkonError {
    WorkonError::Io(e.into())
}

/// Ask a yes/no question on `term`.
pub fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::new()
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
