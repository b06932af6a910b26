//! Interactive input for required variables that no source provides.

use dialoguer::Input;

use crate::error::{Error, Result};
use crate::variables::VariableDef;

/// Asks the user for a variable value.
pub trait Prompter {
    /// Returns the entered value, or `None` if the user declined to give one.
    fn ask(&self, key: &str, def: &VariableDef) -> Result<Option<String>>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, key: &str, def: &VariableDef) -> Result<Option<String>> {
        let prompt = if def.description.is_empty() {
            key.to_string()
        } else {
            format!("{key} ({})", def.description)
        };

        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = &def.default {
            input = input.default(default.clone());
        }

        let value = input.interact_text().map_err(|e| Error::Prompt(e.to_string()))?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}
