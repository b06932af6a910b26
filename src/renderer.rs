//! Placeholder rendering.
//!
//! The mini-language has exactly two forms: `{{identifier}}` and
//! `{{identifier:default literal}}`. Whitespace around the identifier is
//! ignored; the default literal runs verbatim from the first `:` to the next
//! `}}`. There is no nesting and no escape for a literal `{{`: text that does
//! not form a valid placeholder is copied through unchanged.

use crate::error::{Error, Result};
use crate::naming::is_valid_variable_name;
use crate::variables::VariableSet;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given variables.
    ///
    /// # Arguments
    /// * `template` - Text containing `{{key}}` / `{{key:default}}` placeholders
    /// * `variables` - Resolved values; unreferenced entries are ignored
    ///
    /// # Returns
    /// * `Result<String>` - The text with every placeholder substituted
    ///
    /// # Errors
    /// * `Error::MissingVariable` if one placeholder has neither a value nor a default
    /// * `Error::Render` holding one `MissingVariable` per name if several do
    fn render(&self, template: &str, variables: &VariableSet) -> Result<String>;
}

/// A piece of scanned template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Placeholder { name: &'a str, default: Option<&'a str> },
}

/// Splits `text` into literal text and placeholders in one left-to-right pass.
///
/// The position of the next `}}` is remembered across rejected candidates,
/// so every byte is looked at a bounded number of times.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    // start of literal text not yet pushed
    let mut emitted = 0;
    let mut cursor = 0;
    let mut close: Option<usize> = None;

    while let Some(found) = text[cursor..].find(OPEN) {
        let start = cursor + found;
        let inner_start = start + OPEN.len();
        let end = match close {
            Some(end) if end >= inner_start => end,
            _ => match text[inner_start..].find(CLOSE) {
                Some(offset) => inner_start + offset,
                None => break,
            },
        };
        close = Some(end);

        match parse_placeholder(&text[inner_start..end]) {
            Some(segment) => {
                if start > emitted {
                    segments.push(Segment::Text(&text[emitted..start]));
                }
                segments.push(segment);
                emitted = end + CLOSE.len();
                cursor = emitted;
            }
            // `{{{name}}}` still yields `{` + placeholder + `}`
            None => cursor = start + 1,
        }
    }

    if emitted < text.len() {
        segments.push(Segment::Text(&text[emitted..]));
    }
    segments
}

/// Parses the text between `{{` and `}}`.
///
/// Only the identifier part is inspected, never the default literal.
fn parse_placeholder(inner: &str) -> Option<Segment<'_>> {
    let name_end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()))
        .unwrap_or(inner.len());
    let default = match inner[name_end..].chars().next() {
        None => None,
        Some(':') => Some(&inner[name_end + 1..]),
        Some(_) => return None,
    };
    let name = inner[..name_end].trim();
    is_valid_variable_name(name).then_some(Segment::Placeholder { name, default })
}

/// Distinct variable names referenced by `text`, in first-use order.
pub fn referenced_variables(text: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in scan(text) {
        if let Segment::Placeholder { name, .. } = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Single-pass `{{key}}` / `{{key:default}}` substitution.
///
/// Substituted values are inserted verbatim and never scanned again.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    /// Creates a new PlaceholderRenderer instance.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, variables: &VariableSet) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut missing: Vec<&str> = Vec::new();

        for segment in scan(template) {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder { name, default } => {
                    match variables.get(name).or(default) {
                        Some(value) => output.push_str(value),
                        None if missing.contains(&name) => {}
                        None => missing.push(name),
                    }
                }
            }
        }

        let mut errors: Vec<Error> = missing
            .into_iter()
            .map(|name| Error::MissingVariable { name: name.to_string(), file: None })
            .collect();

        match errors.len() {
            0 => Ok(output),
            1 => Err(errors.remove(0)),
            _ => Err(Error::Render { errors }),
        }
    }
}
