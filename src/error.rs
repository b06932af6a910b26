//! Error handling for projforge.
//! Defines the error kinds shared by variable resolution, rendering,
//! generation and the template catalog.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The project-name rule a rejected name broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameRule {
    #[error("name cannot be empty")]
    Empty,

    #[error("name must start with a letter")]
    MustStartWithLetter,

    #[error("character '{0}' is not allowed (use letters, digits, '-' and '_')")]
    InvalidCharacter(char),

    #[error("name is {0} characters long, the limit is 100")]
    TooLong(usize),

    #[error("'{0}' is a reserved device name")]
    Reserved(String),
}

/// Custom error types for projforge operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid project name '{name}': {rule}.")]
    InvalidName { name: String, rule: NameRule },

    #[error("Invalid variable name '{name}': must match [a-zA-Z_][a-zA-Z0-9_]*.")]
    InvalidVariableName { name: String },

    #[error("Template '{name}' not found. Available: {}.", .available.join(", "))]
    TemplateNotFound { name: String, available: Vec<String> },

    #[error("Missing required variable(s): {}.", .names.join(", "))]
    MissingRequiredVariable { names: Vec<String> },

    #[error("Missing variable '{name}'{}.", .file.as_ref().map(|f| format!(" in '{f}'")).unwrap_or_default())]
    MissingVariable { name: String, file: Option<String> },

    /// Every placeholder failure found while rendering one template.
    #[error("Rendering failed with {} error(s):\n{}", .errors.len(), join_lines(.errors))]
    Render { errors: Vec<Error> },

    #[error("Output path '{path}' is produced by both '{first}' and '{second}'.")]
    DuplicateOutputPath {
        path: String,
        first: String,
        second: String,
    },

    #[error("Invalid output path '{path}': {reason}.")]
    InvalidOutputPath { path: String, reason: String },

    #[error("Output directory '{}' already exists and is not empty.", .path.display())]
    OutputExists { path: PathBuf },

    #[error("Permission denied: '{}'.", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template '{name}' is already defined at '{}'.", .location.display())]
    DuplicateTemplateDefinition { name: String, location: PathBuf },

    #[error("Invalid template definition: {0}.")]
    TemplateDefinition(String),

    #[error("Configuration error: {0}.")]
    Config(String),

    #[error("Prompt error: {0}.")]
    Prompt(String),

    #[error("IO error: {0}.")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}.")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Git error: {0}.")]
    Git(#[from] git2::Error),
}

impl Error {
    /// Wraps an IO failure on `path`, keeping permission problems distinguishable.
    pub fn from_io<P: AsRef<Path>>(err: io::Error, path: P) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                Error::PermissionDenied { path: path.as_ref().to_path_buf(), source: err }
            }
            _ => Error::Io(io::Error::new(
                err.kind(),
                format!("{}: {}", path.as_ref().display(), err),
            )),
        }
    }
}

fn join_lines(errors: &[Error]) -> String {
    errors.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n")
}

/// Convenience type alias for Results with projforge's Error.
pub type Result<T> = std::result::Result<T, Error>;
