//! projforge scaffolds new projects from named templates.
//! It resolves template variables from several sources, renders
//! `{{placeholder}}` text and writes the result as a new directory tree.

/// Templates compiled into the binary
pub mod builtin;

/// Built-in and custom template lookup
/// Custom templates live in ~/.projforge/templates
pub mod catalog;

/// Command-line interface module
pub mod cli;

/// User configuration (~/.projforge/config.json)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Project creation orchestration
pub mod forge;

/// Writes rendered projects to disk
pub mod generator;

/// Git repository initialisation
pub mod git;

/// Ignore patterns applied when loading custom templates
pub mod ignore;

/// Case conversions and name validation
pub mod naming;

/// User input for unmet required variables
pub mod prompt;

/// Placeholder parsing and substitution
pub mod renderer;

/// Template definitions and rendering of whole templates
pub mod template;

/// Variable sources and their precedence
pub mod variables;
