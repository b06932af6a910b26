//! Command-line interface implementation for projforge.
//! Provides argument parsing using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for projforge.
#[derive(Parser, Debug)]
#[command(author, version, about = "projforge: project scaffolding from named templates", long_about = None)]
pub struct Cli {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ~/.projforge/config.json)
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    Create(CreateArgs),

    /// List available templates
    List {
        /// Show variable details
        #[arg(short, long)]
        long: bool,
    },

    /// Show the file structure a template creates
    Preview {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Show detailed template information
    Info {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Manage custom templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Show the effective configuration
    Config {
        /// Write the configuration file with defaults if it does not exist
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Install a custom template directory
    Add {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Template name; with a single argument it is the project name and the
    /// configured default template is used
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Project name (PascalCase recommended)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Set a template variable (can repeat)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Directory the project directory is created in (default: current dir)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Prompt for missing required variables
    #[arg(short, long)]
    pub interactive: bool,

    /// Initialize a git repository in the new project
    #[arg(long)]
    pub git: bool,

    /// Show what would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write into an existing non-empty project directory
    #[arg(short, long)]
    pub force: bool,
}

impl CreateArgs {
    /// `(template, project name)`, falling back to `default_template`.
    pub fn template_and_name(&self, default_template: &str) -> (String, String) {
        match &self.name {
            Some(name) => (self.template.clone(), name.clone()),
            None => (default_template.to_string(), self.template.clone()),
        }
    }
}

/// Parses a `KEY=VALUE` pair, trimming both sides.
pub fn parse_var(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing variable name in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Parses command line arguments, exiting with clap's usage message on error.
pub fn get_args() -> Cli {
    Cli::parse()
}
