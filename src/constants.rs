//! Common constants used throughout projforge.

/// Directory under the home directory holding configuration and custom templates.
pub const CONFIG_DIR_NAME: &str = ".projforge";

/// Configuration file name inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Custom template directory inside the configuration directory.
pub const CUSTOM_TEMPLATES_DIR: &str = "templates";

/// Supported custom template metadata file names, in lookup order.
pub const TEMPLATE_METADATA_FILES: [&str; 3] = ["template.json", "template.yml", "template.yaml"];

/// Directory inside a custom template holding the file bodies.
pub const TEMPLATE_FILES_DIR: &str = "files";

/// Per-template ignore file name.
pub const IGNORE_FILE: &str = ".projforgeignore";

/// Patterns never copied from a custom template.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] =
    ["**/.DS_Store", "**/Thumbs.db", "**/.git/**", "**/desktop.ini"];
