//! Ignore patterns for custom templates.
//! Paths under a template's `files/` directory matching these globs are
//! left out of the loaded template, similar to .gitignore.

use std::fs::read_to_string;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::constants::{DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
use crate::error::{Error, Result};

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    let glob = Glob::new(pattern).map_err(|e| {
        Error::TemplateDefinition(format!("{IGNORE_FILE} pattern '{pattern}' is invalid: {e}"))
    })?;
    builder.add(glob);
    Ok(())
}

/// Builds the ignore set for the template in `template_dir`.
///
/// # Notes
/// - The default patterns always apply
/// - Blank lines and lines starting with `#` in `.projforgeignore` are skipped
/// - A pattern ending in `/` also ignores everything below that directory
///
/// # Example
/// ```ignore
/// # Contents of .projforgeignore:
/// *.pyc
/// __pycache__/
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_dir: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        add_pattern(&mut builder, pattern)?;
    }

    let ignore_path = template_dir.as_ref().join(IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.strip_suffix('/') {
                Some(dir) => {
                    add_pattern(&mut builder, dir)?;
                    add_pattern(&mut builder, &format!("{dir}/**"))?;
                }
                None => add_pattern(&mut builder, line)?,
            }
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }

    builder
        .build()
        .map_err(|e| Error::TemplateDefinition(format!("{IGNORE_FILE} loading failed: {e}")))
}
