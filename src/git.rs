//! Git repository initialisation for generated projects.

use std::path::Path;

use git2::Repository;
use log::debug;

use crate::error::Result;

/// Initialises an empty git repository in `project_dir`.
///
/// Running it on a directory that already holds a repository reinitialises
/// it without touching existing history.
pub fn init_repository<P: AsRef<Path>>(project_dir: P) -> Result<()> {
    let project_dir = project_dir.as_ref();
    debug!("Initialising git repository in {}", project_dir.display());
    Repository::init(project_dir)?;
    Ok(())
}
