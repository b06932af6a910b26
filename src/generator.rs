//! Materializes a rendered project on disk.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::template::RenderedProject;

/// How a generation run may touch the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Only report what would be created.
    pub dry_run: bool,
    /// Allow writing into an existing non-empty directory.
    pub force: bool,
}

/// One filesystem entry a run creates, or would create in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    CreateDirectory(PathBuf),
    WriteFile(PathBuf),
}

impl PlannedAction {
    pub fn path(&self) -> &Path {
        match self {
            PlannedAction::CreateDirectory(path) | PlannedAction::WriteFile(path) => path,
        }
    }
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedAction::CreateDirectory(path) => write!(f, "{}/", path.display()),
            PlannedAction::WriteFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    pub success: bool,
    pub project_path: PathBuf,
    pub files_created: usize,
    pub dirs_created: usize,
    /// One message per failed directory or file; empty on success.
    pub errors: Vec<String>,
    /// Ordered directories then files. Filled in dry-run mode only.
    pub planned: Vec<PlannedAction>,
    /// Files written before and after any failure.
    pub written: Vec<PathBuf>,
    pub dry_run: bool,
}

impl GenerateResult {
    fn new(project_path: &Path, dry_run: bool) -> Self {
        Self {
            success: false,
            project_path: project_path.to_path_buf(),
            files_created: 0,
            dirs_created: 0,
            errors: Vec::new(),
            planned: Vec::new(),
            written: Vec::new(),
            dry_run,
        }
    }

    /// Human readable report of the run.
    pub fn summary(&self) -> String {
        if self.dry_run {
            let mut lines = vec!["DRY RUN - No files created. Would create:".to_string()];
            lines.extend(self.planned.iter().map(|action| format!("  {action}")));
            return lines.join("\n");
        }

        let mut lines = vec![
            format!("Project created at {}", self.project_path.display()),
            format!("  Files: {}", self.files_created),
            format!("  Directories: {}", self.dirs_created),
        ];
        lines.extend(self.errors.iter().map(|err| format!("  Error: {err}")));
        lines.join("\n")
    }
}

/// Fails unless `output_root` is absent, an empty directory, or `force` is set.
///
/// An existing non-directory is refused even with `force`.
pub fn ensure_output_dir<P: AsRef<Path>>(output_root: P, force: bool) -> Result<()> {
    let output_root = output_root.as_ref();
    if !output_root.exists() {
        return Ok(());
    }

    let exists = || Error::OutputExists { path: output_root.to_path_buf() };
    if !output_root.is_dir() {
        return Err(exists());
    }

    let is_empty = fs::read_dir(output_root)
        .map_err(|e| Error::from_io(e, output_root))?
        .next()
        .is_none();
    if is_empty {
        return Ok(());
    }

    if force {
        warn!("Writing into non-empty directory '{}'", output_root.display());
        Ok(())
    } else {
        Err(exists())
    }
}

/// Writes `content` to a temporary file next to `path`, then renames it into place.
///
/// A crash mid-write never leaves a partial file at `path`.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Writes rendered projects to disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileGenerator;

impl FileGenerator {
    /// Creates a new FileGenerator instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates `project` under `output_root`.
    ///
    /// # Arguments
    /// * `project` - Rendered files and directories, paths relative to `output_root`
    /// * `output_root` - Project directory; created if missing
    /// * `options` - Dry-run and force flags
    ///
    /// # Returns
    /// * `Result<GenerateResult>` - Counts, planned actions and per-entry failures
    ///
    /// # Errors
    /// * `Error::OutputExists` if `output_root` is non-empty and `force` is unset;
    ///   nothing is created in that case
    /// * `Error::PermissionDenied` / `Error::Io` if `output_root` itself cannot be created
    ///
    /// Failures on individual directories or files do not abort the run. They
    /// are listed in `GenerateResult::errors` next to the files already written.
    pub fn generate(
        &self,
        project: &RenderedProject,
        output_root: &Path,
        options: GenerateOptions,
    ) -> Result<GenerateResult> {
        ensure_output_dir(output_root, options.force)?;

        let mut result = GenerateResult::new(output_root, options.dry_run);

        if options.dry_run {
            for dir in &project.directories {
                result.planned.push(PlannedAction::CreateDirectory(output_root.join(dir)));
            }
            for path in project.files.keys() {
                result.planned.push(PlannedAction::WriteFile(output_root.join(path)));
            }
            result.dirs_created = project.directories.len();
            result.files_created = project.files.len();
            result.success = true;
            debug!("Dry run planned {} action(s)", result.planned.len());
            return Ok(result);
        }

        fs::create_dir_all(output_root).map_err(|e| Error::from_io(e, output_root))?;

        for dir in &project.directories {
            let target = output_root.join(dir);
            match fs::create_dir_all(&target) {
                Ok(()) => {
                    debug!("Created directory: {}", target.display());
                    result.dirs_created += 1;
                }
                Err(e) => {
                    let err = Error::from_io(e, &target);
                    warn!("{err}");
                    result.errors.push(format!("Cannot create directory '{}': {err}", dir.display()));
                }
            }
        }

        for (path, content) in &project.files {
            let target = output_root.join(path);
            match write_atomic(&target, content) {
                Ok(()) => {
                    debug!("Writing file: {}", target.display());
                    result.files_created += 1;
                    result.written.push(target);
                }
                Err(e) => {
                    let err = Error::from_io(e, &target);
                    warn!("{err}");
                    result.errors.push(format!("Cannot create file '{}': {err}", path.display()));
                }
            }
        }

        result.success = result.errors.is_empty();
        Ok(result)
    }
}
