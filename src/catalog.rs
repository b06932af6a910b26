//! Template catalog: built-in templates plus custom templates stored as
//! directories under `~/.projforge/templates`.
//!
//! A custom template directory looks like:
//! ```text
//! my-template/
//!     template.json      # or template.yml / template.yaml
//!     .projforgeignore   # optional
//!     files/             # bodies, paths may contain placeholders
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::builtin::builtin_templates;
use crate::constants::{TEMPLATE_FILES_DIR, TEMPLATE_METADATA_FILES};
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::template::{Template, TemplateInfo, TemplateOrigin};
use crate::variables::VariableDefs;

/// Schema every custom template metadata file must satisfy.
fn metadata_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "pattern": "^[A-Za-z0-9][A-Za-z0-9_-]*$" },
            "description": { "type": "string" },
            "version": { "type": "string" },
            "author": { "type": "string" },
            "variables": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "properties": {
                        "description": { "type": "string" },
                        "required": { "type": "boolean" },
                        "default": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            },
            "directories": { "type": "array", "items": { "type": "string" } }
        }
    })
}

#[derive(Debug, Deserialize)]
struct TemplateMetadata {
    name: Option<String>,
    description: Option<String>,
    version: Option<String>,
    author: Option<String>,
    #[serde(default)]
    variables: VariableDefs,
    #[serde(default)]
    directories: Vec<String>,
}

fn find_metadata_file(template_dir: &Path) -> Option<PathBuf> {
    TEMPLATE_METADATA_FILES
        .iter()
        .map(|file| template_dir.join(file))
        .find(|path| path.is_file())
}

fn parse_metadata(path: &Path) -> Result<TemplateMetadata> {
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    let raw: serde_json::Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    let validator = jsonschema::validator_for(&metadata_schema())
        .map_err(|e| Error::TemplateDefinition(e.to_string()))?;
    let violations: Vec<String> = validator.iter_errors(&raw).map(|e| e.to_string()).collect();
    if !violations.is_empty() {
        return Err(Error::TemplateDefinition(format!(
            "'{}': {}",
            path.display(),
            violations.join("; ")
        )));
    }

    Ok(serde_json::from_value(raw)?)
}

/// Reads a custom template's metadata without its file bodies.
///
/// Returns `Ok(None)` if `template_dir` has no metadata file.
pub fn load_metadata<P: AsRef<Path>>(template_dir: P) -> Result<Option<Template>> {
    let template_dir = template_dir.as_ref();
    let Some(metadata_path) = find_metadata_file(template_dir) else {
        return Ok(None);
    };

    debug!("Loading template metadata from {}", metadata_path.display());
    let metadata = parse_metadata(&metadata_path)?;
    let fallback_name = template_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut template = Template::new(metadata.name.unwrap_or(fallback_name));
    template.description = metadata.description.unwrap_or_else(|| "Custom template".to_string());
    if let Some(version) = metadata.version {
        template.version = version;
    }
    template.author = metadata.author.unwrap_or_else(|| "Unknown".to_string());
    template.variables = metadata.variables;
    template.directories = metadata.directories;
    Ok(Some(template))
}

/// Loads a complete custom template: metadata plus every body under `files/`.
///
/// Files that are not valid UTF-8 are skipped.
pub fn load_custom_template<P: AsRef<Path>>(template_dir: P) -> Result<Template> {
    let template_dir = template_dir.as_ref();
    let mut template = load_metadata(template_dir)?.ok_or_else(|| {
        Error::TemplateDefinition(format!(
            "no {} found in '{}'",
            TEMPLATE_METADATA_FILES.join(" / "),
            template_dir.display()
        ))
    })?;

    let files_dir = template_dir.join(TEMPLATE_FILES_DIR);
    if !files_dir.is_dir() {
        return Ok(template);
    }

    let ignored = parse_ignore_file(template_dir)?;
    let relative = |path: &Path| -> String {
        path.strip_prefix(&files_dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    };

    let walker = WalkDir::new(&files_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !ignored.is_match(relative(entry.path())));

    for entry in walker {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let rel = relative(entry.path());

        if entry.file_type().is_dir() {
            if !template.directories.contains(&rel) {
                template.directories.push(rel);
            }
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(content) => {
                template.files.insert(rel, content);
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                debug!("Skipping non UTF-8 file {}", entry.path().display());
            }
            Err(e) => return Err(Error::from_io(e, entry.path())),
        }
    }

    Ok(template)
}

fn copy_dir_all(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let rel = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::from_io(e, &target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| Error::from_io(e, &target))?;
        }
    }
    Ok(())
}

/// A catalog entry: metadata only, bodies are loaded on demand.
#[derive(Debug, Clone)]
struct Entry {
    template: Template,
    origin: TemplateOrigin,
}

/// Looks up templates by name.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    builtin: IndexMap<String, Template>,
    custom_dir: Option<PathBuf>,
}

impl TemplateCatalog {
    /// Catalog of the built-in templates plus the custom templates in `custom_dir`.
    pub fn new(custom_dir: Option<PathBuf>) -> Self {
        Self::from_templates(builtin_templates(), custom_dir)
    }

    /// Catalog whose built-in set is `templates`.
    pub fn from_templates(templates: Vec<Template>, custom_dir: Option<PathBuf>) -> Self {
        let builtin = templates.into_iter().map(|t| (t.name.clone(), t)).collect();
        Self { builtin, custom_dir }
    }

    pub fn custom_dir(&self) -> Option<&Path> {
        self.custom_dir.as_deref()
    }

    /// Every definition, built-in first, then custom sorted by directory.
    ///
    /// # Errors
    /// * `Error::DuplicateTemplateDefinition` if two definitions share a name
    fn entries(&self) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self
            .builtin
            .values()
            .map(|template| Entry { template: template.clone(), origin: TemplateOrigin::Builtin })
            .collect();

        let Some(custom_dir) = self.custom_dir.as_deref().filter(|dir| dir.is_dir()) else {
            return Ok(entries);
        };

        let mut dirs: Vec<PathBuf> = fs::read_dir(custom_dir)
            .map_err(|e| Error::from_io(e, custom_dir))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            let Some(template) = load_metadata(&dir)? else {
                debug!("Skipping {}: no template metadata", dir.display());
                continue;
            };

            if let Some(existing) = entries.iter().find(|e| e.template.name == template.name) {
                let location = match &existing.origin {
                    TemplateOrigin::Builtin => PathBuf::from("<built-in>"),
                    TemplateOrigin::Custom(path) => path.clone(),
                };
                return Err(Error::DuplicateTemplateDefinition { name: template.name, location });
            }
            entries.push(Entry { template, origin: TemplateOrigin::Custom(dir) });
        }

        Ok(entries)
    }

    /// Names of every known template.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|e| e.template.name).collect())
    }

    fn lookup(&self, name: &str) -> Result<(Template, TemplateOrigin)> {
        let mut entries = self.entries()?;
        let Some(index) = entries.iter().position(|e| e.template.name == name) else {
            return Err(Error::TemplateNotFound {
                name: name.to_string(),
                available: entries.into_iter().map(|e| e.template.name).collect(),
            });
        };

        let Entry { template, origin } = entries.swap_remove(index);
        match origin {
            TemplateOrigin::Builtin => Ok((template, origin)),
            TemplateOrigin::Custom(dir) => {
                let template = load_custom_template(&dir)?;
                Ok((template, TemplateOrigin::Custom(dir)))
            }
        }
    }

    /// Returns the full template called `name`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` listing every known name
    /// * `Error::DuplicateTemplateDefinition` if two definitions share a name
    pub fn get(&self, name: &str) -> Result<Template> {
        self.lookup(name).map(|(template, _)| template)
    }

    pub fn info(&self, name: &str) -> Result<TemplateInfo> {
        let (template, origin) = self.lookup(name)?;
        Ok(template.info(origin))
    }

    /// Summaries of every template.
    pub fn list(&self) -> Result<Vec<TemplateInfo>> {
        self.entries()?
            .into_iter()
            .map(|entry| match entry.origin {
                TemplateOrigin::Builtin => Ok(entry.template.info(TemplateOrigin::Builtin)),
                TemplateOrigin::Custom(dir) => {
                    let template = load_custom_template(&dir)?;
                    Ok(template.info(TemplateOrigin::Custom(dir)))
                }
            })
            .collect()
    }

    /// Copies the template directory `source` into the custom directory.
    ///
    /// Returns the installed location.
    ///
    /// # Errors
    /// * `Error::TemplateDefinition` if `source` has no valid metadata
    /// * `Error::DuplicateTemplateDefinition` if the name is already taken
    /// * `Error::Config` if the catalog has no custom directory
    pub fn add<P: AsRef<Path>>(&self, source: P) -> Result<PathBuf> {
        let source = source.as_ref();
        if !source.is_dir() {
            return Err(Error::TemplateDefinition(format!(
                "source directory not found: '{}'",
                source.display()
            )));
        }

        let template = load_metadata(source)?.ok_or_else(|| {
            Error::TemplateDefinition(format!("missing template.json in '{}'", source.display()))
        })?;

        let custom_dir = self
            .custom_dir
            .as_deref()
            .ok_or_else(|| Error::Config("no custom template directory configured".to_string()))?;

        let dest = custom_dir.join(&template.name);
        if self.names()?.contains(&template.name) || dest.exists() {
            let location =
                if self.builtin.contains_key(&template.name) { PathBuf::from("<built-in>") } else { dest };
            return Err(Error::DuplicateTemplateDefinition { name: template.name, location });
        }

        debug!("Installing template '{}' to {}", template.name, dest.display());
        copy_dir_all(source, &dest)?;
        Ok(dest)
    }
}
