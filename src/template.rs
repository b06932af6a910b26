//! Template definitions and their rendered, ready-to-write form.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::variables::{VariableDef, VariableDefs, VariableSet};

fn default_version() -> String {
    "1.0".to_string()
}

/// An immutable, named definition of files and directories with placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub variables: VariableDefs,
    /// Relative path pattern -> raw body. Both may contain placeholders.
    #[serde(default)]
    pub files: IndexMap<String, String>,
    /// Extra directories created even when empty.
    #[serde(default)]
    pub directories: Vec<String>,
}

impl Template {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: default_version(),
            author: String::new(),
            variables: VariableDefs::new(),
            files: IndexMap::new(),
            directories: Vec::new(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_variable<S: Into<String>>(mut self, key: S, def: VariableDef) -> Self {
        self.variables.insert(key.into(), def);
        self
    }

    pub fn with_file<P: Into<String>, B: Into<String>>(mut self, path: P, body: B) -> Self {
        self.files.insert(path.into(), body.into());
        self
    }

    pub fn with_directory<S: Into<String>>(mut self, path: S) -> Self {
        self.directories.push(path.into());
        self
    }

    /// Summary of this template as shown by `list` and `info`.
    pub fn info(&self, origin: TemplateOrigin) -> TemplateInfo {
        TemplateInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            author: self.author.clone(),
            variables: self.variables.clone(),
            file_count: self.files.len(),
            dir_count: self.directories.len(),
            origin,
        }
    }

    /// Tree of the raw, unrendered paths this template creates.
    pub fn preview(&self) -> String {
        let mut lines = vec![
            format!("Template: {}", self.name),
            format!("Description: {}", self.description),
            String::new(),
            "File Structure:".to_string(),
            "  {{name}}/".to_string(),
        ];

        let mut paths: Vec<String> = self
            .directories
            .iter()
            .map(|dir| format!("{}/", dir.trim_end_matches('/')))
            .chain(self.files.keys().cloned())
            .collect();
        paths.sort();

        for path in &paths {
            let trimmed = path.trim_end_matches('/');
            let depth = trimmed.matches('/').count();
            let leaf = trimmed.rsplit('/').next().unwrap_or(trimmed);
            let suffix = if path.ends_with('/') { "/" } else { "" };
            lines.push(format!("    {}{leaf}{suffix}", "  ".repeat(depth)));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} files, {} directories",
            self.files.len(),
            self.directories.len()
        ));
        lines.join("\n")
    }
}

/// Where a template definition came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Custom(PathBuf),
}

impl std::fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateOrigin::Builtin => write!(f, "[built-in]"),
            TemplateOrigin::Custom(_) => write!(f, "[custom]"),
        }
    }
}

/// Template metadata without bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub variables: VariableDefs,
    pub file_count: usize,
    pub dir_count: usize,
    pub origin: TemplateOrigin,
}

impl TemplateInfo {
    pub fn is_builtin(&self) -> bool {
        self.origin == TemplateOrigin::Builtin
    }
}

/// A template with every placeholder resolved, ready for the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedProject {
    /// Relative output path -> final content.
    pub files: IndexMap<PathBuf, String>,
    pub directories: Vec<PathBuf>,
}

impl RenderedProject {
    /// Directories then files, without contents.
    pub fn structure(&self) -> Vec<PathBuf> {
        self.directories.iter().chain(self.files.keys()).cloned().collect()
    }
}

/// Checks a rendered path and strips `.` components from it.
///
/// Rejects empty paths, absolute paths, `..` and empty segments such as
/// `src//main.py`, which usually mean a variable rendered to nothing.
pub fn normalize_output_path(rendered: &str) -> Result<PathBuf> {
    let invalid = |reason: &str| Error::InvalidOutputPath {
        path: rendered.to_string(),
        reason: reason.to_string(),
    };

    if rendered.trim().is_empty() {
        return Err(invalid("path is empty"));
    }

    let path = Path::new(rendered);
    if path.is_absolute() || rendered.starts_with('/') {
        return Err(invalid("path must be relative"));
    }
    if rendered.trim_end_matches('/').split('/').any(str::is_empty) {
        return Err(invalid("path contains an empty segment"));
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("path must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"))
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(invalid("path is empty"));
    }
    Ok(normalized)
}

/// Attaches `file` to every missing-variable error in `err`.
fn in_file(err: Error, file: &str) -> Vec<Error> {
    match err {
        Error::MissingVariable { name, .. } => {
            vec![Error::MissingVariable { name, file: Some(file.to_string()) }]
        }
        Error::Render { errors } => errors.into_iter().flat_map(|e| in_file(e, file)).collect(),
        other => vec![other],
    }
}

fn render_field(
    renderer: &dyn TemplateRenderer,
    text: &str,
    variables: &VariableSet,
    file: &str,
    errors: &mut Vec<Error>,
) -> Option<String> {
    match renderer.render(text, variables) {
        Ok(rendered) => Some(rendered),
        Err(err) => {
            errors.extend(in_file(err, file));
            None
        }
    }
}

/// Renders every path and body of `template`.
///
/// All problems across all files are collected before failing. A single
/// problem is returned as is; several are wrapped in `Error::Render`.
pub fn render_all(
    template: &Template,
    variables: &VariableSet,
    renderer: &dyn TemplateRenderer,
) -> Result<RenderedProject> {
    let mut errors = Vec::new();
    let mut project = RenderedProject::default();
    let mut sources: HashMap<PathBuf, &str> = HashMap::new();

    for dir_pattern in &template.directories {
        let Some(rendered) = render_field(renderer, dir_pattern, variables, dir_pattern, &mut errors)
        else {
            continue;
        };
        match normalize_output_path(&rendered) {
            Ok(path) if sources.contains_key(&path) => {
                debug!("Directory '{}' listed more than once", path.display());
            }
            Ok(path) => {
                sources.insert(path.clone(), dir_pattern);
                project.directories.push(path);
            }
            Err(err) => errors.push(err),
        }
    }

    for (path_pattern, body) in &template.files {
        let path = render_field(renderer, path_pattern, variables, path_pattern, &mut errors);
        let content = render_field(renderer, body, variables, path_pattern, &mut errors);
        let (Some(path), Some(content)) = (path, content) else {
            continue;
        };

        let path = match normalize_output_path(&path) {
            Ok(path) => path,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        if let Some(first) = sources.get(&path) {
            errors.push(Error::DuplicateOutputPath {
                path: path.display().to_string(),
                first: first.to_string(),
                second: path_pattern.clone(),
            });
            continue;
        }

        debug!("Rendered '{}' -> '{}'", path_pattern, path.display());
        sources.insert(path.clone(), path_pattern);
        project.files.insert(path, content);
    }

    match errors.len() {
        0 => Ok(project),
        1 => Err(errors.remove(0)),
        _ => Err(Error::Render { errors }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_output_path() {
        assert_eq!(normalize_output_path("./a/b.py").unwrap(), PathBuf::from("a/b.py"));
        assert_eq!(normalize_output_path("src/").unwrap(), PathBuf::from("src"));
        assert!(normalize_output_path("").is_err());
        assert!(normalize_output_path(".").is_err());
        assert!(normalize_output_path("/etc/passwd").is_err());
        assert!(normalize_output_path("../outside.txt").is_err());
        assert!(normalize_output_path("a//b.txt").is_err());
    }

    #[test]
    fn test_in_file_flattens_render_errors() {
        let err = Error::Render {
            errors: vec![
                Error::MissingVariable { name: "a".into(), file: None },
                Error::MissingVariable { name: "b".into(), file: None },
            ],
        };
        let errors = in_file(err, "x.txt");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(
            e,
            Error::MissingVariable { file: Some(f), .. } if f == "x.txt"
        )));
    }
}
