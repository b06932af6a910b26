//! Project creation orchestration.
//! Ties the catalog, variable resolution, rendering and generation together.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::catalog::TemplateCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::generator::{FileGenerator, GenerateOptions, GenerateResult};
use crate::naming::validate_project_name;
use crate::prompt::Prompter;
use crate::renderer::{PlaceholderRenderer, TemplateRenderer};
use crate::template::{render_all, RenderedProject, TemplateInfo};
use crate::variables::{VariableDef, VariableResolver, VariableSet};

/// Everything needed to create one project.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub template: String,
    pub project_name: String,
    /// User overrides, highest priority.
    pub variables: VariableSet,
    /// Parent of the project directory. Defaults to the working directory.
    pub output_dir: Option<PathBuf>,
    pub options: GenerateOptions,
}

impl CreateRequest {
    pub fn new<T: Into<String>, N: Into<String>>(template: T, project_name: N) -> Self {
        Self { template: template.into(), project_name: project_name.into(), ..Self::default() }
    }

    pub fn with_variable<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.variables.insert(key, value);
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// `<output_dir>/<project_name>`.
    pub fn project_root(&self) -> Result<PathBuf> {
        let parent = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(parent.join(&self.project_name))
    }
}

/// Main projforge interface.
pub struct Forge {
    catalog: TemplateCatalog,
    config: Config,
    renderer: Box<dyn TemplateRenderer>,
    generator: FileGenerator,
}

impl Forge {
    pub fn new(catalog: TemplateCatalog, config: Config) -> Self {
        Self {
            catalog,
            config,
            renderer: Box::new(PlaceholderRenderer::new()),
            generator: FileGenerator::new(),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves variables and renders the requested template without touching disk.
    ///
    /// Required variables missing from every source are asked from `prompter`
    /// when one is given.
    pub fn render_project(
        &self,
        request: &CreateRequest,
        prompter: Option<&dyn Prompter>,
        resolver: &VariableResolver,
    ) -> Result<RenderedProject> {
        validate_project_name(&request.project_name)?;
        let template = self.catalog.get(&request.template)?;
        let config_defaults = self.config.variable_defaults();

        let mut overrides = request.variables.clone();
        if let Some(prompter) = prompter {
            let unmet = resolver.unmet_required(
                &request.project_name,
                &template.variables,
                &overrides,
                &config_defaults,
            );
            for key in unmet {
                let def = &template.variables[&key];
                match prompter.ask(&key, def)? {
                    Some(value) => overrides.insert(key, value),
                    None => debug!("No value given for '{key}'"),
                }
            }
        }

        let variables = resolver.resolve(
            &request.project_name,
            &template.variables,
            &overrides,
            &config_defaults,
        )?;
        debug!("Resolved {} variable(s) for '{}'", variables.len(), template.name);

        render_all(&template, &variables, &*self.renderer)
    }

    /// Creates a project, resolving dates against the current time.
    pub fn create_project(
        &self,
        request: &CreateRequest,
        prompter: Option<&dyn Prompter>,
    ) -> Result<GenerateResult> {
        self.create_project_with(request, prompter, &VariableResolver::now())
    }

    /// Creates a project with an explicit resolver.
    ///
    /// # Errors
    /// Validation and rendering errors are returned before anything is written.
    /// Per-file write failures are reported in the returned `GenerateResult`.
    pub fn create_project_with(
        &self,
        request: &CreateRequest,
        prompter: Option<&dyn Prompter>,
        resolver: &VariableResolver,
    ) -> Result<GenerateResult> {
        let project = self.render_project(request, prompter, resolver)?;
        let project_root = request.project_root()?;
        info!("Generating '{}' into {}", request.template, project_root.display());
        self.generator.generate(&project, &project_root, request.options)
    }

    /// Formatted listing of every template.
    pub fn list_templates(&self, long: bool) -> Result<String> {
        let templates = self.catalog.list()?;
        if templates.is_empty() {
            return Ok("No templates available.".to_string());
        }

        let rule = "=".repeat(60);
        let mut lines = vec!["Available Templates:".to_string(), rule.clone()];
        for template in &templates {
            lines.push(format!("\n  {} {}", template.name, template.origin));
            lines.push(format!("    {}", template.description));
            lines.push(format!("    Files: {} | Dirs: {}", template.file_count, template.dir_count));
            if long {
                lines.push("    Variables:".to_string());
                lines.extend(template.variables.iter().map(|(key, def)| {
                    format!("      {key} - {}", describe_variable(def))
                }));
            }
        }
        lines.push(format!("\n{rule}"));
        lines.push(format!("Total: {} templates", templates.len()));
        Ok(lines.join("\n"))
    }

    /// Raw file tree of a template, placeholders left in place.
    pub fn preview_template(&self, name: &str) -> Result<String> {
        Ok(self.catalog.get(name)?.preview())
    }

    pub fn template_info(&self, name: &str) -> Result<TemplateInfo> {
        self.catalog.info(name)
    }

    /// Installs the custom template at `source`.
    pub fn add_template<P: AsRef<Path>>(&self, source: P) -> Result<PathBuf> {
        self.catalog.add(source)
    }
}

/// `description [default: x] (required)`.
pub fn describe_variable(def: &VariableDef) -> String {
    let mut text = def.description.clone();
    if let Some(default) = &def.default {
        text.push_str(&format!(" [default: {default}]"));
    }
    if def.required {
        text.push_str(" (required)");
    }
    text
}
