use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use chrono::NaiveDate;
use projforge::catalog::TemplateCatalog;
use projforge::config::Config;
use projforge::error::{Error, Result};
use projforge::forge::{CreateRequest, Forge};
use projforge::generator::GenerateOptions;
use projforge::git::init_repository;
use projforge::prompt::Prompter;
use projforge::template::Template;
use projforge::variables::{VariableDef, VariableResolver};
use tempfile::TempDir;

fn resolver() -> VariableResolver {
    let timestamp = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
    VariableResolver::new(timestamp)
}

/// Answers prompts from a fixed table and records what was asked.
struct ScriptedPrompter {
    answers: HashMap<String, String>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(answers: &[(&str, &str)]) -> Self {
        Self {
            answers: answers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, key: &str, _def: &VariableDef) -> Result<Option<String>> {
        self.asked.borrow_mut().push(key.to_string());
        Ok(self.answers.get(key).cloned())
    }
}

fn organizer_forge() -> Forge {
    let template = Template::new("organizer")
        .with_file("{{name_lower}}.py", "# {{name}}\n")
        .with_file("README.md", "{{name_title}} ({{year}})");
    Forge::new(TemplateCatalog::from_templates(vec![template], None), Config::default())
}

#[test_log::test]
fn test_end_to_end_file_organizer() {
    let temp_dir = TempDir::new().unwrap();
    let forge = organizer_forge();
    let request = CreateRequest::new("organizer", "FileOrganizer").with_output_dir(temp_dir.path());

    let result = forge.create_project_with(&request, None, &resolver()).unwrap();

    let root = temp_dir.path().join("FileOrganizer");
    assert!(result.success);
    assert_eq!(result.project_path, root);
    assert_eq!(result.files_created, 2);
    assert_eq!(result.dirs_created, 0);
    assert_eq!(fs::read_to_string(root.join("file_organizer.py")).unwrap(), "# FileOrganizer\n");
    assert_eq!(fs::read_to_string(root.join("README.md")).unwrap(), "File Organizer (2026)");
}

#[test]
fn test_dry_run_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let forge = organizer_forge();
    let request = CreateRequest::new("organizer", "FileOrganizer")
        .with_output_dir(temp_dir.path())
        .with_options(GenerateOptions { dry_run: true, force: false });

    let result = forge.create_project_with(&request, None, &resolver()).unwrap();

    assert!(result.dry_run);
    assert_eq!(result.planned.len(), 2);
    assert!(!temp_dir.path().join("FileOrganizer").exists());
}

#[test]
fn test_builtin_python_cli() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config { default_author: Some("Ada".to_string()), ..Config::default() };
    let forge = Forge::new(TemplateCatalog::new(None), config);
    let request = CreateRequest::new("python-cli", "MyTool")
        .with_output_dir(temp_dir.path())
        .with_variable("description", "Sorts things");

    let result = forge.create_project_with(&request, None, &resolver()).unwrap();
    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.files_created, 7);

    let root = temp_dir.path().join("MyTool");
    assert!(root.join("my_tool.py").is_file());
    assert!(root.join("test_my_tool.py").is_file());
    assert!(root.join(".gitignore").is_file());

    let license = fs::read_to_string(root.join("LICENSE")).unwrap();
    assert!(license.contains("2026"));
    assert!(license.contains("Ada"));
    assert!(!license.contains("{{"));
}

#[test]
fn test_builtin_teambrain_standard() {
    let temp_dir = TempDir::new().unwrap();
    let forge = Forge::new(TemplateCatalog::new(None), Config::default());
    let request = CreateRequest::new("teambrain-standard", "DataWrangler")
        .with_output_dir(temp_dir.path())
        .with_variable("description", "Cleans tabular data")
        .with_variable("requested_by", "Forge");

    let result = forge.create_project_with(&request, None, &resolver()).unwrap();
    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.files_created, 17);
    assert_eq!(result.dirs_created, 1);

    let root = temp_dir.path().join("DataWrangler");
    let tool = fs::read_to_string(root.join("data_wrangler.py")).unwrap();
    assert!(tool.contains("class DataWrangler:"));
    assert!(tool.contains("For: Metaphy LLC"));
    assert!(root.join("test_data_wrangler.py").is_file());
    assert!(root.join("branding/BRANDING_PROMPTS.md").is_file());

    let cheat_sheet = fs::read_to_string(root.join("CHEAT_SHEET.txt")).unwrap();
    assert!(cheat_sheet.contains("DATAWRANGLER CHEAT SHEET"));
    assert!(!cheat_sheet.contains("{{"));

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.contains("**Requested By:** Forge"));
    let report = fs::read_to_string(root.join("BUILD_REPORT.md")).unwrap();
    assert!(report.contains("**Builder:** ATLAS"));
    assert!(report.contains("2026-03-01"));
    let license = fs::read_to_string(root.join("LICENSE")).unwrap();
    assert!(license.contains("Copyright (c) 2026 ATLAS (Team Brain)"));
}

#[test]
fn test_user_variable_beats_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config { default_author: Some("Ada".to_string()), ..Config::default() };
    let forge = Forge::new(TemplateCatalog::new(None), config);
    let request = CreateRequest::new("python-lib", "MyLib")
        .with_output_dir(temp_dir.path())
        .with_variable("description", "Library")
        .with_variable("author", "Grace");

    let result = forge.create_project_with(&request, None, &resolver()).unwrap();
    assert!(result.success);
    assert_eq!(result.dirs_created, 2);

    let root = temp_dir.path().join("MyLib");
    assert!(root.join("my_lib/__init__.py").is_file());
    let license = fs::read_to_string(root.join("LICENSE")).unwrap();
    assert!(license.contains("Grace"));
    assert!(!license.contains("Ada"));
}

#[test]
fn test_missing_required_without_prompter() {
    let temp_dir = TempDir::new().unwrap();
    let forge = Forge::new(TemplateCatalog::new(None), Config::default());
    let request = CreateRequest::new("python-cli", "MyTool").with_output_dir(temp_dir.path());

    match forge.create_project_with(&request, None, &resolver()).unwrap_err() {
        Error::MissingRequiredVariable { names } => assert_eq!(names, vec!["description"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!temp_dir.path().join("MyTool").exists());
}

#[test]
fn test_prompter_fills_required_variables() {
    let temp_dir = TempDir::new().unwrap();
    let forge = Forge::new(TemplateCatalog::new(None), Config::default());
    let request = CreateRequest::new("python-cli", "MyTool").with_output_dir(temp_dir.path());
    let prompter = ScriptedPrompter::new(&[("description", "Prompted text")]);

    let result = forge.create_project_with(&request, Some(&prompter), &resolver()).unwrap();

    assert!(result.success);
    assert_eq!(*prompter.asked.borrow(), vec!["description"]);
    let readme = fs::read_to_string(temp_dir.path().join("MyTool/README.md")).unwrap();
    assert!(readme.contains("Prompted text"));
}

#[test]
fn test_declined_prompt_fails() {
    let temp_dir = TempDir::new().unwrap();
    let forge = Forge::new(TemplateCatalog::new(None), Config::default());
    let request = CreateRequest::new("python-cli", "MyTool").with_output_dir(temp_dir.path());
    let prompter = ScriptedPrompter::new(&[]);

    let err = forge.create_project_with(&request, Some(&prompter), &resolver()).unwrap_err();
    assert!(matches!(err, Error::MissingRequiredVariable { .. }));
}

#[test]
fn test_invalid_name_has_no_side_effects() {
    let temp_dir = TempDir::new().unwrap();
    let forge = organizer_forge();
    let request = CreateRequest::new("organizer", "my tool").with_output_dir(temp_dir.path());

    let err = forge.create_project_with(&request, None, &resolver()).unwrap_err();
    assert!(matches!(err, Error::InvalidName { .. }));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_render_errors_prevent_writes() {
    let temp_dir = TempDir::new().unwrap();
    let template = Template::new("broken")
        .with_file("{{a:config}}.py", "")
        .with_file("{{b:config}}.py", "");
    let forge =
        Forge::new(TemplateCatalog::from_templates(vec![template], None), Config::default());
    let request = CreateRequest::new("broken", "Thing").with_output_dir(temp_dir.path());

    let err = forge.create_project_with(&request, None, &resolver()).unwrap_err();
    assert!(matches!(err, Error::DuplicateOutputPath { .. }));
    assert!(!temp_dir.path().join("Thing").exists());
}

#[test]
fn test_listing_and_preview() {
    let forge = Forge::new(TemplateCatalog::new(None), Config::default());

    let listing = forge.list_templates(true).unwrap();
    assert!(listing.starts_with("Available Templates:\n"));
    assert!(listing.contains("  python-cli [built-in]"));
    assert!(listing.contains("description - One-line project description (required)"));
    assert!(listing.ends_with("Total: 3 templates"));

    let preview = forge.preview_template("python-lib").unwrap();
    assert!(preview.contains("    tests/\n      __init__.py\n      test_core.py"));
    assert!(preview.ends_with("Total: 8 files, 2 directories"));

    let info = forge.template_info("python-cli").unwrap();
    assert_eq!(info.file_count, 7);
}

#[test]
fn test_git_init_in_generated_project() {
    let temp_dir = TempDir::new().unwrap();
    let forge = organizer_forge();
    let request = CreateRequest::new("organizer", "FileOrganizer").with_output_dir(temp_dir.path());

    let result = forge.create_project_with(&request, None, &resolver()).unwrap();
    init_repository(&result.project_path).unwrap();

    assert!(result.project_path.join(".git").is_dir());
}
