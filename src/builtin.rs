//! Templates compiled into the binary.

use crate::template::Template;
use crate::variables::{VariableDef, AUTO_DEFAULT};

const GITIGNORE: &str = include_str!("builtin/common/gitignore.tmpl");
const LICENSE: &str = include_str!("builtin/common/LICENSE.tmpl");

fn with_common_variables(template: Template) -> Template {
    template
        .with_variable("name", VariableDef::new("Project name (PascalCase)").required())
        .with_variable("description", VariableDef::new("One-line project description").required())
        .with_variable("author", VariableDef::new("Author name").with_default("Unknown"))
        .with_variable("org", VariableDef::new("Organization").with_default("Independent"))
        .with_variable("license", VariableDef::new("License identifier").with_default("MIT"))
        .with_variable("year", VariableDef::new("Copyright year").with_default(AUTO_DEFAULT))
}

fn python_cli() -> Template {
    let template = Template::new("python-cli")
        .with_description("Standard Python CLI tool with argparse, tests, and documentation");

    with_common_variables(template)
        .with_file("{{name_lower}}.py", include_str!("builtin/python_cli/tool.py.tmpl"))
        .with_file("test_{{name_lower}}.py", include_str!("builtin/python_cli/test_tool.py.tmpl"))
        .with_file("README.md", include_str!("builtin/python_cli/README.md.tmpl"))
        .with_file("setup.py", include_str!("builtin/python_cli/setup.py.tmpl"))
        .with_file("requirements.txt", include_str!("builtin/python_cli/requirements.txt.tmpl"))
        .with_file("LICENSE", LICENSE)
        .with_file(".gitignore", GITIGNORE)
}

fn python_lib() -> Template {
    let template = Template::new("python-lib")
        .with_description("Python library package with module structure, tests, and docs");

    with_common_variables(template)
        .with_directory("{{name_lower}}")
        .with_directory("tests")
        .with_file("{{name_lower}}/__init__.py", include_str!("builtin/python_lib/init.py.tmpl"))
        .with_file("{{name_lower}}/core.py", include_str!("builtin/python_lib/core.py.tmpl"))
        .with_file("tests/__init__.py", "")
        .with_file("tests/test_core.py", include_str!("builtin/python_lib/test_core.py.tmpl"))
        .with_file("pyproject.toml", include_str!("builtin/python_lib/pyproject.toml.tmpl"))
        .with_file("README.md", include_str!("builtin/python_lib/README.md.tmpl"))
        .with_file("LICENSE", LICENSE)
        .with_file(".gitignore", GITIGNORE)
}

/// Team Brain tool with the full set of build-phase documents.
fn teambrain_standard() -> Template {
    let mut template = Template::new("teambrain-standard").with_description(
        "Full Holy Grail Protocol standard - complete Team Brain tool with all 9-phase files",
    );
    template.author = "Team Brain".to_string();

    template
        .with_variable("name", VariableDef::new("Tool name (PascalCase)").required())
        .with_variable("description", VariableDef::new("One-line tool description").required())
        .with_variable("author", VariableDef::new("Author/builder name").with_default("ATLAS (Team Brain)"))
        .with_variable("org", VariableDef::new("Organization").with_default("Metaphy LLC"))
        .with_variable("year", VariableDef::new("Copyright year").with_default(AUTO_DEFAULT))
        .with_variable("builder", VariableDef::new("Builder agent name").with_default("ATLAS"))
        .with_variable(
            "requested_by",
            VariableDef::new("Who requested this tool").with_default("Self-initiated"),
        )
        .with_variable("github_user", VariableDef::new("GitHub account").with_default("DonkRonk17"))
        .with_directory("branding")
        .with_file("{{name_lower}}.py", include_str!("builtin/teambrain/tool.py.tmpl"))
        .with_file("test_{{name_lower}}.py", include_str!("builtin/teambrain/test_tool.py.tmpl"))
        .with_file("README.md", include_str!("builtin/teambrain/README.md.tmpl"))
        .with_file("EXAMPLES.md", include_str!("builtin/teambrain/EXAMPLES.md.tmpl"))
        .with_file("CHEAT_SHEET.txt", include_str!("builtin/teambrain/CHEAT_SHEET.txt.tmpl"))
        .with_file(
            "BUILD_COVERAGE_PLAN.md",
            include_str!("builtin/teambrain/BUILD_COVERAGE_PLAN.md.tmpl"),
        )
        .with_file("BUILD_AUDIT.md", include_str!("builtin/teambrain/BUILD_AUDIT.md.tmpl"))
        .with_file("ARCHITECTURE.md", include_str!("builtin/teambrain/ARCHITECTURE.md.tmpl"))
        .with_file("BUILD_REPORT.md", include_str!("builtin/teambrain/BUILD_REPORT.md.tmpl"))
        .with_file("INTEGRATION_PLAN.md", include_str!("builtin/teambrain/INTEGRATION_PLAN.md.tmpl"))
        .with_file(
            "QUICK_START_GUIDES.md",
            include_str!("builtin/teambrain/QUICK_START_GUIDES.md.tmpl"),
        )
        .with_file(
            "INTEGRATION_EXAMPLES.md",
            include_str!("builtin/teambrain/INTEGRATION_EXAMPLES.md.tmpl"),
        )
        .with_file("requirements.txt", include_str!("builtin/teambrain/requirements.txt.tmpl"))
        .with_file("setup.py", include_str!("builtin/teambrain/setup.py.tmpl"))
        .with_file("LICENSE", include_str!("builtin/teambrain/LICENSE.tmpl"))
        .with_file(".gitignore", include_str!("builtin/teambrain/gitignore.tmpl"))
        .with_file(
            "branding/BRANDING_PROMPTS.md",
            include_str!("builtin/teambrain/branding/BRANDING_PROMPTS.md.tmpl"),
        )
}

/// Every built-in template, in listing order.
pub fn builtin_templates() -> Vec<Template> {
    vec![python_cli(), python_lib(), teambrain_standard()]
}
