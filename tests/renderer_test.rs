use projforge::error::Error;
use projforge::renderer::{referenced_variables, PlaceholderRenderer, TemplateRenderer};
use projforge::variables::VariableSet;

fn render(template: &str, pairs: &[(&str, &str)]) -> Result<String, Error> {
    let vars: VariableSet = pairs.iter().map(|(k, v)| (*k, *v)).collect();
    PlaceholderRenderer::new().render(template, &vars)
}

#[test]
fn test_value_and_inline_default() {
    let out = render("Hello {{name}}, version {{v:1.0}}", &[("name", "World")]).unwrap();
    assert_eq!(out, "Hello World, version 1.0");
}

#[test]
fn test_value_wins_over_inline_default() {
    let out = render("v{{version:0.1.0}}", &[("version", "2.0.0")]).unwrap();
    assert_eq!(out, "v2.0.0");
}

#[test]
fn test_whitespace_around_name() {
    let out = render("{{ name }}|{{\tname\t}}", &[("name", "x")]).unwrap();
    assert_eq!(out, "x|x");
}

#[test]
fn test_default_is_taken_verbatim() {
    assert_eq!(render("{{url:http://localhost:8080}}", &[]).unwrap(), "http://localhost:8080");
    assert_eq!(render("[{{pad: a b }}]", &[]).unwrap(), "[ a b ]");
    assert_eq!(render("[{{empty:}}]", &[]).unwrap(), "[]");
}

#[test]
fn test_missing_variable() {
    let err = render("a {{name}} {{missing}}", &[("name", "x")]).unwrap_err();
    match err {
        Error::MissingVariable { name, file } => {
            assert_eq!(name, "missing");
            assert_eq!(file, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_all_missing_variables_reported_once() {
    let err = render("{{a}} {{b}} {{a}}", &[]).unwrap_err();
    match err {
        Error::Render { errors } => {
            let names: Vec<String> = errors
                .into_iter()
                .map(|e| match e {
                    Error::MissingVariable { name, .. } => name,
                    other => panic!("unexpected error: {other:?}"),
                })
                .collect();
            assert_eq!(names, vec!["a", "b"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_values_are_not_expanded_again() {
    let out = render("{{a}}", &[("a", "{{b}}"), ("b", "nope")]).unwrap();
    assert_eq!(out, "{{b}}");
}

#[test]
fn test_non_placeholders_pass_through() {
    let text = "fn main() { let x = {}; } {{ not valid }} {{}} {{1abc}} {{open";
    assert_eq!(render(text, &[]).unwrap(), text);
}

#[test]
fn test_unused_variables_are_ignored() {
    assert_eq!(render("plain", &[("unused", "x")]).unwrap(), "plain");
}

#[test]
fn test_referenced_variables() {
    let names = referenced_variables("{{b}} {{a:1}} {{b}} {{ c }} {{no good}}");
    assert_eq!(names, vec!["b", "a", "c"]);
}
