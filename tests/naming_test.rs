use projforge::error::{Error, NameRule};
use projforge::naming::{
    is_valid_variable_name, to_kebab_case, to_snake_case, to_title_case, validate_project_name,
};

fn rule_of(name: &str) -> NameRule {
    match validate_project_name(name) {
        Err(Error::InvalidName { rule, .. }) => rule,
        other => panic!("expected InvalidName for '{name}', got {other:?}"),
    }
}

#[test]
fn test_snake_case_conversions() {
    assert_eq!(to_snake_case("MyCoolTool"), "my_cool_tool");
    assert_eq!(to_snake_case("my-cool-tool"), "my_cool_tool");
    assert_eq!(to_snake_case("camelCase"), "camel_case");
    assert_eq!(to_snake_case("HTTPServer2"), "http_server2");
    assert_eq!(to_snake_case("Tool2Go"), "tool2_go");
    assert_eq!(to_snake_case("ABC"), "abc");
    assert_eq!(to_snake_case("__odd--name__"), "odd_name");
}

#[test]
fn test_snake_case_is_idempotent() {
    for name in ["MyCoolTool", "HTTPServer2", "my-cool_tool", "FileOrganizer", "a"] {
        let once = to_snake_case(name);
        assert_eq!(to_snake_case(&once), once, "not idempotent for '{name}'");
    }
}

#[test]
fn test_title_case_keeps_acronyms() {
    assert_eq!(to_title_case("FileOrganizer"), "File Organizer");
    assert_eq!(to_title_case("my-cool_tool"), "My Cool Tool");
    assert_eq!(to_title_case("HTTPServer2"), "HTTP Server2");
}

#[test]
fn test_kebab_case() {
    assert_eq!(to_kebab_case("MyCoolTool"), "my-cool-tool");
    assert_eq!(to_kebab_case("file_organizer"), "file-organizer");
}

#[test]
fn test_valid_project_names() {
    let longest = "x".repeat(100);
    for name in ["a", "FileOrganizer", "my-tool_2", "CONSOLE", "Com10", longest.as_str()] {
        assert!(validate_project_name(name).is_ok(), "'{name}' should be valid");
    }
}

#[test]
fn test_invalid_project_names() {
    assert_eq!(rule_of(""), NameRule::Empty);
    assert_eq!(rule_of("1tool"), NameRule::MustStartWithLetter);
    assert_eq!(rule_of("_tool"), NameRule::MustStartWithLetter);
    assert_eq!(rule_of("my tool"), NameRule::InvalidCharacter(' '));
    assert_eq!(rule_of("my.tool"), NameRule::InvalidCharacter('.'));
    assert_eq!(rule_of(&"x".repeat(101)), NameRule::TooLong(101));
}

#[test]
fn test_reserved_names_ignore_case() {
    assert_eq!(rule_of("con"), NameRule::Reserved("con".to_string()));
    assert_eq!(rule_of("Nul"), NameRule::Reserved("Nul".to_string()));
    assert_eq!(rule_of("COM9"), NameRule::Reserved("COM9".to_string()));
    assert_eq!(rule_of("lpt1"), NameRule::Reserved("lpt1".to_string()));
}

#[test]
fn test_variable_names() {
    assert!(is_valid_variable_name("name"));
    assert!(is_valid_variable_name("_private2"));
    assert!(!is_valid_variable_name("2fast"));
    assert!(!is_valid_variable_name("bad-key"));
    assert!(!is_valid_variable_name(""));
}
