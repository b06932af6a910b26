//! Name handling: case conversions used for derived variables and the
//! project-name validity rule.

use std::sync::LazyLock;

use cruet::Inflector;
use regex::Regex;

use crate::error::{Error, NameRule, Result};

/// Longest accepted project name.
pub const MAX_NAME_LEN: usize = 100;

/// Device names rejected on every platform so generated projects stay portable.
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));
static LOWER_UPPER_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));
static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("valid regex"));
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid regex"));

/// Marks word boundaries inside `name` with underscores.
///
/// `HTTPServer` becomes `HTTP_Server`, `myTool2Go` becomes `my_Tool2_Go`.
fn mark_boundaries(name: &str) -> String {
    let marked = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    LOWER_UPPER_BOUNDARY.replace_all(&marked, "${1}_${2}").into_owned()
}

/// Converts a project name to snake_case.
///
/// ```
/// use projforge::naming::to_snake_case;
/// assert_eq!(to_snake_case("MyCoolTool"), "my_cool_tool");
/// assert_eq!(to_snake_case("HTTPServer2"), "http_server2");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let lowered = mark_boundaries(name).to_lowercase();
    NON_ALNUM_RUN.replace_all(&lowered, "_").trim_matches('_').to_string()
}

/// Splits a name into words on case boundaries and non-alphanumeric separators.
pub fn split_words(name: &str) -> Vec<String> {
    NON_ALNUM_RUN
        .split(&mark_boundaries(name))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Converts a project name to space separated Title Case.
///
/// Only the first letter of each word is touched, so acronyms survive:
/// `HTTPServer` becomes `HTTP Server`.
pub fn to_title_case(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn to_kebab_case(name: &str) -> String {
    to_snake_case(name).to_kebab_case()
}

/// Checks a project name against the portability rules, reporting the first broken one.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = |rule| Error::InvalidName { name: name.to_string(), rule };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid(NameRule::Empty)),
        Some(first) if !first.is_ascii_alphabetic() => {
            return Err(invalid(NameRule::MustStartWithLetter))
        }
        Some(_) => {}
    }

    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')) {
        return Err(invalid(NameRule::InvalidCharacter(bad)));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(invalid(NameRule::TooLong(len)));
    }

    if RESERVED_NAMES.iter().any(|reserved| reserved.eq_ignore_ascii_case(name)) {
        return Err(invalid(NameRule::Reserved(name.to_string())));
    }

    Ok(())
}

/// Returns true if `key` can be used as a variable name.
pub fn is_valid_variable_name(key: &str) -> bool {
    IDENTIFIER.is_match(key)
}
