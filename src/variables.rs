//! Variable resolution: merges derived, temporal, template, config and user
//! sources into the single mapping used for rendering.

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::naming::{
    is_valid_variable_name, to_kebab_case, to_snake_case, to_title_case, validate_project_name,
};

/// Template default meaning "use the derived value of the same name".
pub const AUTO_DEFAULT: &str = "auto";

/// Keys derived from the project name.
pub const NAME_VARIABLES: [&str; 6] =
    ["name", "name_lower", "name_upper", "name_snake", "name_title", "name_kebab"];

/// An ordered mapping from variable name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableSet(IndexMap<String, String>);

impl VariableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the value of `key`.
    ///
    /// # Returns
    /// * `Option<&str>` - The value, or `None` if no source set `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets `key`, replacing any earlier value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Copies every entry of `other` over this set.
    pub fn overlay(&mut self, other: &VariableSet) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Variable names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = VariableSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// A variable declared by a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDef {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl VariableDef {
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self { description: description.into(), ..Self::default() }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default<S: Into<String>>(mut self, default: S) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Variable declarations of a template, in declaration order.
pub type VariableDefs = IndexMap<String, VariableDef>;

/// Builds the final variable mapping for one invocation.
///
/// The timestamp is captured once at construction, so `date`, `year` and
/// `month` always agree with each other.
#[derive(Debug, Clone)]
pub struct VariableResolver {
    timestamp: NaiveDateTime,
}

impl VariableResolver {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self { timestamp }
    }

    /// Resolver pinned to the current local time.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Name variants computed from `name`.
    ///
    /// `name_upper` is the raw name uppercased with `-` and spaces turned
    /// into `_`; the other variants go through snake_case.
    pub fn name_variables(name: &str) -> VariableSet {
        let snake = to_snake_case(name);
        VariableSet::from_iter([
            ("name", name.to_string()),
            ("name_lower", snake.to_lowercase()),
            ("name_upper", name.to_uppercase().replace(['-', ' '], "_")),
            ("name_snake", snake),
            ("name_title", to_title_case(name)),
            ("name_kebab", to_kebab_case(name)),
        ])
    }

    /// `date`, `year` and `month` from the captured timestamp.
    pub fn temporal_variables(&self) -> VariableSet {
        VariableSet::from_iter([
            ("date", self.timestamp.format("%Y-%m-%d").to_string()),
            ("year", self.timestamp.format("%Y").to_string()),
            ("month", self.timestamp.format("%B").to_string()),
        ])
    }

    /// Merges every source, later ones winning:
    /// derived names, temporal values, template defaults, config defaults, user overrides.
    fn merge(
        &self,
        project_name: &str,
        defs: &VariableDefs,
        overrides: &VariableSet,
        config_defaults: &VariableSet,
    ) -> VariableSet {
        let mut resolved = Self::name_variables(project_name);
        resolved.overlay(&self.temporal_variables());
        let automatic = resolved.clone();

        for (key, def) in defs {
            match def.default.as_deref() {
                Some(AUTO_DEFAULT) => {
                    resolved.insert(key, automatic.get(key).unwrap_or_default());
                }
                Some(default) => resolved.insert(key, default),
                None => {}
            }
        }
        debug!("Applied {} template default(s)", defs.values().filter(|d| d.default.is_some()).count());

        resolved.overlay(config_defaults);
        debug!("Applied {} config default(s)", config_defaults.len());

        resolved.overlay(overrides);
        debug!("Applied {} user override(s)", overrides.len());

        // Only keys still holding their derived value follow a new `name`.
        if let Some(name) = overrides.get("name") {
            for (key, value) in Self::name_variables(name).iter() {
                let pinned_by_template = defs
                    .get(key)
                    .and_then(|def| def.default.as_deref())
                    .is_some_and(|default| default != AUTO_DEFAULT);
                if !overrides.contains_key(key)
                    && !config_defaults.contains_key(key)
                    && !pinned_by_template
                {
                    resolved.insert(key, value);
                }
            }
        }

        resolved
    }

    /// Required variables that would have no value after merging.
    pub fn unmet_required(
        &self,
        project_name: &str,
        defs: &VariableDefs,
        overrides: &VariableSet,
        config_defaults: &VariableSet,
    ) -> Vec<String> {
        let merged = self.merge(project_name, defs, overrides, config_defaults);
        defs.iter()
            .filter(|(key, def)| def.required && !merged.contains_key(key))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Produces the final variable mapping.
    ///
    /// # Arguments
    /// * `project_name` - Name the `name_*` variables are derived from
    /// * `defs` - Variables declared by the template, with their defaults
    /// * `overrides` - User supplied values, highest priority
    /// * `config_defaults` - Fallback values from the user configuration
    ///
    /// # Returns
    /// * `Result<VariableSet>` - Every derived, temporal, default and supplied variable
    ///
    /// # Errors
    /// * `Error::InvalidName` if `project_name` breaks the naming rules
    /// * `Error::InvalidVariableName` if an override or config key is not an identifier
    /// * `Error::MissingRequiredVariable` if a required variable has no value
    pub fn resolve(
        &self,
        project_name: &str,
        defs: &VariableDefs,
        overrides: &VariableSet,
        config_defaults: &VariableSet,
    ) -> Result<VariableSet> {
        validate_project_name(project_name)?;

        if let Some(bad) = overrides
            .keys()
            .chain(config_defaults.keys())
            .find(|key| !is_valid_variable_name(key))
        {
            return Err(Error::InvalidVariableName { name: bad.to_string() });
        }

        let missing = self.unmet_required(project_name, defs, overrides, config_defaults);
        if !missing.is_empty() {
            return Err(Error::MissingRequiredVariable { names: missing });
        }

        Ok(self.merge(project_name, defs, overrides, config_defaults))
    }
}
