//! Conversion Model Types
//!
//! A conversion model maps raw property names to a canonical name and,
//! for tabular properties, to the labels of each column.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::builtin;

/// How one raw property is renamed and reshaped
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConversionRule {
    /// Target property name; the raw name is kept when absent
    #[serde(rename = "name")]
    pub canonical_name: Option<String>,
    /// Column labels for array-of-array values
    #[serde(rename = "fields", alias = "each")]
    pub field_names: Option<Vec<String>>,
}

impl ConversionRule {
    /// Rule that only renames
    pub fn rename(canonical_name: &str) -> Self {
        Self {
            canonical_name: Some(canonical_name.to_string()),
            field_names: None,
        }
    }

    /// Label the columns of each row
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Name a property ends up under
    pub fn target_name<'a>(&'a self, raw_name: &'a str) -> &'a str {
        self.canonical_name.as_deref().unwrap_or(raw_name)
    }
}

/// Raw property name to rule
///
/// Deserializes from TOML where every table is keyed by a raw property name:
///
/// ```toml
/// [line_list]
/// name = "lines"
/// fields = ["state", "callstate"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ConversionModel {
    rules: HashMap<String, ConversionRule>,
}

impl ConversionModel {
    /// An empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in default model
    pub fn builtin() -> &'static ConversionModel {
        builtin::builtin_model()
    }

    /// Parse a model from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse conversion model TOML")
    }

    /// Load a model from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read conversion model: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse conversion model TOML: {}", path.display()))
    }

    /// Add or replace the rule for `raw_name`
    pub fn insert(&mut self, raw_name: &str, rule: ConversionRule) {
        self.rules.insert(raw_name.to_string(), rule);
    }

    /// Builder form of [`ConversionModel::insert`]
    pub fn with_rule(mut self, raw_name: &str, rule: ConversionRule) -> Self {
        self.insert(raw_name, rule);
        self
    }

    pub fn get(&self, raw_name: &str) -> Option<&ConversionRule> {
        self.rules.get(raw_name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Raw property names with a rule, sorted
    pub fn raw_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// New model holding both; `other` wins per key
    pub fn merged_with(&self, other: &ConversionModel) -> ConversionModel {
        let mut rules = self.rules.clone();
        rules.extend(
            other
                .rules
                .iter()
                .map(|(name, rule)| (name.clone(), rule.clone())),
        );
        ConversionModel { rules }
    }
}

impl<S: Into<String>> FromIterator<(S, ConversionRule)> for ConversionModel {
    fn from_iter<I: IntoIterator<Item = (S, ConversionRule)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }
}
