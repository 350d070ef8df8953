//! Settings for metaclass construction
//!
//! [`MetaSettings`] declares which attributes a [`MetaClass`](crate::MetaClass)
//! inherits from its bases, whether each is a dictionary or a set, and how
//! the inherited entries are handled. Settings load from YAML or JSON.

use crate::error::{MetaError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How inherited entries of one attribute are handled
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InheritMode {
    /// Copy eligible entries into the new class
    #[default]
    Merge,
    /// Only report eligible entries; the caller merges them itself
    ReportOnly,
}

/// Inheritance settings for a single attribute
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttributeSettings {
    /// Mode for this attribute, falling back to [`MetaSettings::default_mode`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<InheritMode>,

    /// Keys (or set items) that are never inherited
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Metaclass settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetaSettings {
    /// Dictionary attributes to inherit, in processing order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dicts: IndexMap<String, AttributeSettings>,

    /// Set attributes to inherit, in processing order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sets: IndexMap<String, AttributeSettings>,

    /// Mode for attributes that do not set their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<InheritMode>,

    /// Reject bases listed more than once (defaults to true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_duplicate_bases: Option<bool>,
}

impl MetaSettings {
    /// Create empty settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dictionary attribute with default settings
    #[must_use]
    pub fn with_dict(mut self, name: impl Into<String>) -> Self {
        self.dicts.insert(name.into(), AttributeSettings::default());
        self
    }

    /// Add a set attribute with default settings
    #[must_use]
    pub fn with_set(mut self, name: impl Into<String>) -> Self {
        self.sets.insert(name.into(), AttributeSettings::default());
        self
    }

    /// Merge with another settings object (other takes precedence)
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.dicts.extend(other.dicts);
        self.sets.extend(other.sets);
        if other.default_mode.is_some() {
            self.default_mode = other.default_mode;
        }
        if other.reject_duplicate_bases.is_some() {
            self.reject_duplicate_bases = other.reject_duplicate_bases;
        }
        self
    }

    /// Effective mode for an attribute's settings
    #[must_use]
    pub fn mode_for(&self, attr: &AttributeSettings) -> InheritMode {
        attr.mode.or(self.default_mode).unwrap_or_default()
    }

    #[must_use]
    pub fn rejects_duplicate_bases(&self) -> bool {
        self.reject_duplicate_bases.unwrap_or(true)
    }

    /// Check the settings for contradictions
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty attribute name or an
    /// attribute declared both as a dictionary and as a set.
    pub fn validate(&self) -> Result<()> {
        for name in self.dicts.keys().chain(self.sets.keys()) {
            if name.is_empty() {
                return Err(MetaError::config("attribute names must not be empty"));
            }
        }
        if let Some(name) = self.dicts.keys().find(|name| self.sets.contains_key(*name)) {
            return Err(MetaError::config(format!(
                "attribute '{name}' is declared both as a dict and as a set"
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from YAML
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed YAML, or a configuration
    /// error if the settings fail [`MetaSettings::validate`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON, or a configuration
    /// error if the settings fail [`MetaSettings::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
