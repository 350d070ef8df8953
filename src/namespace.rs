//! Attribute tables for classes and classes under construction
//!
//! A [`Namespace`] maps attribute names to [`Attribute`] values in insertion
//! order. The same table backs a finished [`Class`](crate::class::Class) and
//! the namespace a metaclass assembles while constructing a new class.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mapping-valued attribute
pub type AttrDict = IndexMap<String, Value>;

/// Set-valued attribute
pub type AttrSet = IndexSet<String>;

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Attribute {
    /// Dictionary attribute, e.g. a registry
    Dict(AttrDict),
    /// Set attribute, e.g. a tag set
    Set(AttrSet),
    /// Any other value
    Value(Value),
}

impl Attribute {
    /// Borrow the dictionary, if this attribute is one
    #[must_use]
    pub fn as_dict(&self) -> Option<&AttrDict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Borrow the set, if this attribute is one
    #[must_use]
    pub fn as_set(&self) -> Option<&AttrSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Short name of the attribute kind, for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dict(_) => "dict",
            Self::Set(_) => "set",
            Self::Value(_) => "value",
        }
    }
}

impl From<AttrDict> for Attribute {
    fn from(dict: AttrDict) -> Self {
        Self::Dict(dict)
    }
}

impl From<AttrSet> for Attribute {
    fn from(set: AttrSet) -> Self {
        Self::Set(set)
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Insertion-ordered attribute table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    attrs: IndexMap<String, Attribute>,
}

impl Namespace {
    /// Create an empty namespace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, attr: impl Into<Attribute>) -> Self {
        self.insert(name, attr);
        self
    }

    /// Insert or replace an attribute, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, attr: impl Into<Attribute>) -> Option<Attribute> {
        self.attrs.insert(name.into(), attr.into())
    }

    /// Look up an attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attrs.get(name)
    }

    /// Remove an attribute, preserving the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.attrs.shift_remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attrs.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    /// The dictionary stored under `name`, if there is one
    #[must_use]
    pub fn dict(&self, name: &str) -> Option<&AttrDict> {
        self.get(name).and_then(Attribute::as_dict)
    }

    /// The set stored under `name`, if there is one
    #[must_use]
    pub fn set(&self, name: &str) -> Option<&AttrSet> {
        self.get(name).and_then(Attribute::as_set)
    }

    /// Fetch the attribute under `name`, inserting an empty dictionary if absent.
    ///
    /// An existing attribute of another kind is returned as-is.
    pub fn dict_entry(&mut self, name: &str) -> &mut Attribute {
        self.attrs
            .entry(name.to_string())
            .or_insert_with(|| Attribute::Dict(AttrDict::new()))
    }

    /// Fetch the attribute under `name`, inserting an empty set if absent.
    ///
    /// An existing attribute of another kind is returned as-is.
    pub fn set_entry(&mut self, name: &str) -> &mut Attribute {
        self.attrs
            .entry(name.to_string())
            .or_insert_with(|| Attribute::Set(AttrSet::new()))
    }
}

impl<N: Into<String>, A: Into<Attribute>> FromIterator<(N, A)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (N, A)>>(iter: I) -> Self {
        let mut namespace = Self::new();
        for (name, attr) in iter {
            namespace.insert(name, attr);
        }
        namespace
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = (&'a String, &'a Attribute);
    type IntoIter = indexmap::map::Iter<'a, String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
