//! Class construction host
//!
//! [`MetaClass`] ties the linearizer and the inheritors together: it walks
//! the linearized bases of a new class and, for every ancestor, inherits each
//! attribute declared in its [`MetaSettings`]. Inherited entries are
//! collected in an [`InheritanceReport`] for post-processing.

use crate::class::{Class, ClassRef};
use crate::error::{MetaError, Result};
use crate::inherit::{DictInherit, SetInherit, inherit_dict, inherit_set};
use crate::linearize::iter_bases;
use crate::namespace::Namespace;
use crate::settings::{AttributeSettings, InheritMode, MetaSettings};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// An entry inherited from one ancestor
#[derive(Debug, Clone, PartialEq)]
pub struct Inherited<T> {
    /// The ancestor the entry came from
    pub from: ClassRef,
    pub entry: T,
}

/// Everything inherited while constructing one class, per attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InheritanceReport {
    pub dicts: IndexMap<String, Vec<Inherited<(String, Value)>>>,
    pub sets: IndexMap<String, Vec<Inherited<String>>>,
}

impl InheritanceReport {
    /// Entries inherited for a dictionary attribute
    #[must_use]
    pub fn dict(&self, attr: &str) -> &[Inherited<(String, Value)>] {
        self.dicts.get(attr).map(Vec::as_slice).unwrap_or_default()
    }

    /// Items inherited for a set attribute
    #[must_use]
    pub fn set(&self, attr: &str) -> &[Inherited<String>] {
        self.sets.get(attr).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of inherited entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.dicts.values().map(Vec::len).sum::<usize>() + self.sets.values().map(Vec::len).sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of [`MetaClass::construct`]
#[derive(Debug, Clone)]
pub struct Constructed {
    pub class: ClassRef,
    pub report: InheritanceReport,
}

/// A metaclass driven by [`MetaSettings`]
#[derive(Debug, Clone, Default)]
pub struct MetaClass {
    settings: MetaSettings,
}

impl MetaClass {
    /// Create a metaclass, validating its settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings are contradictory.
    pub fn new(settings: MetaSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    #[must_use]
    pub fn settings(&self) -> &MetaSettings {
        &self.settings
    }

    /// Construct a class named `name` from `bases` and its own `namespace`.
    ///
    /// Ancestors are visited in resolution order, so the nearest definition
    /// of an inherited entry wins and the namespace's own entries always win.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::InconsistentHierarchy`] if the bases cannot be
    /// linearized, or a configuration error for duplicate bases.
    pub fn construct(
        &self,
        name: impl Into<String>,
        bases: Vec<ClassRef>,
        mut namespace: Namespace,
    ) -> Result<Constructed> {
        let name = name.into();
        if self.settings.rejects_duplicate_bases() {
            let mut seen = HashSet::with_capacity(bases.len());
            if let Some(dup) = bases.iter().find(|base| !seen.insert(*base)) {
                return Err(MetaError::config(format!("duplicate base class {dup}")));
            }
        }

        let mut report = InheritanceReport::default();
        let mut ancestors = Vec::new();
        for ancestor in iter_bases(&bases) {
            let ancestor = ancestor?;
            self.inherit_from(&ancestor, &mut namespace, &mut report);
            ancestors.push(ancestor);
        }

        debug!(class = %name, ancestors = ancestors.len(), inherited = report.len(), "class constructed");
        let class = Class::from_parts(name, bases, ancestors, namespace);
        Ok(Constructed { class, report })
    }

    fn inherit_from(&self, ancestor: &ClassRef, namespace: &mut Namespace, report: &mut InheritanceReport) {
        for (attr, attr_settings) in &self.settings.dicts {
            let items = inherit_dict(ancestor, namespace, attr, self.dict_policy(attr_settings));
            debug!(ancestor = %ancestor, attr = %attr, count = items.len(), "inherited dict entries");
            report
                .dicts
                .entry(attr.clone())
                .or_default()
                .extend(items.into_iter().map(|entry| Inherited {
                    from: ancestor.clone(),
                    entry,
                }));
        }

        for (attr, attr_settings) in &self.settings.sets {
            let items = inherit_set(ancestor, namespace, attr, self.set_policy(attr_settings));
            debug!(ancestor = %ancestor, attr = %attr, count = items.len(), "inherited set items");
            report
                .sets
                .entry(attr.clone())
                .or_default()
                .extend(items.into_iter().map(|entry| Inherited {
                    from: ancestor.clone(),
                    entry,
                }));
        }
    }

    fn dict_policy<'a>(&self, attr: &'a AttributeSettings) -> DictInherit<'a> {
        match (self.settings.mode_for(attr), attr.exclude.is_empty()) {
            (InheritMode::ReportOnly, _) => DictInherit::ReportOnly,
            (InheritMode::Merge, true) => DictInherit::All,
            (InheritMode::Merge, false) => DictInherit::filter(move |key, _| !attr.exclude.iter().any(|x| x == key)),
        }
    }

    fn set_policy<'a>(&self, attr: &'a AttributeSettings) -> SetInherit<'a> {
        match (self.settings.mode_for(attr), attr.exclude.is_empty()) {
            (InheritMode::ReportOnly, _) => SetInherit::ReportOnly,
            (InheritMode::Merge, true) => SetInherit::All,
            (InheritMode::Merge, false) => SetInherit::filter(move |item| !attr.exclude.iter().any(|x| x == item)),
        }
    }
}
