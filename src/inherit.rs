//! Inheritance of dictionary and set attributes
//!
//! Both inheritors copy entries from one base class's collection into the
//! collection of the same name in a namespace under construction. Entries
//! already present in the namespace are overrides and are never touched. The
//! entries found eligible are returned so the caller can post-process them.

use crate::class::ClassRef;
use crate::namespace::{AttrDict, AttrSet, Attribute, Namespace};
use serde_json::Value;
use std::fmt;
use tracing::{trace, warn};

/// How eligible entries are handled
pub enum Inherit<F: ?Sized> {
    /// Merge and report every entry that is not overridden
    All,
    /// Report every entry that is not overridden, merge nothing
    ReportOnly,
    /// Merge and report only the entries the predicate accepts
    Filter(Box<F>),
}

/// Policy for [`inherit_dict`]
pub type DictInherit<'a> = Inherit<dyn FnMut(&str, &Value) -> bool + 'a>;

/// Policy for [`inherit_set`]
pub type SetInherit<'a> = Inherit<dyn FnMut(&str) -> bool + 'a>;

impl<F: ?Sized> Inherit<F> {
    /// Whether accepted entries are written into the namespace
    #[must_use]
    pub fn merges(&self) -> bool {
        !matches!(self, Self::ReportOnly)
    }
}

impl<'a> DictInherit<'a> {
    /// Inherit the entries for which `predicate(key, value)` holds
    pub fn filter(predicate: impl FnMut(&str, &Value) -> bool + 'a) -> Self {
        Self::Filter(Box::new(predicate))
    }

    fn accepts(&mut self, key: &str, value: &Value) -> bool {
        match self {
            Self::All | Self::ReportOnly => true,
            Self::Filter(predicate) => predicate(key, value),
        }
    }
}

impl<'a> SetInherit<'a> {
    /// Inherit the items for which `predicate(item)` holds
    pub fn filter(predicate: impl FnMut(&str) -> bool + 'a) -> Self {
        Self::Filter(Box::new(predicate))
    }

    fn accepts(&mut self, item: &str) -> bool {
        match self {
            Self::All | Self::ReportOnly => true,
            Self::Filter(predicate) => predicate(item),
        }
    }
}

impl<F: ?Sized> Default for Inherit<F> {
    fn default() -> Self {
        Self::All
    }
}

impl<F: ?Sized> fmt::Debug for Inherit<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::ReportOnly => f.write_str("ReportOnly"),
            Self::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

/// Inherit dictionary entries from `base` into `namespace[attr_name]`.
///
/// The namespace dictionary is created if absent. Keys it already holds are
/// skipped. Returns the `(key, value)` pairs that were inherited, or that
/// would have been under [`Inherit::ReportOnly`], in the base's order.
pub fn inherit_dict(
    base: &ClassRef,
    namespace: &mut Namespace,
    attr_name: &str,
    mut inherit: DictInherit<'_>,
) -> Vec<(String, Value)> {
    let base_dict = base.get_dict(attr_name);
    let merge = inherit.merges();

    let mut target: Option<&mut AttrDict> = match namespace.dict_entry(attr_name) {
        Attribute::Dict(dict) => Some(dict),
        other => {
            warn!(attr = attr_name, kind = other.kind(), "namespace attribute is not a dict; not merging");
            None
        }
    };

    let mut items = Vec::new();
    for (key, value) in base_dict.iter() {
        if target.as_ref().is_some_and(|dict| dict.contains_key(key)) {
            continue;
        }
        if !inherit.accepts(key, value) {
            continue;
        }
        if merge && let Some(dict) = target.as_mut() {
            dict.insert(key.clone(), value.clone());
        }
        items.push((key.clone(), value.clone()));
    }

    trace!(base = %base, attr = attr_name, inherited = items.len(), merge, "inherit_dict");
    items
}

/// Inherit set items from `base` into `namespace[attr_name]`.
///
/// The namespace set is created if absent. Items it already holds are
/// skipped. Returns the items that were inherited, or that would have been
/// under [`Inherit::ReportOnly`], in the base's order.
pub fn inherit_set(
    base: &ClassRef,
    namespace: &mut Namespace,
    attr_name: &str,
    mut inherit: SetInherit<'_>,
) -> Vec<String> {
    let base_set = base.get_set(attr_name);
    let merge = inherit.merges();

    let mut target: Option<&mut AttrSet> = match namespace.set_entry(attr_name) {
        Attribute::Set(set) => Some(set),
        other => {
            warn!(attr = attr_name, kind = other.kind(), "namespace attribute is not a set; not merging");
            None
        }
    };

    let mut items = Vec::new();
    for item in base_set.iter() {
        if target.as_ref().is_some_and(|set| set.contains(item)) {
            continue;
        }
        if !inherit.accepts(item) {
            continue;
        }
        if merge && let Some(set) = target.as_mut() {
            set.insert(item.clone());
        }
        items.push(item.clone());
    }

    trace!(base = %base, attr = attr_name, inherited = items.len(), merge, "inherit_set");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use serde_json::json;

    #[test]
    fn test_filter_sees_only_non_overridden_entries() {
        let mut dict = AttrDict::new();
        dict.insert("a".into(), json!(1));
        dict.insert("b".into(), json!(2));
        let base = Class::root("Base", Namespace::new().with("d", dict));

        let mut existing = AttrDict::new();
        existing.insert("b".into(), json!(9));
        let mut ns = Namespace::new().with("d", existing);

        let mut seen = Vec::new();
        let items = inherit_dict(
            &base,
            &mut ns,
            "d",
            DictInherit::filter(|k, _| {
                seen.push(k.to_string());
                true
            }),
        );
        assert_eq!(items, vec![("a".to_string(), json!(1))]);
        assert_eq!(seen, ["a"]);
    }

    #[test]
    fn test_non_dict_namespace_attribute_is_left_alone() {
        let mut dict = AttrDict::new();
        dict.insert("a".into(), json!(1));
        let base = Class::root("Base", Namespace::new().with("d", dict));
        let mut ns = Namespace::new().with("d", json!("not a dict"));

        let items = inherit_dict(&base, &mut ns, "d", DictInherit::All);
        assert_eq!(items.len(), 1);
        assert_eq!(ns.get("d"), Some(&Attribute::Value(json!("not a dict"))));
    }

    #[test]
    fn test_set_policy_debug() {
        assert_eq!(format!("{:?}", SetInherit::default()), "All");
        assert_eq!(format!("{:?}", SetInherit::filter(|_| true)), "Filter(..)");
        assert!(!SetInherit::ReportOnly.merges());
    }
}
