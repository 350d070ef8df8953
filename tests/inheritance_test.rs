//! Tests for dictionary and set attribute inheritance

use metatools::{
    AttrDict, AttrSet, Class, ClassRef, DictInherit, Namespace, SetInherit, inherit_dict,
    inherit_set,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet};

fn dict(entries: &[(&str, i64)]) -> AttrDict {
    entries.iter().map(|(k, v)| ((*k).to_string(), json!(v))).collect()
}

fn set(items: &[&str]) -> AttrSet {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn dict_base() -> ClassRef {
    Class::root("Base", Namespace::new().with("the_dict", dict(&[("a", 1), ("b", 2), ("c", 3)])))
}

fn set_base() -> ClassRef {
    Class::root("Base", Namespace::new().with("the_set", set(&["a", "b", "c"])))
}

fn as_map(items: Vec<(String, Value)>) -> BTreeMap<String, Value> {
    items.into_iter().collect()
}

fn as_set(items: Vec<String>) -> BTreeSet<String> {
    items.into_iter().collect()
}

fn expected_map(entries: &[(&str, i64)]) -> BTreeMap<String, Value> {
    entries.iter().map(|(k, v)| ((*k).to_string(), json!(v))).collect()
}

fn expected_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn namespace_dict(ns: &Namespace, name: &str) -> BTreeMap<String, Value> {
    ns.dict(name)
        .map(|d| d.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

fn namespace_set(ns: &Namespace, name: &str) -> BTreeSet<String> {
    ns.set(name).map(|s| s.iter().cloned().collect()).unwrap_or_default()
}

#[test]
fn test_inherit_dict_report_only() {
    let mut ns = Namespace::new().with("the_dict", dict(&[("b", 4), ("d", 5)]));

    let result = inherit_dict(&dict_base(), &mut ns, "the_dict", DictInherit::ReportOnly);

    assert_eq!(as_map(result), expected_map(&[("a", 1), ("c", 3)]));
    assert_eq!(namespace_dict(&ns, "the_dict"), expected_map(&[("b", 4), ("d", 5)]));
    assert_eq!(ns.len(), 1);
}

#[test]
fn test_inherit_dict_simple() {
    let mut ns = Namespace::new().with("the_dict", dict(&[("b", 4), ("d", 5)]));

    let result = inherit_dict(&dict_base(), &mut ns, "the_dict", DictInherit::default());

    assert_eq!(as_map(result), expected_map(&[("a", 1), ("c", 3)]));
    assert_eq!(
        namespace_dict(&ns, "the_dict"),
        expected_map(&[("a", 1), ("b", 4), ("c", 3), ("d", 5)])
    );
}

#[test]
fn test_inherit_dict_nonexistent() {
    let mut ns = Namespace::new();

    let result = inherit_dict(&dict_base(), &mut ns, "the_dict", DictInherit::All);

    assert_eq!(as_map(result), expected_map(&[("a", 1), ("b", 2), ("c", 3)]));
    assert_eq!(namespace_dict(&ns, "the_dict"), expected_map(&[("a", 1), ("b", 2), ("c", 3)]));
}

#[test]
fn test_inherit_dict_filter() {
    let mut ns = Namespace::new().with("the_dict", dict(&[("b", 4), ("d", 5)]));

    let result = inherit_dict(
        &dict_base(),
        &mut ns,
        "the_dict",
        DictInherit::filter(|k, _| k != "c"),
    );

    assert_eq!(as_map(result), expected_map(&[("a", 1)]));
    assert_eq!(namespace_dict(&ns, "the_dict"), expected_map(&[("a", 1), ("b", 4), ("d", 5)]));
}

#[test]
fn test_inherit_dict_filter_sees_values() {
    let mut ns = Namespace::new();

    let result = inherit_dict(
        &dict_base(),
        &mut ns,
        "the_dict",
        DictInherit::filter(|_, v| v.as_i64().is_some_and(|n| n % 2 == 1)),
    );

    assert_eq!(as_map(result), expected_map(&[("a", 1), ("c", 3)]));
}

#[test]
fn test_inherit_dict_preserves_base_order() {
    let base = Class::root("Base", Namespace::new().with("d", dict(&[("z", 1), ("m", 2), ("a", 3)])));
    let mut ns = Namespace::new();

    let keys: Vec<String> = inherit_dict(&base, &mut ns, "d", DictInherit::All)
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    assert_eq!(keys, ["z", "m", "a"]);
}

#[test]
fn test_inherit_dict_missing_on_base() {
    let base = Class::root("Base", Namespace::new());
    let mut ns = Namespace::new().with("the_dict", dict(&[("b", 4)]));

    let result = inherit_dict(&base, &mut ns, "the_dict", DictInherit::All);

    assert!(result.is_empty());
    assert_eq!(namespace_dict(&ns, "the_dict"), expected_map(&[("b", 4)]));
}

#[test]
fn test_inherit_dict_through_ancestor() -> metatools::Result<()> {
    let child = Class::new("Child", vec![dict_base()], Namespace::new())?;
    let mut ns = Namespace::new();

    let result = inherit_dict(&child, &mut ns, "the_dict", DictInherit::All);

    assert_eq!(result.len(), 3);
    Ok(())
}

#[test]
fn test_inherit_set_report_only() {
    let mut ns = Namespace::new().with("the_set", set(&["b", "d"]));

    let result = inherit_set(&set_base(), &mut ns, "the_set", SetInherit::ReportOnly);

    assert_eq!(as_set(result), expected_set(&["a", "c"]));
    assert_eq!(namespace_set(&ns, "the_set"), expected_set(&["b", "d"]));
}

#[test]
fn test_inherit_set_simple() {
    let mut ns = Namespace::new().with("the_set", set(&["b", "d"]));

    let result = inherit_set(&set_base(), &mut ns, "the_set", SetInherit::default());

    assert_eq!(as_set(result), expected_set(&["a", "c"]));
    assert_eq!(namespace_set(&ns, "the_set"), expected_set(&["a", "b", "c", "d"]));
}

#[test]
fn test_inherit_set_nonexistent() {
    let mut ns = Namespace::new();

    let result = inherit_set(&set_base(), &mut ns, "the_set", SetInherit::All);

    assert_eq!(as_set(result), expected_set(&["a", "b", "c"]));
    assert_eq!(namespace_set(&ns, "the_set"), expected_set(&["a", "b", "c"]));
}

#[test]
fn test_inherit_set_filter() {
    let mut ns = Namespace::new().with("the_set", set(&["b", "d"]));

    let result = inherit_set(&set_base(), &mut ns, "the_set", SetInherit::filter(|i| i != "c"));

    assert_eq!(as_set(result), expected_set(&["a"]));
    assert_eq!(namespace_set(&ns, "the_set"), expected_set(&["a", "b", "d"]));
}

#[test]
fn test_inherit_set_missing_on_base() {
    let base = Class::root("Base", Namespace::new());
    let mut ns = Namespace::new();

    let result = inherit_set(&base, &mut ns, "the_set", SetInherit::All);

    assert!(result.is_empty());
    assert_eq!(namespace_set(&ns, "the_set"), BTreeSet::new());
}

#[test]
fn test_inherit_set_wrong_kind_on_base() {
    let base = Class::root("Base", Namespace::new().with("the_set", json!(["a", "b"])));
    let mut ns = Namespace::new();

    let result = inherit_set(&base, &mut ns, "the_set", SetInherit::All);

    assert!(result.is_empty());
}
