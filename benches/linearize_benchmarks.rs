//! Benchmarks for base class linearization and attribute inheritance

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use metatools::{AttrDict, Class, ClassRef, DictInherit, Namespace, inherit_dict, linearize};
use serde_json::json;
use std::fmt::Display;

fn require_ok<T, E>(result: Result<T, E>, context: &str) -> T
where
    E: Display,
{
    match result {
        Ok(value) => value,
        Err(err) => panic!("{context}: {err}"),
    }
}

/// A ladder of `width` parallel chains of depth `depth`, all rooted at `object`
fn ladder(width: usize, depth: usize) -> Vec<ClassRef> {
    let object = Class::root("object", Namespace::new());
    (0..width)
        .map(|w| {
            (0..depth).fold(object.clone(), |parent, d| {
                require_ok(
                    Class::new(format!("C{w}_{d}"), vec![parent], Namespace::new()),
                    "chain class",
                )
            })
        })
        .collect()
}

fn bench_linearize(c: &mut Criterion) {
    let narrow = ladder(2, 4);
    let wide = ladder(8, 16);

    c.bench_function("linearize_narrow", |b| {
        b.iter(|| require_ok(linearize(black_box(&narrow)), "narrow"));
    });
    c.bench_function("linearize_wide", |b| {
        b.iter(|| require_ok(linearize(black_box(&wide)), "wide"));
    });
}

fn bench_inherit_dict(c: &mut Criterion) {
    let registry: AttrDict = (0..256).map(|i| (format!("key{i}"), json!(i))).collect();
    let base = Class::root("Base", Namespace::new().with("registry", registry));

    c.bench_function("inherit_dict_256", |b| {
        b.iter(|| {
            let mut ns = Namespace::new();
            inherit_dict(black_box(&base), &mut ns, "registry", DictInherit::All)
        });
    });
}

criterion_group!(benches, bench_linearize, bench_inherit_dict);
criterion_main!(benches);
