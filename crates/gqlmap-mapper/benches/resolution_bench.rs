//! Recursive resolution benchmarks.
//!
//! Measures ancestor fallback and interface inference on deep and wide
//! hierarchies where only a few classes carry their own type.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gqlmap_hierarchy::{ClassHierarchy, ClassHierarchyBuilder};
use gqlmap_mapper::{RecursiveTypeMapper, StaticTypeMapper};
use gqlmap_schema::{InterfaceType, ObjectType};
use std::sync::Arc;

/// A single superclass chain `C0 <- C1 <- ... <- C{depth-1}`, each level
/// also implementing its own interface `I{n}`.
fn deep_hierarchy(depth: usize) -> ClassHierarchy {
    let mut builder = ClassHierarchyBuilder::new();
    for level in 0..depth {
        let interface = format!("I{level}");
        let class = format!("C{level}");
        let parent = (level > 0).then(|| format!("C{}", level - 1));
        builder.interface(&interface, &[]);
        builder.class(&class, parent.as_deref(), &[interface.as_str()]);
    }
    builder.build().unwrap()
}

fn deep_mapper(depth: usize) -> RecursiveTypeMapper<StaticTypeMapper> {
    let mut static_mapper = StaticTypeMapper::new();
    static_mapper
        .set_types([("C0", Arc::new(ObjectType::new("Root")))])
        .set_interfaces((0..depth).step_by(4).map(|level| {
            (
                format!("I{level}"),
                Arc::new(InterfaceType::new(format!("Interface{level}"))),
            )
        }));
    RecursiveTypeMapper::new(static_mapper, deep_hierarchy(depth))
}

fn bench_map_class_to_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_class_to_type");

    for depth in [4usize, 16, 64] {
        let mapper = deep_mapper(depth);
        let leaf = format!("C{}", depth - 1);
        group.bench_with_input(BenchmarkId::new("deep_chain", depth), &leaf, |b, leaf| {
            b.iter(|| black_box(mapper.map_class_to_type(black_box(leaf)).unwrap()))
        });
    }

    group.finish();
}

fn bench_find_interfaces(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_interfaces");

    for depth in [4usize, 16, 64] {
        let mapper = deep_mapper(depth);
        let leaf = format!("C{}", depth - 1);
        group.bench_with_input(BenchmarkId::new("deep_chain", depth), &leaf, |b, leaf| {
            b.iter(|| black_box(mapper.find_interfaces(black_box(leaf)).unwrap()))
        });
    }

    group.finish();
}

fn bench_unmapped_miss(c: &mut Criterion) {
    let mapper = RecursiveTypeMapper::new(StaticTypeMapper::new(), deep_hierarchy(64));
    c.bench_function("can_map_class_to_type/miss_deep_chain", |b| {
        b.iter(|| black_box(mapper.can_map_class_to_type(black_box("C63"))))
    });
}

criterion_group!(
    benches,
    bench_map_class_to_type,
    bench_find_interfaces,
    bench_unmapped_miss
);
criterion_main!(benches);
