//! 병합 벤치마크
//!
//! 레시피 목록 파싱, 매니페스트 파싱, 레이어 선택/병합 성능을 측정합니다.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use pkgmeta_inventory::parser::manifest::parse_manifest;
use pkgmeta_inventory::parser::recipes::parse_recipes;
use pkgmeta_inventory::{Layer, LayerTable, TieBreak, merge, resolve_records};

const LAYERS: [(&str, i64); 4] = [
    ("meta", 5),
    ("meta-poky", 5),
    ("meta-oe", 6),
    ("meta-custom", 10),
];

fn layer_table() -> LayerTable {
    LAYERS
        .iter()
        .map(|(name, priority)| {
            (
                name.to_string(),
                Layer {
                    name: name.to_string(),
                    path: format!("/srv/layers/{name}"),
                    priority: *priority,
                },
            )
        })
        .collect()
}

/// `show-recipes` 형식 출력 생성 (레시피마다 1~4개 레이어)
fn generate_recipes(count: usize) -> String {
    let mut out = String::from("Loading cache...done.\n=== Available recipes: ===\n");
    for i in 0..count {
        out.push_str(&format!("recipe-{i}:\n"));
        for (name, _) in LAYERS.iter().take(i % LAYERS.len() + 1) {
            out.push_str(&format!("  {name:<20} 1.{i}\n"));
        }
    }
    out
}

fn generate_manifest(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "PACKAGE NAME: pkg-{i}\nPACKAGE VERSION: 1.{i}\nRECIPE NAME: recipe-{i}\nLICENSE: MIT\n\n"
            )
        })
        .collect()
}

fn bench_parsing(c: &mut Criterion) {
    let recipes_1000 = generate_recipes(1000);
    let manifest_1000 = generate_manifest(1000);

    let mut group = c.benchmark_group("parsing");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("show_recipes_1000", |b| {
        b.iter(|| parse_recipes(black_box(&recipes_1000), "show-recipes").unwrap())
    });

    group.bench_function("license_manifest_1000", |b| {
        b.iter(|| parse_manifest(black_box(&manifest_1000), "license.manifest").unwrap())
    });

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let layers = layer_table();
    let recipes = parse_recipes(&generate_recipes(1000), "show-recipes").unwrap();
    let records = parse_manifest(&generate_manifest(1000), "license.manifest").unwrap();

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(1000));

    for mode in [TieBreak::HighestPriority, TieBreak::Lagged] {
        group.bench_function(format!("merge_1000_{mode}"), |b| {
            b.iter(|| merge(black_box(&layers), black_box(&recipes), black_box(&records), mode).unwrap())
        });
    }

    group.bench_function("resolve_1000", |b| {
        b.iter(|| resolve_records(black_box(records.clone()), &recipes, "-native"))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_merge);
criterion_main!(benches);
