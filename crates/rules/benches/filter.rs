use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ksfilter_rules::{FilterConfig, compile};

const MIXED_SPECS: &[&str] = &[
    "ks1",
    "ks2",
    "/^app_.*/",
    "/_events$/",
    "!app_tmp",
    "!/.*_staging$/",
];

fn keyspace_names() -> Vec<String> {
    let mut names: Vec<String> = (0..200).map(|i| format!("app_{i}")).collect();
    names.extend((0..50).map(|i| format!("tenant{i}_events")));
    names.extend((0..50).map(|i| format!("app_{i}_staging")));
    names.extend(["system", "system_auth", "system_schema", "ks1", "ks2"].map(String::from));
    names
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_exact_only", |b| {
        b.iter(|| compile("bench", black_box(&["ks1", "ks2", "ks3", "ks4"])));
    });

    c.bench_function("compile_mixed", |b| {
        b.iter(|| compile("bench", black_box(MIXED_SPECS)));
    });
}

fn bench_includes(c: &mut Criterion) {
    let names = keyspace_names();

    let mixed = compile("bench", MIXED_SPECS).filter;
    c.bench_function("includes_mixed", |b| {
        b.iter(|| {
            names
                .iter()
                .filter(|name| mixed.includes(black_box(name)))
                .count()
        });
    });

    let defaults = FilterConfig::default().compile().filter;
    c.bench_function("includes_default_exclusions", |b| {
        b.iter(|| {
            names
                .iter()
                .filter(|name| defaults.includes(black_box(name)))
                .count()
        });
    });
}

criterion_group!(benches, bench_compile, bench_includes);
criterion_main!(benches);
