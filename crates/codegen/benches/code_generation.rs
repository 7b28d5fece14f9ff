use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use poolquote_codegen::{CodeGenerator, RawCatalogRecord};

/// Synthetic export mixing sized pools, brand-sensitive rows and plain duplicates.
fn synthetic_batch(size: usize) -> Vec<RawCatalogRecord> {
    let templates: [(&str, &str, &str, Option<&str>); 6] = [
        ("Bazén obdélník {a} x {b} x 1,2 m skimmer", "bazeny", "", None),
        ("Bazén kruh Ø {a} x 1,{b} m přeliv", "bazeny", "", None),
        ("Tepelné čerpadlo {a},{b} kW", "technologie", "tepelna cerpadla", Some("Hayward")),
        ("Chlor tablety {a} kg", "chemie", "", None),
        ("Schodiště románské {a}00 mm", "prislusenstvi", "schodiste", None),
        ("Montáž bazénu", "sluzby", "", None),
    ];

    (0..size)
        .map(|i| {
            let (name, category, subcategory, brand) = templates[i % templates.len()];
            let a = 2 + (i / templates.len()) % 8;
            let b = 3 + (i / 7) % 6;
            RawCatalogRecord {
                name: name.replace("{a}", &a.to_string()).replace("{b}", &b.to_string()),
                category: Some(category.to_string()),
                subcategory: Some(subcategory.to_string()),
                brand: brand.map(str::to_string),
                ..RawCatalogRecord::default()
            }
        })
        .collect()
}

fn bench_generate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_batch");

    for size in [100usize, 1_000, 10_000] {
        let batch = synthetic_batch(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| CodeGenerator::generate_batch(black_box(batch)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_batch);
criterion_main!(benches);
