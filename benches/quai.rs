use criterion::{Criterion, criterion_group, criterion_main};
use quai::prelude::*;
use std::{env, hint::black_box, path::Path, time::Duration};

const NAMES: [&str; 4] = [
    "CHATELET-LES HALLES",
    "La Défense (Grande Arche)",
    "  Saint-Germain-des-Prés ",
    "GARE DE L'EST",
];

fn normalize_names() {
    for name in NAMES {
        let _ = black_box(normalize(name));
    }
}

fn all_views(dataset: &Dataset, filter: &Filter) {
    let validations = dataset.filtered_validations(filter);
    let joined = dataset.filtered_joined(filter);
    let _ = black_box(hourly_profile(validations.iter().copied()));
    let _ = black_box(heatmap(validations.iter().copied()));
    let _ = black_box(mode_distribution(joined.iter().copied()));
    let _ = black_box(geo_summary(joined.iter().copied()));
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalize");
    group.bench_function("Station names", |b| b.iter(normalize_names));
    group.finish();

    let data_dir = match env::var("QUAI_DATA_DIR") {
        Ok(path_str) => Path::new(&path_str).to_owned(),
        Err(err) => {
            println!("Missing QUAI_DATA_DIR environment variable: {err}");
            return;
        }
    };
    let validations = Source::file(data_dir.join("validations.csv"));
    let stations = Source::file(data_dir.join("stations.csv"));
    let dataset = Dataset::load(&validations, &stations, &Config::default())
        .expect("Failed to load dataset");

    let mut group = c.benchmark_group("Pipeline");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(15));

    group.bench_function("Join", |b| {
        b.iter(|| black_box(join(&dataset.validations, &dataset.stations)))
    });

    let everything = Filter::new();
    group.bench_function("Views, no filter", |b| {
        b.iter(|| all_views(&dataset, &everything))
    });

    let weekday = Filter::new().day_type("JOHV").hours(Some(7), Some(9));
    group.bench_function("Views, weekday rush", |b| {
        b.iter(|| all_views(&dataset, &weekday))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
