//! Benchmark for forest fitting and single-record inference
//!
//! Run with: cargo bench --bench forest_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::rngs::StdRng;

use attrisk::inference::{predict, InferenceContext};
use attrisk::model::{Classifier, ForestConfig, RandomForest};
use attrisk::pipeline::{
    fit_encoders, fit_scaler, EmployeeRecord, FeatureRow, FEATURE_COUNT,
};

const DEPARTMENTS: [&str; 3] = ["Human Resources", "Research & Development", "Sales"];
const ROLES: [&str; 3] = ["Manager", "Research Scientist", "Sales Executive"];
const MODES: [&str; 3] = ["Hybrid", "On-site", "Remote"];

/// Generate synthetic encoded rows with a label driven by two columns
fn generate_rows(n_rows: usize, seed: u64) -> (Vec<FeatureRow>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n_rows);
    let mut target = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let mut row = [0.0; FEATURE_COUNT];
        for v in row.iter_mut() {
            *v = rng.gen::<f64>() * 2.0 - 1.0;
        }
        let label = u8::from((row[8] > 0.3 && row[5] < 0.0) || rng.gen::<f64>() < 0.05);
        rows.push(row);
        target.push(label);
    }
    (rows, target)
}

fn generate_records(n: usize, seed: u64) -> Vec<EmployeeRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| EmployeeRecord {
            age: rng.gen_range(18..=60),
            department: DEPARTMENTS[i % 3].to_string(),
            job_role: ROLES[i % 3].to_string(),
            monthly_income: rng.gen_range(1000..=20000),
            percent_salary_hike: rng.gen_range(11..=25),
            job_satisfaction: rng.gen_range(1..=4),
            work_life_balance: rng.gen_range(1..=4),
            years_at_company: rng.gen_range(0..=40),
            over_time: if i % 3 == 0 { "Yes" } else { "No" }.to_string(),
            distance_from_home: rng.gen_range(1..=29),
            work_mode: MODES[i % 3].to_string(),
        })
        .collect()
}

fn bench_forest_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_fit");
    group.sample_size(10);

    for n_rows in [500, 1470, 5000] {
        let (rows, target) = generate_rows(n_rows, 42);
        let config = ForestConfig {
            n_trees: 50,
            ..ForestConfig::default()
        };

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::new("50_trees", n_rows), &n_rows, |b, _| {
            b.iter(|| RandomForest::fit(black_box(&rows), black_box(&target), &config))
        });
    }

    group.finish();
}

fn bench_single_prediction(c: &mut Criterion) {
    let (rows, target) = generate_rows(1470, 7);
    let forest = match RandomForest::fit(&rows, &target, &ForestConfig::default()) {
        Ok(f) => f,
        Err(e) => panic!("forest fit failed: {}", e),
    };

    let records = generate_records(200, 7);
    let encoders = fit_encoders(&records);
    let scaler = fit_scaler(&records);
    let context = InferenceContext::new(encoders, scaler, Box::new(forest.clone()))
        .unwrap_or_else(|e| panic!("context: {}", e));
    let record = records[0].clone();

    let mut group = c.benchmark_group("inference");
    group.bench_function("predict_proba_row", |b| {
        b.iter(|| forest.predict_proba(black_box(&rows[0])))
    });
    group.bench_function("predict_record", |b| {
        b.iter(|| predict(black_box(&context), black_box(&record)))
    });
    group.finish();
}

criterion_group!(benches, bench_forest_fit, bench_single_prediction);
criterion_main!(benches);
