//! Shared test utilities and fixture generators
#![allow(dead_code)]

use attrisk::inference::InferenceContext;
use attrisk::model::Classifier;
use attrisk::pipeline::{prepare_dataset, EmployeeRecord, PipelineOptions, FEATURE_COUNT};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

pub const DEPARTMENTS: [&str; 3] = ["Human Resources", "Research & Development", "Sales"];
pub const JOB_ROLES: [&str; 4] = [
    "Laboratory Technician",
    "Manager",
    "Research Scientist",
    "Sales Executive",
];

/// Synthetic HR dataset with the model columns, the target and two
/// unrelated columns.
///
/// Leavers are mostly overtime workers with low satisfaction, so a forest
/// can learn the signal. Categorical values cycle by row so that every label
/// is present whatever the size.
pub fn create_attrition_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut age = Vec::with_capacity(rows);
    let mut department = Vec::with_capacity(rows);
    let mut job_role = Vec::with_capacity(rows);
    let mut income = Vec::with_capacity(rows);
    let mut hike = Vec::with_capacity(rows);
    let mut satisfaction = Vec::with_capacity(rows);
    let mut balance = Vec::with_capacity(rows);
    let mut years = Vec::with_capacity(rows);
    let mut overtime = Vec::with_capacity(rows);
    let mut distance = Vec::with_capacity(rows);
    let mut attrition = Vec::with_capacity(rows);

    for i in 0..rows {
        let ot = i % 3 == 0;
        let js: i64 = rng.gen_range(1..=4);
        let leaves = (ot && js <= 2) || rng.gen::<f64>() < 0.05;

        age.push(rng.gen_range(18i64..=60));
        department.push(DEPARTMENTS[i % DEPARTMENTS.len()]);
        job_role.push(JOB_ROLES[i % JOB_ROLES.len()]);
        income.push(rng.gen_range(1000i64..=20000));
        hike.push(rng.gen_range(11i64..=25));
        satisfaction.push(js);
        balance.push(rng.gen_range(1i64..=4));
        years.push(rng.gen_range(0i64..=40));
        overtime.push(if ot { "Yes" } else { "No" });
        distance.push(rng.gen_range(1i64..=29));
        attrition.push(if leaves { "Yes" } else { "No" });
    }

    let employee_number: Vec<i64> = (1..=rows as i64).collect();
    let business_travel: Vec<&str> = (0..rows)
        .map(|i| if i % 2 == 0 { "Travel_Rarely" } else { "Non-Travel" })
        .collect();

    df! {
        "EmployeeNumber" => employee_number,
        "Age" => age,
        "Attrition" => attrition,
        "BusinessTravel" => business_travel,
        "Department" => department,
        "DistanceFromHome" => distance,
        "JobRole" => job_role,
        "JobSatisfaction" => satisfaction,
        "MonthlyIncome" => income,
        "OverTime" => overtime,
        "PercentSalaryHike" => hike,
        "WorkLifeBalance" => balance,
        "YearsAtCompany" => years,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("employees.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("employees.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Classifier that returns the same probability for every row
pub struct FixedClassifier {
    pub probability: f64,
}

impl Classifier for FixedClassifier {
    fn predict_proba(&self, _row: &[f64]) -> f64 {
        self.probability
    }

    fn feature_importances(&self) -> Vec<f64> {
        (1..=FEATURE_COUNT).map(|i| i as f64 / 66.0).collect()
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }
}

/// Context with encoders and scaler fit on the fixture and a fixed-probability classifier
pub fn mock_context(probability: f64) -> InferenceContext {
    let df = create_attrition_dataframe(120, 7);
    let prepared = prepare_dataset(&df, &PipelineOptions::default()).unwrap();
    InferenceContext::new(
        prepared.encoders,
        prepared.scaler,
        Box::new(FixedClassifier { probability }),
    )
    .unwrap()
}

/// The baseline profile used by the inference scenarios
pub fn scenario_a_record() -> EmployeeRecord {
    EmployeeRecord {
        age: 30,
        department: "Sales".to_string(),
        job_role: "Sales Executive".to_string(),
        monthly_income: 5000,
        percent_salary_hike: 15,
        job_satisfaction: 3,
        work_life_balance: 3,
        years_at_company: 5,
        over_time: "No".to_string(),
        distance_from_home: 10,
        work_mode: "Hybrid".to_string(),
    }
}

/// Scenario A with every retention trigger set
pub fn scenario_b_record() -> EmployeeRecord {
    EmployeeRecord {
        over_time: "Yes".to_string(),
        work_life_balance: 1,
        job_satisfaction: 1,
        years_at_company: 1,
        ..scenario_a_record()
    }
}
