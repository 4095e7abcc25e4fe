//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::inference::InferenceContext;
use crate::pipeline::{defaults, EmployeeRecord};

/// attrisk - Predict employee attrition risk and suggest retention actions
#[derive(Parser, Debug)]
#[command(name = "attrisk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the model, encoder and scaler artifacts
    #[arg(short, long, global = true, default_value = "models")]
    pub models_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the feature pipeline and the classifier, then save the artifacts
    Train(TrainArgs),

    /// Score one employee record from flags
    Predict(PredictArgs),

    /// Print the feature-importance ranking of the saved model
    Importance,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Input dataset (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Seed for the synthetic WorkMode column, the holdout split and the forest
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of trees in the forest
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub trees: u64,

    /// Maximum tree depth (unbounded when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum rows in every leaf
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub min_samples_leaf: u64,

    /// Fraction of rows held out for evaluation, in [0, 1).
    /// With 0 the forest is fit on every row and training metrics are reported.
    #[arg(long, default_value = "0.2", value_parser = validate_test_fraction)]
    pub test_fraction: f64,

    /// Value in the Attrition column meaning the employee left (maps to 1)
    #[arg(long, default_value = "Yes")]
    pub event_value: String,

    /// Value in the Attrition column meaning the employee stayed (maps to 0)
    #[arg(long, default_value = "No")]
    pub non_event_value: String,

    /// Also write the encoded feature matrix plus Attrition (CSV or Parquet by extension)
    #[arg(long)]
    pub export_features: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Overwrite existing artifacts without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long, default_value_t = defaults::AGE, value_parser = clap::value_parser!(u32).range(18..=60))]
    pub age: u32,

    /// Department (defaults to the first fitted label)
    #[arg(long)]
    pub department: Option<String>,

    /// Job role (defaults to the first fitted label)
    #[arg(long)]
    pub job_role: Option<String>,

    #[arg(long, default_value_t = defaults::MONTHLY_INCOME, value_parser = clap::value_parser!(u32).range(1000..=200_000))]
    pub monthly_income: u32,

    #[arg(long, default_value_t = defaults::PERCENT_SALARY_HIKE, value_parser = clap::value_parser!(u32).range(0..=50))]
    pub percent_salary_hike: u32,

    /// Job satisfaction, 1 (low) to 4 (very high)
    #[arg(long, default_value_t = defaults::JOB_SATISFACTION, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub job_satisfaction: u32,

    /// Work-life balance, 1 (bad) to 4 (best)
    #[arg(long, default_value_t = defaults::WORK_LIFE_BALANCE, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub work_life_balance: u32,

    #[arg(long, default_value_t = defaults::YEARS_AT_COMPANY, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub years_at_company: u32,

    /// Overtime, usually Yes or No (defaults to the first fitted label)
    #[arg(long)]
    pub over_time: Option<String>,

    #[arg(long, default_value_t = defaults::DISTANCE_FROM_HOME, value_parser = clap::value_parser!(u32).range(0..=60))]
    pub distance_from_home: u32,

    /// Work mode: On-site, Hybrid or Remote (defaults to the first fitted label)
    #[arg(long)]
    pub work_mode: Option<String>,

    /// Print the prediction as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl PredictArgs {
    /// Build the record, filling unset categories from the fitted vocabularies
    pub fn to_record(&self, context: &InferenceContext) -> EmployeeRecord {
        let base = context.default_record();
        EmployeeRecord {
            age: self.age,
            department: self.department.clone().unwrap_or(base.department),
            job_role: self.job_role.clone().unwrap_or(base.job_role),
            monthly_income: self.monthly_income,
            percent_salary_hike: self.percent_salary_hike,
            job_satisfaction: self.job_satisfaction,
            work_life_balance: self.work_life_balance,
            years_at_company: self.years_at_company,
            over_time: self.over_time.clone().unwrap_or(base.over_time),
            distance_from_home: self.distance_from_home,
            work_mode: self.work_mode.clone().unwrap_or(base.work_mode),
        }
    }
}

/// Validator for the holdout fraction
fn validate_test_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..1.0).contains(&value) {
        Err(format!(
            "test_fraction must be at least 0.0 and below 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
