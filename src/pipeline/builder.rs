//! Feature pipeline builder
//!
//! Offline step: select the model columns, derive `WorkMode`, fit the label
//! encoders and the scaler, and produce the encoded feature matrix and the
//! target vector.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::encoder::{EncoderSet, LabelEncoder};
use super::loader::{extract_records, load_dataset_with_progress, select_model_columns};
use super::record::EmployeeRecord;
use super::scaler::StandardScaler;
use super::schema::{Feature, FeatureRow, TARGET_COLUMN};
use super::target::{map_target, TargetMapping};
use super::transform::{encode_record, numeric_values};
use super::workmode::{derive_work_mode, DEFAULT_SEED};

/// Options controlling a pipeline fit
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Seed for the synthetic work-mode draw
    pub seed: u64,
    /// Which `Attrition` values mean "left" and "stayed"
    pub target_mapping: TargetMapping,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            target_mapping: TargetMapping::default(),
        }
    }
}

/// Encoded and scaled rows, columns in [`Feature::ALL`] order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        Feature::names()
    }

    /// All values of one column
    pub fn column(&self, feature: Feature) -> Vec<f64> {
        self.rows.iter().map(|r| r[feature.index()]).collect()
    }

    /// Convert to a DataFrame with the target appended as `Attrition`
    pub fn to_dataframe(&self, target: &[u8]) -> Result<DataFrame> {
        if target.len() != self.rows.len() {
            anyhow::bail!(
                "Target has {} values for {} feature rows",
                target.len(),
                self.rows.len()
            );
        }

        let mut columns: Vec<Column> = Feature::ALL
            .iter()
            .map(|f| Column::new(f.name().into(), self.column(*f)))
            .collect();
        let target: Vec<i32> = target.iter().map(|&y| y as i32).collect();
        columns.push(Column::new(TARGET_COLUMN.into(), target));

        DataFrame::new(columns).context("Failed to build feature DataFrame")
    }
}

/// Everything the fit step produces
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Raw records, including the derived work mode
    pub records: Vec<EmployeeRecord>,
    pub features: FeatureMatrix,
    pub target: Vec<u8>,
    pub encoders: EncoderSet,
    pub scaler: StandardScaler,
}

impl PreparedDataset {
    /// Number of rows labelled as leavers
    pub fn leavers(&self) -> usize {
        self.target.iter().filter(|&&y| y == 1).count()
    }
}

/// Fit one label encoder per categorical column
pub fn fit_encoders(records: &[EmployeeRecord]) -> EncoderSet {
    EncoderSet {
        department: LabelEncoder::fit(records.iter().map(|r| r.department.as_str())),
        job_role: LabelEncoder::fit(records.iter().map(|r| r.job_role.as_str())),
        over_time: LabelEncoder::fit(records.iter().map(|r| r.over_time.as_str())),
        work_mode: LabelEncoder::fit(records.iter().map(|r| r.work_mode.as_str())),
    }
}

/// Fit the scaler over the full dataset
pub fn fit_scaler(records: &[EmployeeRecord]) -> StandardScaler {
    let numeric: Vec<[f64; 5]> = records.iter().map(numeric_values).collect();
    StandardScaler::fit(&numeric)
}

/// Run the fit on an already loaded DataFrame
pub fn prepare_dataset(df: &DataFrame, options: &PipelineOptions) -> Result<PreparedDataset> {
    let df = select_model_columns(df)?;
    if df.height() == 0 {
        anyhow::bail!("Dataset has no rows");
    }

    let target = map_target(&df, TARGET_COLUMN, &options.target_mapping)?;
    let work_modes = derive_work_mode(&target, options.seed)?;
    let records = extract_records(&df, &work_modes)?;

    let encoders = fit_encoders(&records);
    let scaler = fit_scaler(&records);

    // Encoders were fit on these same records, so every label is known.
    let rows = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            encode_record(r, &encoders, &scaler)
                .with_context(|| format!("Failed to encode training row {}", i))
        })
        .collect::<Result<Vec<FeatureRow>>>()?;

    Ok(PreparedDataset {
        records,
        features: FeatureMatrix::new(rows),
        target,
        encoders,
        scaler,
    })
}

/// Load a dataset file and run the fit on it
pub fn build_feature_pipeline(
    path: &Path,
    options: &PipelineOptions,
    infer_schema_length: usize,
) -> Result<PreparedDataset> {
    let (df, _rows, _cols, _mem) = load_dataset_with_progress(path, infer_schema_length)?;
    prepare_dataset(&df, options)
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
