//! Dataset loader for CSV and Parquet files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::record::EmployeeRecord;
use super::schema::{required_source_columns, Feature};
use super::target::column_to_string_vec;
use crate::error::AttritionError;
use crate::utils::create_spinner;

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load a dataset behind a spinner.
///
/// Returns the DataFrame together with its row count, column count and
/// estimated memory footprint in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let result = load_dataset(path, infer_schema_length).and_then(|lf| {
        lf.collect()
            .with_context(|| format!("Failed to read dataset: {}", path.display()))
    });
    spinner.finish_and_clear();

    let df = result?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    Ok((df, rows, cols, memory_mb))
}

/// Keep the eleven source columns plus the target, dropping everything else.
///
/// Fails with a schema error naming the first required column that is absent.
pub fn select_model_columns(df: &DataFrame) -> Result<DataFrame> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let required = required_source_columns();
    if let Some(missing) = required.iter().find(|c| !available.iter().any(|a| a == *c)) {
        return Err(AttritionError::schema(format!(
            "Required column '{}' not found in dataset. Available columns: {:?}",
            missing, available
        ))
        .into());
    }

    df.select(required)
        .context("Failed to select model columns")
}

/// Extract a numeric column as non-negative integers
fn integer_column(df: &DataFrame, feature: Feature) -> Result<Vec<u32>> {
    let name = feature.name();
    let col = df.column(name)?;

    // A plain Int64 cast would truncate 5000.9 to 5000
    if col.dtype().is_float() {
        let floats = col.cast(&DataType::Float64)?;
        let fractional = floats
            .f64()?
            .into_iter()
            .enumerate()
            .find_map(|(row, v)| v.filter(|x| x.fract() != 0.0).map(|x| (row, x)));
        if let Some((row, value)) = fractional {
            return Err(AttritionError::schema(format!(
                "Column '{}' must hold whole numbers, found {} at row {}",
                name, value, row
            ))
            .into());
        }
    }

    let cast = col.cast(&DataType::Int64).map_err(|_| {
        AttritionError::schema(format!("Column '{}' must be numeric", name))
    })?;

    cast.i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            Some(n) => u32::try_from(n).map_err(|_| {
                anyhow::Error::from(AttritionError::schema(format!(
                    "Column '{}' has out-of-range value {} at row {}",
                    name, n, row
                )))
            }),
            None => Err(anyhow::Error::from(AttritionError::schema(format!(
                "Column '{}' has a missing value at row {}",
                name, row
            )))),
        })
        .collect()
}

/// Extract a categorical column as strings
fn string_column(df: &DataFrame, feature: Feature) -> Result<Vec<String>> {
    let name = feature.name();
    column_to_string_vec(df.column(name)?)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| {
                anyhow::Error::from(AttritionError::schema(format!(
                    "Column '{}' has a missing value at row {}",
                    name, row
                )))
            })
        })
        .collect()
}

/// Build one raw record per row, attaching the derived work mode
pub fn extract_records(df: &DataFrame, work_modes: &[&str]) -> Result<Vec<EmployeeRecord>> {
    if work_modes.len() != df.height() {
        anyhow::bail!(
            "Work-mode column has {} values for {} rows",
            work_modes.len(),
            df.height()
        );
    }

    let age = integer_column(df, Feature::Age)?;
    let department = string_column(df, Feature::Department)?;
    let job_role = string_column(df, Feature::JobRole)?;
    let monthly_income = integer_column(df, Feature::MonthlyIncome)?;
    let percent_salary_hike = integer_column(df, Feature::PercentSalaryHike)?;
    let job_satisfaction = integer_column(df, Feature::JobSatisfaction)?;
    let work_life_balance = integer_column(df, Feature::WorkLifeBalance)?;
    let years_at_company = integer_column(df, Feature::YearsAtCompany)?;
    let over_time = string_column(df, Feature::OverTime)?;
    let distance_from_home = integer_column(df, Feature::DistanceFromHome)?;

    let records = (0..df.height())
        .map(|i| EmployeeRecord {
            age: age[i],
            department: department[i].clone(),
            job_role: job_role[i].clone(),
            monthly_income: monthly_income[i],
            percent_salary_hike: percent_salary_hike[i],
            job_satisfaction: job_satisfaction[i],
            work_life_balance: work_life_balance[i],
            years_at_company: years_at_company[i],
            over_time: over_time[i].clone(),
            distance_from_home: distance_from_home[i],
            work_mode: work_modes[i].to_string(),
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df! {
            "EmployeeNumber" => [1i64, 2],
            "Age" => [41i64, 49],
            "Attrition" => ["Yes", "No"],
            "Department" => ["Sales", "Research & Development"],
            "JobRole" => ["Sales Executive", "Research Scientist"],
            "MonthlyIncome" => [5993i64, 5130],
            "PercentSalaryHike" => [11i64, 23],
            "JobSatisfaction" => [4i64, 2],
            "WorkLifeBalance" => [1i64, 3],
            "YearsAtCompany" => [6i64, 10],
            "OverTime" => ["Yes", "No"],
            "DistanceFromHome" => [1i64, 8],
        }
        .unwrap()
    }

    #[test]
    fn test_select_drops_extra_columns() {
        let selected = select_model_columns(&frame()).unwrap();
        assert_eq!(selected.width(), 11);
        assert!(selected.column("EmployeeNumber").is_err());
    }

    #[test]
    fn test_select_missing_column_is_schema_error() {
        let df = frame().drop("OverTime").unwrap();
        let err = select_model_columns(&df).unwrap_err();
        let typed = err.downcast_ref::<AttritionError>().unwrap();
        assert!(matches!(typed, AttritionError::Schema(_)));
        assert!(err.to_string().contains("OverTime"));
    }

    #[test]
    fn test_extract_records() {
        let records = extract_records(&frame(), &["On-site", "Remote"]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, 41);
        assert_eq!(records[0].job_role, "Sales Executive");
        assert_eq!(records[1].work_mode, "Remote");
        assert_eq!(records[1].distance_from_home, 8);
    }

    #[test]
    fn test_extract_records_rejects_negative() {
        let mut df = frame();
        df.replace("Age", Series::new("Age".into(), [-1i64, 30]))
            .unwrap();
        let err = extract_records(&df, &["Hybrid", "Hybrid"]).unwrap_err();
        assert!(err.to_string().contains("Age"));
    }

    #[test]
    fn test_extract_records_rejects_fractional_values() {
        let mut df = frame();
        df.replace(
            "MonthlyIncome",
            Series::new("MonthlyIncome".into(), [5000.9f64, 6000.4]),
        )
        .unwrap();

        let err = extract_records(&df, &["Hybrid", "Hybrid"]).unwrap_err();
        let typed = err.downcast_ref::<AttritionError>().unwrap();
        assert!(matches!(typed, AttritionError::Schema(_)));
        assert!(err.to_string().contains("MonthlyIncome"));
        assert!(err.to_string().contains("5000.9"));
    }

    #[test]
    fn test_extract_records_accepts_whole_floats() {
        let mut df = frame();
        df.replace(
            "MonthlyIncome",
            Series::new("MonthlyIncome".into(), [5993.0f64, 5130.0]),
        )
        .unwrap();

        let records = extract_records(&df, &["Hybrid", "Hybrid"]).unwrap();
        assert_eq!(records[0].monthly_income, 5993);
        assert_eq!(records[1].monthly_income, 5130);
    }

    #[test]
    fn test_extract_records_length_mismatch() {
        assert!(extract_records(&frame(), &["Hybrid"]).is_err());
    }
}
