//! Record to feature-row transform
//!
//! Both the fit step and inference go through [`encode_record`], so the
//! rows the classifier is trained on and the rows it is asked to score are
//! produced by the same code.

use super::encoder::EncoderSet;
use super::record::EmployeeRecord;
use super::scaler::StandardScaler;
use super::schema::{CategoricalColumn, Feature, FeatureRow, NumericColumn};
use crate::error::AttritionError;

/// Raw numeric values in scaler order
pub fn numeric_values(record: &EmployeeRecord) -> [f64; 5] {
    let mut values = [0.0; 5];
    for col in NumericColumn::ALL {
        values[col.index()] = match col {
            NumericColumn::Age => record.age as f64,
            NumericColumn::MonthlyIncome => record.monthly_income as f64,
            NumericColumn::PercentSalaryHike => record.percent_salary_hike as f64,
            NumericColumn::YearsAtCompany => record.years_at_company as f64,
            NumericColumn::DistanceFromHome => record.distance_from_home as f64,
        };
    }
    values
}

/// Raw categorical value of a column
pub fn categorical_value(record: &EmployeeRecord, column: CategoricalColumn) -> &str {
    match column {
        CategoricalColumn::Department => &record.department,
        CategoricalColumn::JobRole => &record.job_role,
        CategoricalColumn::OverTime => &record.over_time,
        CategoricalColumn::WorkMode => &record.work_mode,
    }
}

/// Encode and scale a record into a model row
pub fn encode_record(
    record: &EmployeeRecord,
    encoders: &EncoderSet,
    scaler: &StandardScaler,
) -> Result<FeatureRow, AttritionError> {
    let mut row: FeatureRow = [0.0; Feature::ALL.len()];

    for col in CategoricalColumn::ALL {
        let code = encoders.encode(col, categorical_value(record, col))?;
        row[col.feature().index()] = code as f64;
    }

    let scaled = scaler.transform(&numeric_values(record));
    for col in NumericColumn::ALL {
        row[col.feature().index()] = scaled[col.index()];
    }

    // Ordinal columns pass through unscaled.
    row[Feature::JobSatisfaction.index()] = record.job_satisfaction as f64;
    row[Feature::WorkLifeBalance.index()] = record.work_life_balance as f64;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encoder::LabelEncoder;

    fn encoders() -> EncoderSet {
        EncoderSet {
            department: LabelEncoder::fit(["Human Resources", "Research & Development", "Sales"]),
            job_role: LabelEncoder::fit(["Manager", "Sales Executive"]),
            over_time: LabelEncoder::fit(["No", "Yes"]),
            work_mode: LabelEncoder::fit(["Hybrid", "On-site", "Remote"]),
        }
    }

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            age: 30,
            department: "Sales".to_string(),
            job_role: "Sales Executive".to_string(),
            monthly_income: 5000,
            percent_salary_hike: 15,
            job_satisfaction: 3,
            work_life_balance: 2,
            years_at_company: 5,
            over_time: "Yes".to_string(),
            distance_from_home: 10,
            work_mode: "Remote".to_string(),
        }
    }

    #[test]
    fn test_row_layout() {
        let scaler = StandardScaler {
            columns: NumericColumn::ALL.iter().map(|c| c.name().to_string()).collect(),
            mean: [0.0; 5],
            scale: [1.0; 5],
        };
        let row = encode_record(&record(), &encoders(), &scaler).unwrap();
        assert_eq!(
            row,
            [30.0, 2.0, 1.0, 5000.0, 15.0, 3.0, 2.0, 5.0, 1.0, 10.0, 2.0]
        );
    }

    #[test]
    fn test_scaled_columns() {
        let scaler = StandardScaler {
            columns: NumericColumn::ALL.iter().map(|c| c.name().to_string()).collect(),
            mean: [40.0, 6000.0, 15.0, 5.0, 20.0],
            scale: [10.0, 1000.0, 5.0, 5.0, 10.0],
        };
        let row = encode_record(&record(), &encoders(), &scaler).unwrap();
        assert_eq!(row[Feature::Age.index()], -1.0);
        assert_eq!(row[Feature::MonthlyIncome.index()], -1.0);
        assert_eq!(row[Feature::PercentSalaryHike.index()], 0.0);
        assert_eq!(row[Feature::YearsAtCompany.index()], 0.0);
        assert_eq!(row[Feature::DistanceFromHome.index()], -1.0);
        assert_eq!(row[Feature::JobSatisfaction.index()], 3.0);
    }

    #[test]
    fn test_unknown_department_fails() {
        let scaler = StandardScaler::fit(&[[30.0, 5000.0, 15.0, 5.0, 10.0]]);
        let r = EmployeeRecord {
            department: "Nonexistent".to_string(),
            ..record()
        };
        let err = encode_record(&r, &encoders(), &scaler).unwrap_err();
        assert!(matches!(err, AttritionError::Input { field: "Department", .. }));
    }
}
