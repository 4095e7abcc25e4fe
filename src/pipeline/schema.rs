//! Column schema shared by the fit step and the inference step
//!
//! The order of [`Feature::ALL`] is the column order of every encoded row.
//! The classifier is fit on it and inference rebuilds rows in it, so it must
//! never be reordered.

use serde::{Deserialize, Serialize};

/// Name of the training label column
pub const TARGET_COLUMN: &str = "Attrition";

/// Number of model input columns
pub const FEATURE_COUNT: usize = 11;

/// One encoded/scaled model input row, in [`Feature::ALL`] order
pub type FeatureRow = [f64; FEATURE_COUNT];

/// The eleven model input columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Age,
    Department,
    JobRole,
    MonthlyIncome,
    PercentSalaryHike,
    JobSatisfaction,
    WorkLifeBalance,
    YearsAtCompany,
    OverTime,
    DistanceFromHome,
    WorkMode,
}

impl Feature {
    /// All input columns in model order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Age,
        Feature::Department,
        Feature::JobRole,
        Feature::MonthlyIncome,
        Feature::PercentSalaryHike,
        Feature::JobSatisfaction,
        Feature::WorkLifeBalance,
        Feature::YearsAtCompany,
        Feature::OverTime,
        Feature::DistanceFromHome,
        Feature::WorkMode,
    ];

    /// Column name as it appears in the dataset
    pub fn name(self) -> &'static str {
        match self {
            Feature::Age => "Age",
            Feature::Department => "Department",
            Feature::JobRole => "JobRole",
            Feature::MonthlyIncome => "MonthlyIncome",
            Feature::PercentSalaryHike => "PercentSalaryHike",
            Feature::JobSatisfaction => "JobSatisfaction",
            Feature::WorkLifeBalance => "WorkLifeBalance",
            Feature::YearsAtCompany => "YearsAtCompany",
            Feature::OverTime => "OverTime",
            Feature::DistanceFromHome => "DistanceFromHome",
            Feature::WorkMode => "WorkMode",
        }
    }

    /// Position of this column within a [`FeatureRow`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column names in model order
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|f| f.name().to_string()).collect()
    }
}

/// Categorical columns, each label-encoded independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    Department,
    JobRole,
    OverTime,
    WorkMode,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 4] = [
        CategoricalColumn::Department,
        CategoricalColumn::JobRole,
        CategoricalColumn::OverTime,
        CategoricalColumn::WorkMode,
    ];

    pub fn feature(self) -> Feature {
        match self {
            CategoricalColumn::Department => Feature::Department,
            CategoricalColumn::JobRole => Feature::JobRole,
            CategoricalColumn::OverTime => Feature::OverTime,
            CategoricalColumn::WorkMode => Feature::WorkMode,
        }
    }

    pub fn name(self) -> &'static str {
        self.feature().name()
    }
}

/// Numeric columns standardized by the scaler, in scaler order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Age,
    MonthlyIncome,
    PercentSalaryHike,
    YearsAtCompany,
    DistanceFromHome,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::Age,
        NumericColumn::MonthlyIncome,
        NumericColumn::PercentSalaryHike,
        NumericColumn::YearsAtCompany,
        NumericColumn::DistanceFromHome,
    ];

    pub fn feature(self) -> Feature {
        match self {
            NumericColumn::Age => Feature::Age,
            NumericColumn::MonthlyIncome => Feature::MonthlyIncome,
            NumericColumn::PercentSalaryHike => Feature::PercentSalaryHike,
            NumericColumn::YearsAtCompany => Feature::YearsAtCompany,
            NumericColumn::DistanceFromHome => Feature::DistanceFromHome,
        }
    }

    pub fn name(self) -> &'static str {
        self.feature().name()
    }

    /// Position of this column within the scaler's parameter arrays
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Columns that must be present in the training CSV.
///
/// `WorkMode` is not listed: it is derived during the fit.
pub fn required_source_columns() -> Vec<&'static str> {
    Feature::ALL
        .iter()
        .filter(|f| **f != Feature::WorkMode)
        .map(|f| f.name())
        .chain(std::iter::once(TARGET_COLUMN))
        .collect()
}
