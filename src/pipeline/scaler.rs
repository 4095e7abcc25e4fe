//! Standard scaling of the numeric columns

use serde::{Deserialize, Serialize};

use super::schema::NumericColumn;

const NUMERIC_COUNT: usize = NumericColumn::ALL.len();

/// Per-column mean and standard deviation for the five numeric columns.
///
/// Uses the population standard deviation. A column with zero variance
/// gets a scale of 1.0 so it maps to zero instead of NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names in scaler order, checked against the schema on load
    pub columns: Vec<String>,
    pub mean: [f64; NUMERIC_COUNT],
    pub scale: [f64; NUMERIC_COUNT],
}

impl StandardScaler {
    /// Fit on raw numeric rows, each in [`NumericColumn::ALL`] order
    pub fn fit(rows: &[[f64; NUMERIC_COUNT]]) -> Self {
        let mut mean = [0.0; NUMERIC_COUNT];
        let mut scale = [1.0; NUMERIC_COUNT];

        if !rows.is_empty() {
            let n = rows.len() as f64;
            for j in 0..NUMERIC_COUNT {
                let m = rows.iter().map(|r| r[j]).sum::<f64>() / n;
                let var = rows.iter().map(|r| (r[j] - m).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                mean[j] = m;
                scale[j] = if std > 0.0 { std } else { 1.0 };
            }
        }

        Self {
            columns: NumericColumn::ALL.iter().map(|c| c.name().to_string()).collect(),
            mean,
            scale,
        }
    }

    /// Standardize one value of the given column
    #[inline]
    pub fn transform_value(&self, column: NumericColumn, value: f64) -> f64 {
        let j = column.index();
        (value - self.mean[j]) / self.scale[j]
    }

    /// Standardize a full numeric row
    pub fn transform(&self, row: &[f64; NUMERIC_COUNT]) -> [f64; NUMERIC_COUNT] {
        let mut out = [0.0; NUMERIC_COUNT];
        for col in NumericColumn::ALL {
            out[col.index()] = self.transform_value(col, row[col.index()]);
        }
        out
    }

    /// True when the stored column list matches the compiled scaler order
    pub fn columns_match_schema(&self) -> bool {
        self.columns.len() == NUMERIC_COUNT
            && self
                .columns
                .iter()
                .zip(NumericColumn::ALL.iter())
                .all(|(stored, col)| stored == col.name())
    }
}
