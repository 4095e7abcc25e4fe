//! Attrition label mapping
//!
//! Converts the `Attrition` column to the 0/1 label vector the classifier is
//! fit on. Any value other than the two mapped labels is a schema error.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AttritionError;

/// Mapping configuration for converting target column values to binary 0/1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMapping {
    /// Value that maps to 1 (employee left)
    pub event_value: String,
    /// Value that maps to 0 (employee stayed)
    pub non_event_value: String,
}

impl TargetMapping {
    /// Create a new target mapping
    pub fn new(event_value: String, non_event_value: String) -> Self {
        Self {
            event_value,
            non_event_value,
        }
    }
}

impl Default for TargetMapping {
    fn default() -> Self {
        Self::new("Yes".to_string(), "No".to_string())
    }
}

/// Create a binary target mask based on the mapping
///
/// Returns a Vec<Option<u8>> where:
/// - Some(1) for event values
/// - Some(0) for non-event values
/// - None for nulls and values that match neither
pub fn create_target_mask(
    df: &DataFrame,
    target: &str,
    mapping: &TargetMapping,
) -> Result<Vec<Option<u8>>> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    let string_values = column_to_string_vec(target_col)?;

    let mask = string_values
        .iter()
        .map(|v| match v {
            Some(s) if s == &mapping.event_value => Some(1),
            Some(s) if s == &mapping.non_event_value => Some(0),
            _ => None,
        })
        .collect();

    Ok(mask)
}

/// Map the target column to labels, rejecting unmapped values
pub fn map_target(df: &DataFrame, target: &str, mapping: &TargetMapping) -> Result<Vec<u8>> {
    let mask = create_target_mask(df, target, mapping)?;

    if let Some(row) = mask.iter().position(|v| v.is_none()) {
        let raw = column_to_string_vec(df.column(target)?)?;
        let shown = raw[row].as_deref().unwrap_or("<null>").to_string();
        return Err(AttritionError::schema(format!(
            "Target column '{}' has value '{}' at row {} (expected '{}' or '{}')",
            target, shown, row, mapping.event_value, mapping.non_event_value
        ))
        .into());
    }

    Ok(mask.into_iter().flatten().collect())
}

/// Convert a column to a Vec of Option<String> for comparison
pub(crate) fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
