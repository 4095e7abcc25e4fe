//! Label encoding for categorical columns

use serde::{Deserialize, Serialize};

use super::schema::CategoricalColumn;
use crate::error::AttritionError;

/// Fitted bijection between a sorted vocabulary and `0..len`.
///
/// Codes are assigned in lexicographic order of the labels, so refitting on
/// the same set of values always yields the same codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on the distinct values of a column
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(|v| v.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Build from an explicit vocabulary (sorted and deduplicated)
    pub fn from_classes(classes: Vec<String>) -> Self {
        Self::fit(classes)
    }

    /// The fitted vocabulary in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.code_of(label).is_some()
    }

    fn code_of(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
    }

    /// Encode a label, failing for anything outside the fitted vocabulary
    pub fn encode(&self, field: &'static str, label: &str) -> Result<usize, AttritionError> {
        self.code_of(label).ok_or_else(|| {
            AttritionError::input(
                field,
                format!(
                    "'{}' is not in the fitted vocabulary {:?}",
                    label, self.classes
                ),
            )
        })
    }

    /// Decode a code back to its label
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

/// One fitted encoder per categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSet {
    #[serde(rename = "Department")]
    pub department: LabelEncoder,
    #[serde(rename = "JobRole")]
    pub job_role: LabelEncoder,
    #[serde(rename = "OverTime")]
    pub over_time: LabelEncoder,
    #[serde(rename = "WorkMode")]
    pub work_mode: LabelEncoder,
}

impl EncoderSet {
    pub fn get(&self, column: CategoricalColumn) -> &LabelEncoder {
        match column {
            CategoricalColumn::Department => &self.department,
            CategoricalColumn::JobRole => &self.job_role,
            CategoricalColumn::OverTime => &self.over_time,
            CategoricalColumn::WorkMode => &self.work_mode,
        }
    }

    /// Encode a value of the given column
    pub fn encode(&self, column: CategoricalColumn, label: &str) -> Result<usize, AttritionError> {
        self.get(column).encode(column.name(), label)
    }

    /// Name of the first column whose vocabulary is empty, if any
    pub fn first_empty(&self) -> Option<&'static str> {
        CategoricalColumn::ALL
            .iter()
            .find(|c| self.get(**c).is_empty())
            .map(|c| c.name())
    }
}
