//! Single-record prediction

use serde::Serialize;

use super::context::InferenceContext;
use super::suggestions::retention_suggestions;
use crate::error::AttritionError;
use crate::pipeline::{encode_record, EmployeeRecord, FeatureRow};

/// Predicted outcome for an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttritionClass {
    Stay,
    Leave,
}

impl AttritionClass {
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            AttritionClass::Leave
        } else {
            AttritionClass::Stay
        }
    }
}

/// Result of scoring one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: AttritionClass,
    /// Model probability of class 1 (leave)
    pub leave_probability: f64,
    pub suggestions: Vec<&'static str>,
}

impl Prediction {
    /// Probability of the predicted class, as shown to the user
    pub fn displayed_probability(&self) -> f64 {
        match self.class {
            AttritionClass::Leave => self.leave_probability,
            AttritionClass::Stay => 1.0 - self.leave_probability,
        }
    }

    /// True when a leave prediction matched none of the retention rules
    pub fn has_no_matching_rule(&self) -> bool {
        self.class == AttritionClass::Leave && self.suggestions.is_empty()
    }
}

/// Validate and encode a record into the model row
pub fn transform_record(
    context: &InferenceContext,
    record: &EmployeeRecord,
) -> Result<FeatureRow, AttritionError> {
    record.validate()?;
    encode_record(record, &context.encoders, &context.scaler)
}

/// Validate, transform, classify, and attach suggestions
pub fn predict(context: &InferenceContext, record: &EmployeeRecord) -> Result<Prediction, AttritionError> {
    let row = transform_record(context, record)?;

    let classifier = context.classifier();
    let leave_probability = classifier.predict_proba(&row);
    let class = AttritionClass::from_label(classifier.predict(&row));

    Ok(Prediction {
        class,
        leave_probability,
        suggestions: retention_suggestions(record, class),
    })
}
