//! Read-only inference context
//!
//! Built once at startup from the three artifacts and passed by reference
//! to every prediction. Nothing in it is mutated after construction, so it
//! can be shared across threads without locking.

use std::path::Path;

use crate::error::AttritionError;
use crate::model::Classifier;
use crate::pipeline::{
    load_encoders, load_model, load_scaler, ArtifactPaths, CategoricalColumn, EmployeeRecord,
    EncoderSet, Feature, ModelMetadata, StandardScaler, FEATURE_COUNT,
};

/// Everything needed to score a record
pub struct InferenceContext {
    pub encoders: EncoderSet,
    pub scaler: StandardScaler,
    classifier: Box<dyn Classifier>,
    metadata: Option<ModelMetadata>,
}

impl std::fmt::Debug for InferenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceContext")
            .field("encoders", &self.encoders)
            .field("scaler", &self.scaler)
            .field("n_features", &self.classifier.n_features())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// A feature and its importance score
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedFeature {
    pub feature: &'static str,
    pub importance: f64,
}

impl InferenceContext {
    /// Assemble a context from in-memory parts.
    ///
    /// Fails if the classifier does not take exactly one value per input column.
    pub fn new(
        encoders: EncoderSet,
        scaler: StandardScaler,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, AttritionError> {
        if classifier.n_features() != FEATURE_COUNT {
            return Err(AttritionError::artifact_load(
                "classifier",
                "<memory>",
                format!(
                    "classifier expects {} features, expected {}",
                    classifier.n_features(),
                    FEATURE_COUNT
                ),
            ));
        }
        Ok(Self {
            encoders,
            scaler,
            classifier,
            metadata: None,
        })
    }

    /// Load all three artifacts from a models directory
    pub fn load(dir: &Path) -> Result<Self, AttritionError> {
        let paths = ArtifactPaths::in_dir(dir);
        let model = load_model(&paths.model)?;
        let encoders = load_encoders(&paths.encoders)?;
        let scaler = load_scaler(&paths.scaler)?;

        let mut context = Self::new(encoders, scaler, Box::new(model.forest))?;
        context.metadata = Some(model.metadata);
        Ok(context)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Provenance of the loaded model, absent for in-memory contexts
    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }

    /// Fitted vocabulary of a categorical column, for choice widgets
    pub fn vocabulary(&self, column: CategoricalColumn) -> &[String] {
        self.encoders.get(column).classes()
    }

    /// Starting record for the form and the `predict` flags: default numeric
    /// inputs and the first fitted label of every categorical column
    pub fn default_record(&self) -> EmployeeRecord {
        let first = |column: CategoricalColumn| {
            self.vocabulary(column)
                .first()
                .cloned()
                .unwrap_or_default()
        };
        EmployeeRecord::with_categories(
            first(CategoricalColumn::Department),
            first(CategoricalColumn::JobRole),
            first(CategoricalColumn::OverTime),
            first(CategoricalColumn::WorkMode),
        )
    }

    /// Feature importances sorted ascending, largest last
    pub fn feature_ranking(&self) -> Vec<RankedFeature> {
        let mut ranked: Vec<RankedFeature> = Feature::ALL
            .iter()
            .zip(self.classifier.feature_importances())
            .map(|(f, importance)| RankedFeature {
                feature: f.name(),
                importance,
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.importance
                .partial_cmp(&b.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}
