//! Persisted artifacts: classifier, label encoders and scaler
//!
//! Each artifact is one JSON file inside the models directory. Loading
//! checks that the stored column layout matches the compiled schema.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::encoder::EncoderSet;
use super::scaler::StandardScaler;
use super::schema::{Feature, FEATURE_COUNT};
use crate::error::AttritionError;
use crate::model::{Classifier, RandomForest};

pub const MODEL_FILE: &str = "attrition_model.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Locations of the three artifact files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoders: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            encoders: dir.join(ENCODERS_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }

    /// Paths that already exist on disk
    pub fn existing(&self) -> Vec<&Path> {
        [&self.model, &self.encoders, &self.scaler]
            .into_iter()
            .filter(|p| p.exists())
            .map(PathBuf::as_path)
            .collect()
    }
}

/// Provenance stored alongside the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Version of the tool that fit the model
    pub attrisk_version: String,
    /// Seed used for the work-mode draw and the forest
    pub seed: u64,
    /// Rows the forest was fit on
    pub training_rows: usize,
    /// Rows held out for evaluation
    pub holdout_rows: usize,
    /// Input columns in the order the forest expects
    pub feature_names: Vec<String>,
}

impl ModelMetadata {
    pub fn new(seed: u64, training_rows: usize, holdout_rows: usize) -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            attrisk_version: env!("CARGO_PKG_VERSION").to_string(),
            seed,
            training_rows,
            holdout_rows,
            feature_names: Feature::names(),
        }
    }
}

/// The classifier artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub forest: RandomForest,
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn read_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T, AttritionError> {
    let text = fs::read_to_string(path).map_err(|e| AttritionError::artifact_load(artifact, path, e))?;
    serde_json::from_str(&text).map_err(|e| AttritionError::artifact_load(artifact, path, e))
}

/// Write all three artifacts, creating the directory if needed
pub fn save_artifacts(
    dir: &Path,
    model: &ModelArtifact,
    encoders: &EncoderSet,
    scaler: &StandardScaler,
) -> Result<ArtifactPaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create models directory: {}", dir.display()))?;

    let paths = ArtifactPaths::in_dir(dir);
    write_json(model, &paths.model)?;
    write_json(encoders, &paths.encoders)?;
    write_json(scaler, &paths.scaler)?;
    Ok(paths)
}

/// Load and check the classifier artifact
pub fn load_model(path: &Path) -> Result<ModelArtifact, AttritionError> {
    let model: ModelArtifact = read_json("classifier", path)?;

    if model.metadata.feature_names != Feature::names() {
        return Err(AttritionError::artifact_load(
            "classifier",
            path,
            format!(
                "feature order {:?} does not match expected {:?}",
                model.metadata.feature_names,
                Feature::names()
            ),
        ));
    }
    if model.forest.n_features() != FEATURE_COUNT {
        return Err(AttritionError::artifact_load(
            "classifier",
            path,
            format!(
                "forest expects {} features, expected {}",
                model.forest.n_features(),
                FEATURE_COUNT
            ),
        ));
    }
    if model.forest.trees().is_empty() {
        return Err(AttritionError::artifact_load("classifier", path, "forest has no trees"));
    }

    Ok(model)
}

/// Load and check the label encoders
pub fn load_encoders(path: &Path) -> Result<EncoderSet, AttritionError> {
    let encoders: EncoderSet = read_json("encoders", path)?;
    if let Some(column) = encoders.first_empty() {
        return Err(AttritionError::artifact_load(
            "encoders",
            path,
            format!("vocabulary for {} is empty", column),
        ));
    }
    Ok(encoders)
}

/// Load and check the scaler
pub fn load_scaler(path: &Path) -> Result<StandardScaler, AttritionError> {
    let scaler: StandardScaler = read_json("scaler", path)?;
    if !scaler.columns_match_schema() {
        return Err(AttritionError::artifact_load(
            "scaler",
            path,
            format!("column order {:?} does not match the schema", scaler.columns),
        ));
    }
    if scaler.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(AttritionError::artifact_load(
            "scaler",
            path,
            "scale values must be finite and positive",
        ));
    }
    Ok(scaler)
}
