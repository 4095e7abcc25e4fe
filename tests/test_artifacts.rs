//! Tests for saving and loading the persisted artifacts

mod common;

use attrisk::inference::{predict, InferenceContext};
use attrisk::model::{Classifier, ForestConfig, RandomForest};
use attrisk::pipeline::*;
use attrisk::AttritionError;
use common::{create_attrition_dataframe, scenario_b_record};
use tempfile::TempDir;

fn train_into(dir: &std::path::Path) -> (PreparedDataset, RandomForest) {
    let df = create_attrition_dataframe(150, 31);
    let prepared = prepare_dataset(&df, &PipelineOptions::default()).unwrap();
    let config = ForestConfig {
        n_trees: 10,
        ..ForestConfig::default()
    };
    let forest = RandomForest::fit(prepared.features.rows(), &prepared.target, &config).unwrap();

    let model = ModelArtifact {
        metadata: ModelMetadata::new(42, prepared.features.len(), 0),
        forest: forest.clone(),
    };
    save_artifacts(dir, &model, &prepared.encoders, &prepared.scaler).unwrap();
    (prepared, forest)
}

#[test]
fn test_save_creates_three_files() {
    let dir = TempDir::new().unwrap();
    let models = dir.path().join("models");
    train_into(&models);

    let paths = ArtifactPaths::in_dir(&models);
    assert_eq!(paths.existing().len(), 3);
    assert!(models.join(MODEL_FILE).exists());
    assert!(models.join(ENCODERS_FILE).exists());
    assert!(models.join(SCALER_FILE).exists());
}

#[test]
fn test_round_trip_preserves_predictions() {
    let dir = TempDir::new().unwrap();
    let (prepared, forest) = train_into(dir.path());

    let context = InferenceContext::load(dir.path()).unwrap();
    assert_eq!(context.encoders, prepared.encoders);
    assert_eq!(context.scaler, prepared.scaler);

    for row in prepared.features.rows().iter().take(25) {
        assert_eq!(context.classifier().predict_proba(row), forest.predict_proba(row));
    }
    assert_eq!(
        context.classifier().feature_importances(),
        forest.feature_importances()
    );

    let metadata = context.metadata().unwrap();
    assert_eq!(metadata.feature_names, Feature::names());
    assert_eq!(metadata.seed, 42);
    assert!(predict(&context, &scenario_b_record()).is_ok());
}

#[test]
fn test_missing_directory_is_artifact_error() {
    let dir = TempDir::new().unwrap();
    let err = InferenceContext::load(&dir.path().join("nowhere")).unwrap_err();

    assert!(matches!(err, AttritionError::ArtifactLoad { artifact: "classifier", .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_corrupt_encoders_file_is_artifact_error() {
    let dir = TempDir::new().unwrap();
    train_into(dir.path());
    std::fs::write(dir.path().join(ENCODERS_FILE), "{ not json").unwrap();

    let err = InferenceContext::load(dir.path()).unwrap_err();
    assert!(matches!(err, AttritionError::ArtifactLoad { artifact: "encoders", .. }));
}

#[test]
fn test_empty_vocabulary_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (prepared, _) = train_into(dir.path());

    let mut encoders = prepared.encoders.clone();
    encoders.work_mode = LabelEncoder::from_classes(Vec::new());
    std::fs::write(
        dir.path().join(ENCODERS_FILE),
        serde_json::to_string(&encoders).unwrap(),
    )
    .unwrap();

    let err = load_encoders(&dir.path().join(ENCODERS_FILE)).unwrap_err();
    assert!(err.to_string().contains("WorkMode"));
}

#[test]
fn test_scaler_column_drift_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (prepared, _) = train_into(dir.path());

    let mut scaler = prepared.scaler.clone();
    scaler.columns.swap(0, 1);
    std::fs::write(
        dir.path().join(SCALER_FILE),
        serde_json::to_string(&scaler).unwrap(),
    )
    .unwrap();

    let err = InferenceContext::load(dir.path()).unwrap_err();
    assert!(matches!(err, AttritionError::ArtifactLoad { artifact: "scaler", .. }));
}

#[test]
fn test_feature_order_drift_is_rejected() {
    let dir = TempDir::new().unwrap();
    train_into(dir.path());

    let path = dir.path().join(MODEL_FILE);
    let mut model: ModelArtifact =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    model.metadata.feature_names.swap(0, 3);
    std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();

    let err = load_model(&path).unwrap_err();
    assert!(matches!(err, AttritionError::ArtifactLoad { artifact: "classifier", .. }));
    assert!(err.to_string().contains("feature order"));
}
