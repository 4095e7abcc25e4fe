//! Error types for the attrition pipeline and inference front-end.
//!
//! Three failure classes exist: schema problems in the training data (fatal
//! to a fit), missing or corrupt artifacts (fatal at startup), and invalid
//! per-record input (reported to the user, the session continues).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fitting, loading artifacts, or predicting.
#[derive(Debug, Error)]
pub enum AttritionError {
    /// Training data is missing a required column or holds unusable values.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A persisted encoder, scaler, or classifier could not be read.
    #[error("Failed to load {artifact} from {}: {reason}", path.display())]
    ArtifactLoad {
        /// Human-readable artifact name ("classifier", "encoders", "scaler")
        artifact: &'static str,
        /// File the artifact was expected at
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A record field is outside its fitted vocabulary or declared range.
    #[error("Invalid input for {field}: {reason}")]
    Input {
        /// Column name of the offending field
        field: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl AttritionError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub(crate) fn artifact_load(
        artifact: &'static str,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::ArtifactLoad {
            artifact,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Input {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors the interactive session can recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Input { .. })
    }
}
