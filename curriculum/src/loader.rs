//! Loading curricula from TOML or JSON and validating them in one step.

use std::path::Path;
use thiserror::Error;

use crate::graph::{ConceptCurriculum, ValidatedCurriculum};
use crate::validation::{validate, ValidationError};

/// Errors raised while reading a curriculum file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read curriculum file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid curriculum TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid curriculum JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported curriculum format \"{0}\" (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Parse and validate a curriculum written in TOML.
pub fn from_toml_str(source: &str) -> LoadResult<ValidatedCurriculum> {
    let curriculum: ConceptCurriculum = toml::from_str(source)?;
    Ok(validate(curriculum)?)
}

/// Parse and validate a curriculum written in JSON.
pub fn from_json_str(source: &str) -> LoadResult<ValidatedCurriculum> {
    let curriculum: ConceptCurriculum = serde_json::from_str(source)?;
    Ok(validate(curriculum)?)
}

/// Load a curriculum file, choosing the format from its extension.
pub fn load_path(path: impl AsRef<Path>) -> LoadResult<ValidatedCurriculum> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let source = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), format = %extension, "Loading curriculum");

    match extension.as_str() {
        "toml" => from_toml_str(&source),
        "json" => from_json_str(&source),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}
