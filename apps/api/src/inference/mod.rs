// Inference pipeline: input validation, AI-text detection, personality
// classification, career recommendation and description lookup.
// Every model role sits behind a trait so stages can be tested with doubles.
// All inference is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod career;
pub mod descriptions;
pub mod detector;
pub mod encoders;
pub mod error;
pub mod forest;
pub mod handlers;
pub mod loader;
pub mod network;
pub mod personality;
pub mod pipeline;
pub mod sequence;
pub mod tokenizer;
pub mod validation;

#[cfg(test)]
pub mod testing;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::inference::error::ArtifactError;

pub use loader::load_pipeline;

/// Reads and deserializes a JSON artifact.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
