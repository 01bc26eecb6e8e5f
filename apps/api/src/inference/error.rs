use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or validating a startup artifact.
/// Any of these disables the stage that needed the artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load weights: {0}")]
    Weights(#[from] candle_core::Error),

    #[error("invalid artifact: {0}")]
    Invalid(String),
}

/// Failure while running a loaded model on a request.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("expected {expected} input features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("model produced {actual} outputs, expected {expected}")]
    OutputWidth { expected: usize, actual: usize },

    #[error("cannot score an empty token sequence")]
    EmptySequence,

    #[error("model produced an empty distribution")]
    EmptyOutput,

    #[error("token {token} is outside the embedding table ({vocab_size} rows)")]
    TokenOutOfRange { token: u32, vocab_size: usize },

    #[error("class index {0} is outside the label encoder")]
    UnknownClassIndex(usize),
}
