//! Token-sequence classifiers backed by Candle.
//!
//! The network shape is fixed by `NetworkConfig`:
//! embedding → mean over the sequence → dense + ReLU per hidden layer → output.
//! A single output unit is read as a sigmoid probability; wider outputs are a
//! softmax distribution over classes.

use std::path::Path;

use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{embedding, linear, Embedding, Linear, VarBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::inference::error::{ArtifactError, InferenceError};
use crate::inference::read_json;

/// A model that scores a padded token sequence.
pub trait TextClassifier: Send + Sync {
    /// Probabilities for one sequence: a single value for binary models,
    /// one per class otherwise.
    fn predict(&self, tokens: &[u32]) -> Result<Vec<f32>, InferenceError>;

    /// Number of values `predict` returns.
    fn output_width(&self) -> usize;
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub vocab_size: usize,
    pub embedding_dim: usize,
    #[serde(default)]
    pub hidden_units: Vec<usize>,
    pub output_units: usize,
}

impl NetworkConfig {
    fn validate(&self) -> Result<(), ArtifactError> {
        if self.vocab_size == 0 || self.embedding_dim == 0 || self.output_units == 0 {
            return Err(ArtifactError::Invalid(format!(
                "network dimensions must be non-zero: {self:?}"
            )));
        }
        if self.hidden_units.iter().any(|&units| units == 0) {
            return Err(ArtifactError::Invalid(
                "hidden layers must have at least one unit".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct SequenceNetwork {
    config: NetworkConfig,
    embedding: Embedding,
    hidden: Vec<Linear>,
    output: Linear,
    device: Device,
}

impl SequenceNetwork {
    /// Reads the JSON config and the safetensors weights it describes.
    pub fn load(config_path: &Path, weights_path: &Path) -> Result<Self, ArtifactError> {
        let config: NetworkConfig = read_json(config_path)?;
        config.validate()?;

        let data = std::fs::read(weights_path).map_err(|source| ArtifactError::Io {
            path: weights_path.to_path_buf(),
            source,
        })?;
        let device = Device::Cpu;
        let vb = VarBuilder::from_buffered_safetensors(data, DType::F32, &device)?;
        Self::build(config, vb, device)
    }

    /// Builds the layers from an already-populated `VarBuilder`.
    pub fn build(
        config: NetworkConfig,
        vb: VarBuilder,
        device: Device,
    ) -> Result<Self, ArtifactError> {
        config.validate()?;

        let embedding = embedding(config.vocab_size, config.embedding_dim, vb.pp("embedding"))?;

        let mut hidden = Vec::with_capacity(config.hidden_units.len());
        let mut width = config.embedding_dim;
        for (i, &units) in config.hidden_units.iter().enumerate() {
            hidden.push(linear(width, units, vb.pp(format!("hidden.{i}")))?);
            width = units;
        }
        let output = linear(width, config.output_units, vb.pp("output"))?;

        debug!(
            vocab_size = config.vocab_size,
            embedding_dim = config.embedding_dim,
            hidden_layers = hidden.len(),
            output_units = config.output_units,
            "Sequence network built"
        );

        Ok(Self {
            config,
            embedding,
            hidden,
            output,
            device,
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.config.vocab_size
    }

    fn forward(&self, tokens: &[u32]) -> Result<Tensor, InferenceError> {
        let ids = Tensor::new(tokens, &self.device)?.unsqueeze(0)?;
        let embedded = self.embedding.forward(&ids)?;
        let mut x = embedded.mean(1)?;
        for layer in &self.hidden {
            x = layer.forward(&x)?.relu()?;
        }
        let logits = self.output.forward(&x)?;
        let probs = if self.config.output_units == 1 {
            candle_nn::ops::sigmoid(&logits)?
        } else {
            candle_nn::ops::softmax_last_dim(&logits)?
        };
        Ok(probs)
    }
}

impl TextClassifier for SequenceNetwork {
    fn predict(&self, tokens: &[u32]) -> Result<Vec<f32>, InferenceError> {
        if tokens.is_empty() {
            return Err(InferenceError::EmptySequence);
        }
        if let Some(&token) = tokens.iter().find(|&&t| t as usize >= self.config.vocab_size) {
            return Err(InferenceError::TokenOutOfRange {
                token,
                vocab_size: self.config.vocab_size,
            });
        }
        let probs = self.forward(tokens)?.squeeze(0)?.to_vec1::<f32>()?;
        if probs.len() != self.config.output_units {
            return Err(InferenceError::OutputWidth {
                expected: self.config.output_units,
                actual: probs.len(),
            });
        }
        Ok(probs)
    }

    fn output_width(&self) -> usize {
        self.config.output_units
    }
}
