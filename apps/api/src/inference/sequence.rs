//! Text → fixed-length token sequence.
//!
//! Two vectorizers feed the two networks: a plain word→index vocabulary for
//! the AI-text detector and a fitted tokenizer for the personality
//! classifier (see `tokenizer.rs`). Both map unknown words to index 0 and
//! both are padded the same way before inference.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::inference::error::ArtifactError;
use crate::inference::read_json;

/// Padding and out-of-vocabulary index.
pub const PAD_INDEX: u32 = 0;

/// Turns raw text into token indices. Implementations must be pure.
pub trait TextVectorizer: Send + Sync {
    fn vectorize(&self, text: &str) -> Vec<u32>;
}

/// Pads or truncates `tokens` to exactly `max_len` entries.
///
/// Padding is prepended; truncation drops tokens from the front, so the most
/// recent `max_len` tokens are kept.
pub fn pad_sequence(tokens: &[u32], max_len: usize) -> Vec<u32> {
    if tokens.len() >= max_len {
        return tokens[tokens.len() - max_len..].to_vec();
    }
    let mut padded = vec![PAD_INDEX; max_len - tokens.len()];
    padded.extend_from_slice(tokens);
    padded
}

/// Word→index mapping used verbatim: words are split on whitespace and
/// looked up with no case folding or punctuation stripping.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct WordIndexVocabulary {
    index: HashMap<String, u32>,
}

impl WordIndexVocabulary {
    #[cfg(test)]
    pub fn new(index: HashMap<String, u32>) -> Self {
        Self { index }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let vocabulary: Self = read_json(path)?;
        if vocabulary.index.is_empty() {
            return Err(ArtifactError::Invalid(format!(
                "{} contains no words",
                path.display()
            )));
        }
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Largest index any word maps to.
    pub fn max_index(&self) -> u32 {
        self.index.values().copied().max().unwrap_or(PAD_INDEX)
    }
}

impl TextVectorizer for WordIndexVocabulary {
    fn vectorize(&self, text: &str) -> Vec<u32> {
        text.split_whitespace()
            .map(|word| self.index.get(word).copied().unwrap_or(PAD_INDEX))
            .collect()
    }
}
