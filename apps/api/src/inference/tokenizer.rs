use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::inference::error::ArtifactError;
use crate::inference::read_json;
use crate::inference::sequence::{TextVectorizer, PAD_INDEX};

const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

fn default_filters() -> String {
    DEFAULT_FILTERS.to_string()
}

fn default_split() -> String {
    " ".to_string()
}

fn default_lower() -> bool {
    true
}

/// A tokenizer fitted offline on the personality corpus.
///
/// Text is lower-cased (when `lower`), every filter character is replaced by
/// `split`, and the result is split on `split` with empty pieces dropped.
/// Indices at or beyond `num_words` are treated as unknown. Unknown words map
/// to the OOV token's index when one was fitted, otherwise to `PAD_INDEX`.
#[derive(Debug, Clone, Deserialize)]
pub struct FittedTokenizer {
    word_index: HashMap<String, u32>,
    #[serde(default)]
    num_words: Option<u32>,
    #[serde(default)]
    oov_token: Option<String>,
    #[serde(default = "default_lower")]
    lower: bool,
    #[serde(default = "default_filters")]
    filters: String,
    #[serde(default = "default_split")]
    split: String,
}

impl FittedTokenizer {
    #[cfg(test)]
    pub fn new(word_index: HashMap<String, u32>) -> Self {
        Self {
            word_index,
            num_words: None,
            oov_token: None,
            lower: true,
            filters: default_filters(),
            split: default_split(),
        }
    }

    #[cfg(test)]
    pub fn with_num_words(mut self, num_words: u32) -> Self {
        self.num_words = Some(num_words);
        self
    }

    #[cfg(test)]
    pub fn with_oov_token(mut self, token: impl Into<String>) -> Self {
        self.oov_token = Some(token.into());
        self
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let tokenizer: Self = read_json(path)?;
        if tokenizer.split.is_empty() {
            return Err(ArtifactError::Invalid(
                "tokenizer split string must not be empty".to_string(),
            ));
        }
        if let Some(token) = &tokenizer.oov_token {
            if !tokenizer.word_index.contains_key(token) {
                return Err(ArtifactError::Invalid(format!(
                    "OOV token '{token}' is missing from the word index"
                )));
            }
        }
        Ok(tokenizer)
    }

    /// Largest index the tokenizer can emit.
    pub fn max_index(&self) -> u32 {
        let max = self.word_index.values().copied().max().unwrap_or(PAD_INDEX);
        match self.num_words {
            Some(limit) => max.min(limit.saturating_sub(1)),
            None => max,
        }
    }

    fn words(&self, text: &str) -> Vec<String> {
        let mut normalized = if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        if !self.filters.is_empty() {
            normalized = normalized
                .chars()
                .map(|c| {
                    if self.filters.contains(c) {
                        self.split.clone()
                    } else {
                        c.to_string()
                    }
                })
                .collect();
        }
        normalized
            .split(self.split.as_str())
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn oov_index(&self) -> u32 {
        self.oov_token
            .as_ref()
            .and_then(|token| self.word_index.get(token).copied())
            .unwrap_or(PAD_INDEX)
    }
}

impl TextVectorizer for FittedTokenizer {
    fn vectorize(&self, text: &str) -> Vec<u32> {
        let oov = self.oov_index();
        self.words(text)
            .iter()
            .map(|word| match self.word_index.get(word) {
                Some(&index) if self.num_words.map_or(true, |limit| index < limit) => index,
                _ => oov,
            })
            .collect()
    }
}
