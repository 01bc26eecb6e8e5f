use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AI_DETECTION_SEQUENCE_LEN;
use crate::inference::error::InferenceError;
use crate::inference::network::TextClassifier;
use crate::inference::sequence::{pad_sequence, TextVectorizer};

/// Binary machine-written-text detector.
///
/// Detection is fail-open: a model error is logged and the text is treated as
/// human-written. When the detector is not loaded at all the pipeline skips
/// this stage entirely.
#[derive(Clone)]
pub struct AiTextDetector {
    vectorizer: Arc<dyn TextVectorizer>,
    model: Arc<dyn TextClassifier>,
    threshold: f32,
}

impl AiTextDetector {
    pub fn new(
        vectorizer: Arc<dyn TextVectorizer>,
        model: Arc<dyn TextClassifier>,
        threshold: f32,
    ) -> Self {
        Self {
            vectorizer,
            model,
            threshold,
        }
    }

    /// Probability that `text` was machine-written.
    pub fn score(&self, text: &str) -> Result<f32, InferenceError> {
        let tokens = self.vectorizer.vectorize(text);
        let padded = pad_sequence(&tokens, AI_DETECTION_SEQUENCE_LEN);
        let probs = self.model.predict(&padded)?;
        probs.first().copied().ok_or(InferenceError::EmptyOutput)
    }

    /// True only when the score is strictly above the threshold.
    pub fn is_ai_generated(&self, text: &str) -> bool {
        match self.score(text) {
            Ok(probability) => {
                debug!(probability, threshold = self.threshold, "AI text detection score");
                probability > self.threshold
            }
            Err(e) => {
                warn!("AI text detection failed, treating text as human-written: {e}");
                false
            }
        }
    }
}
