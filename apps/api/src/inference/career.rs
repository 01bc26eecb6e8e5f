use std::sync::Arc;

use crate::inference::encoders::{LabelEncoder, MultiLabelDecoder};
use crate::inference::error::InferenceError;
use crate::inference::forest::MultiLabelClassifier;

/// Shown in place of an empty recommendation set.
pub const NO_CAREERS_MESSAGE: &str = "No career recommendations available.";

#[derive(Debug, PartialEq, Eq)]
pub enum CareerOutcome {
    Recommended(Vec<String>),
    /// The MBTI encoder has never seen this label.
    UnknownType,
}

/// Multi-label career model conditioned on an encoded MBTI label.
#[derive(Clone)]
pub struct CareerRecommender {
    mbti_encoder: Arc<dyn LabelEncoder>,
    model: Arc<dyn MultiLabelClassifier>,
    binarizer: Arc<dyn MultiLabelDecoder>,
}

impl CareerRecommender {
    pub fn new(
        mbti_encoder: Arc<dyn LabelEncoder>,
        model: Arc<dyn MultiLabelClassifier>,
        binarizer: Arc<dyn MultiLabelDecoder>,
    ) -> Self {
        Self {
            mbti_encoder,
            model,
            binarizer,
        }
    }

    pub fn mbti_encoder(&self) -> &dyn LabelEncoder {
        self.mbti_encoder.as_ref()
    }

    /// Career names for `label`, never empty: an empty decoded set becomes
    /// the single `NO_CAREERS_MESSAGE` entry.
    pub fn recommend(&self, label: &str) -> Result<CareerOutcome, InferenceError> {
        let Some(code) = self.mbti_encoder.transform(label) else {
            return Ok(CareerOutcome::UnknownType);
        };

        // The model was fitted on a single numeric column holding the code.
        let features = [code as f32];
        let indicators = self.model.predict(&features)?;
        if indicators.len() != self.binarizer.width() {
            return Err(InferenceError::OutputWidth {
                expected: self.binarizer.width(),
                actual: indicators.len(),
            });
        }

        let mut careers = self.binarizer.inverse_transform(&indicators);
        if careers.is_empty() {
            careers.push(NO_CAREERS_MESSAGE.to_string());
        }
        Ok(CareerOutcome::Recommended(careers))
    }
}
