//! Test doubles for every model role, so pipeline stages can be exercised
//! without real weights.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::inference::career::CareerRecommender;
use crate::inference::detector::AiTextDetector;
use crate::inference::encoders::{FittedLabelEncoder, MultiLabelBinarizer};
use crate::inference::error::InferenceError;
use crate::inference::forest::MultiLabelClassifier;
use crate::inference::network::TextClassifier;
use crate::inference::personality::PersonalityClassifier;
use crate::inference::pipeline::Pipeline;
use crate::inference::sequence::WordIndexVocabulary;
use crate::inference::tokenizer::FittedTokenizer;

/// Returns a fixed output and records the last sequence it saw.
pub struct FixedClassifier {
    output: Option<Vec<f32>>,
    pub seen: Mutex<Option<Vec<u32>>>,
}

impl FixedClassifier {
    pub fn returning(output: Vec<f32>) -> Self {
        Self {
            output: Some(output),
            seen: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            output: None,
            seen: Mutex::new(None),
        }
    }

    /// A distribution over `width` classes that peaks at `index`.
    pub fn peaked(width: usize, index: usize) -> Self {
        let mut probs = vec![0.01; width];
        probs[index] = 1.0 - 0.01 * (width as f32 - 1.0);
        Self::returning(probs)
    }
}

impl TextClassifier for FixedClassifier {
    fn predict(&self, tokens: &[u32]) -> Result<Vec<f32>, InferenceError> {
        *self.seen.lock().unwrap() = Some(tokens.to_vec());
        self.output.clone().ok_or(InferenceError::EmptyOutput)
    }

    fn output_width(&self) -> usize {
        self.output.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Multi-label model that sets the same indicators for every input and
/// records the last feature row.
pub struct FixedMultiLabel {
    indicators: Vec<bool>,
    pub seen: Mutex<Option<Vec<f32>>>,
}

impl FixedMultiLabel {
    pub fn new(indicators: Vec<bool>) -> Self {
        Self {
            indicators,
            seen: Mutex::new(None),
        }
    }
}

impl MultiLabelClassifier for FixedMultiLabel {
    fn n_features(&self) -> usize {
        1
    }

    fn n_outputs(&self) -> usize {
        self.indicators.len()
    }

    fn predict(&self, features: &[f32]) -> Result<Vec<bool>, InferenceError> {
        *self.seen.lock().unwrap() = Some(features.to_vec());
        Ok(self.indicators.clone())
    }
}

pub const ALL_TYPES: [&str; 16] = [
    "ENFJ", "ENFP", "ENTJ", "ENTP", "ESFJ", "ESFP", "ESTJ", "ESTP", "INFJ", "INFP", "INTJ",
    "INTP", "ISFJ", "ISFP", "ISTJ", "ISTP",
];

pub fn encoder(labels: &[&str]) -> FittedLabelEncoder {
    FittedLabelEncoder::new(labels.iter().map(|l| l.to_string()).collect())
}

pub fn binarizer(careers: &[&str]) -> MultiLabelBinarizer {
    MultiLabelBinarizer::new(careers.iter().map(|c| c.to_string()).collect())
}

/// A fully-loaded pipeline whose classifier always predicts `label` and whose
/// career model sets `indicators` over Consultant, Executive, Scientist.
/// `ai_probability` of `None` leaves the detector unloaded.
pub fn stub_pipeline(ai_probability: Option<f32>, label: &str, indicators: Vec<bool>) -> Pipeline {
    let detector = ai_probability.map(|p| {
        AiTextDetector::new(
            Arc::new(WordIndexVocabulary::new(HashMap::new())),
            Arc::new(FixedClassifier::returning(vec![p])),
            0.85,
        )
    });
    let index = ALL_TYPES
        .iter()
        .position(|&t| t == label)
        .expect("label must be one of ALL_TYPES");
    let personality = PersonalityClassifier::new(
        Arc::new(FittedTokenizer::new(HashMap::new())),
        Arc::new(FixedClassifier::peaked(16, index)),
        Arc::new(encoder(&ALL_TYPES)),
    );
    let career = CareerRecommender::new(
        Arc::new(encoder(&ALL_TYPES)),
        Arc::new(FixedMultiLabel::new(indicators)),
        Arc::new(binarizer(&["Consultant", "Executive", "Scientist"])),
    );
    Pipeline::new(detector, Some(personality), Some(career))
}
