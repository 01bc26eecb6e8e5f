use std::sync::Arc;

use serde::Serialize;

use crate::config::PERSONALITY_SEQUENCE_LEN;
use crate::inference::encoders::LabelEncoder;
use crate::inference::error::InferenceError;
use crate::inference::network::TextClassifier;
use crate::inference::sequence::{pad_sequence, TextVectorizer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalityPrediction {
    pub label: String,
    /// Probability mass on the chosen class.
    pub confidence: f32,
}

/// Maps text to one of the label encoder's classes via the arg-max of the
/// sequence model's distribution.
#[derive(Clone)]
pub struct PersonalityClassifier {
    tokenizer: Arc<dyn TextVectorizer>,
    model: Arc<dyn TextClassifier>,
    labels: Arc<dyn LabelEncoder>,
}

impl PersonalityClassifier {
    pub fn new(
        tokenizer: Arc<dyn TextVectorizer>,
        model: Arc<dyn TextClassifier>,
        labels: Arc<dyn LabelEncoder>,
    ) -> Self {
        Self {
            tokenizer,
            model,
            labels,
        }
    }

    pub fn labels(&self) -> &dyn LabelEncoder {
        self.labels.as_ref()
    }

    pub fn predict(&self, text: &str) -> Result<PersonalityPrediction, InferenceError> {
        let tokens = self.tokenizer.vectorize(text);
        let padded = pad_sequence(&tokens, PERSONALITY_SEQUENCE_LEN);
        let probs = self.model.predict(&padded)?;

        let expected = self.labels.classes().len();
        if probs.len() != expected {
            return Err(InferenceError::OutputWidth {
                expected,
                actual: probs.len(),
            });
        }

        let (index, confidence) = argmax(&probs).ok_or(InferenceError::EmptyOutput)?;
        let label = self
            .labels
            .inverse_transform(index)
            .ok_or(InferenceError::UnknownClassIndex(index))?;

        Ok(PersonalityPrediction {
            label: label.to_string(),
            confidence,
        })
    }
}

/// Index and value of the largest element; the first one wins ties.
fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::inference::testing::{encoder, FixedClassifier, ALL_TYPES};
    use crate::inference::tokenizer::FittedTokenizer;

    fn classifier(model: Arc<FixedClassifier>) -> PersonalityClassifier {
        let tokenizer = FittedTokenizer::new(HashMap::from([
            ("planning".to_string(), 1),
            ("teams".to_string(), 2),
        ]));
        PersonalityClassifier::new(Arc::new(tokenizer), model, Arc::new(encoder(&ALL_TYPES)))
    }

    #[test]
    fn test_argmax_picks_largest() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[0.5, 0.5]), Some((0, 0.5)));
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_predicts_label_at_argmax() {
        let entj = ALL_TYPES.iter().position(|&t| t == "ENTJ").unwrap();
        let c = classifier(Arc::new(FixedClassifier::peaked(16, entj)));
        let prediction = c.predict("I love planning and leading teams").unwrap();
        assert_eq!(prediction.label, "ENTJ");
        assert!(prediction.confidence > 0.5);
    }

    #[test]
    fn test_sequence_is_padded_to_personality_length() {
        let model = Arc::new(FixedClassifier::peaked(16, 0));
        let c = classifier(model.clone());
        c.predict("Planning, teams!").unwrap();
        let seen = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.len(), PERSONALITY_SEQUENCE_LEN);
        assert_eq!(&seen[PERSONALITY_SEQUENCE_LEN - 2..], &[1, 2]);
    }

    #[test]
    fn test_output_width_must_match_label_count() {
        let c = classifier(Arc::new(FixedClassifier::returning(vec![0.5, 0.5])));
        assert!(matches!(
            c.predict("some text goes here today"),
            Err(InferenceError::OutputWidth {
                expected: 16,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_model_failure_propagates() {
        let c = classifier(Arc::new(FixedClassifier::failing()));
        assert!(c.predict("some text goes here today").is_err());
    }
}
