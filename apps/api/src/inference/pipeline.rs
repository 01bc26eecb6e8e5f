//! Request orchestration: validate → detect → classify → recommend → describe.
//!
//! Each stage short-circuits with its own `AppError` variant. Stages whose
//! artifacts failed to load are `None`; a missing detector is skipped, a
//! missing classifier or recommender is `ServiceUnavailable`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::inference::career::{CareerOutcome, CareerRecommender};
use crate::inference::descriptions::describe;
use crate::inference::detector::AiTextDetector;
use crate::inference::personality::PersonalityClassifier;
use crate::inference::validation::validate_input;

pub const PERSONALITY_UNAVAILABLE: &str = "Personality prediction model is not available.";
pub const CAREER_UNAVAILABLE: &str = "Career recommendation model is not available.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub personality: String,
    pub description: String,
    pub recommended_jobs: Vec<String>,
}

/// Which stages loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub ai_detection: bool,
    pub personality: bool,
    pub career: bool,
}

/// Immutable after construction; shared by every request.
#[derive(Clone, Default)]
pub struct Pipeline {
    detector: Option<AiTextDetector>,
    personality: Option<PersonalityClassifier>,
    career: Option<CareerRecommender>,
}

impl Pipeline {
    pub fn new(
        detector: Option<AiTextDetector>,
        personality: Option<PersonalityClassifier>,
        career: Option<CareerRecommender>,
    ) -> Self {
        Self {
            detector,
            personality,
            career,
        }
    }

    pub fn stages(&self) -> StageStatus {
        StageStatus {
            ai_detection: self.detector.is_some(),
            personality: self.personality.is_some(),
            career: self.career.is_some(),
        }
    }

    pub fn run(&self, text: &str) -> Result<Prediction, AppError> {
        let text = text.trim();

        if let Err(failure) = validate_input(text) {
            info!(reason = ?failure.reason, "Rejected input");
            return Err(AppError::Validation(failure.message.to_string()));
        }

        if let Some(detector) = &self.detector {
            if detector.is_ai_generated(text) {
                info!("Rejected AI-generated input");
                return Err(AppError::AiGeneratedDetected);
            }
        }

        let personality = self
            .personality
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable(PERSONALITY_UNAVAILABLE.to_string()))?;
        let prediction = personality.predict(text)?;
        debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            "Personality predicted"
        );

        let career = self
            .career
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable(CAREER_UNAVAILABLE.to_string()))?;
        let recommended_jobs = match career.recommend(&prediction.label)? {
            CareerOutcome::Recommended(jobs) => jobs,
            CareerOutcome::UnknownType => {
                info!(label = %prediction.label, "Predicted label unknown to MBTI encoder");
                return Err(AppError::InvalidPersonalityType(prediction.label));
            }
        };

        Ok(Prediction {
            description: describe(&prediction.label).to_string(),
            personality: prediction.label,
            recommended_jobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::inference::career::NO_CAREERS_MESSAGE;
    use crate::inference::descriptions::MbtiType;
    use crate::inference::sequence::WordIndexVocabulary;
    use crate::inference::testing::{
        binarizer, encoder, stub_pipeline, FixedClassifier, FixedMultiLabel, ALL_TYPES,
    };
    use crate::inference::tokenizer::FittedTokenizer;
    use crate::inference::validation::{GREETING_MESSAGE, TOO_SHORT_MESSAGE};

    const SAMPLE: &str = "I love planning detailed schedules and leading teams to finish big projects.";

    fn index_of(label: &str) -> usize {
        ALL_TYPES.iter().position(|&t| t == label).unwrap()
    }

    fn detector(probability: f32) -> AiTextDetector {
        AiTextDetector::new(
            Arc::new(WordIndexVocabulary::new(HashMap::from([("planning".to_string(), 1)]))),
            Arc::new(FixedClassifier::returning(vec![probability])),
            0.85,
        )
    }

    fn personality(label: &str) -> PersonalityClassifier {
        PersonalityClassifier::new(
            Arc::new(FittedTokenizer::new(HashMap::from([("planning".to_string(), 1)]))),
            Arc::new(FixedClassifier::peaked(16, index_of(label))),
            Arc::new(encoder(&ALL_TYPES)),
        )
    }

    fn career(mbti_classes: &[&str], indicators: Vec<bool>) -> CareerRecommender {
        CareerRecommender::new(
            Arc::new(encoder(mbti_classes)),
            Arc::new(FixedMultiLabel::new(indicators)),
            Arc::new(binarizer(&["Consultant", "Executive", "Scientist"])),
        )
    }

    fn full(probability: f32, label: &str, indicators: Vec<bool>) -> Pipeline {
        stub_pipeline(Some(probability), label, indicators)
    }

    #[test]
    fn test_happy_path_assembles_response() {
        let p = full(0.1, "ENTJ", vec![true, true, false]);
        let result = p.run(SAMPLE).unwrap();
        assert_eq!(result.personality, "ENTJ");
        assert_eq!(result.description, MbtiType::ENTJ.description());
        assert_eq!(result.recommended_jobs, vec!["Consultant", "Executive"]);
    }

    #[test]
    fn test_short_input_is_validation_error() {
        let p = full(0.1, "ENTJ", vec![true, false, false]);
        match p.run("ok thanks") {
            Err(AppError::Validation(msg)) => assert_eq!(msg, TOO_SHORT_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_greeting_is_validation_error() {
        let p = full(0.1, "ENTJ", vec![true, false, false]);
        match p.run("  Hello ") {
            Err(AppError::Validation(msg)) => assert_eq!(msg, GREETING_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_runs_before_any_model() {
        // No stages loaded at all: validation still answers first.
        let p = Pipeline::default();
        assert!(matches!(p.run(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_ai_text_above_threshold_is_rejected() {
        let p = full(0.86, "ENTJ", vec![true, false, false]);
        assert!(matches!(p.run(SAMPLE), Err(AppError::AiGeneratedDetected)));
    }

    #[test]
    fn test_ai_text_at_threshold_continues() {
        let p = full(0.85, "ENTJ", vec![true, false, false]);
        assert!(p.run(SAMPLE).is_ok());
    }

    #[test]
    fn test_missing_detector_never_blocks() {
        let p = Pipeline::new(
            None,
            Some(personality("INFP")),
            Some(career(&ALL_TYPES, vec![false, false, true])),
        );
        for _ in 0..3 {
            assert_eq!(p.run(SAMPLE).unwrap().personality, "INFP");
        }
    }

    #[test]
    fn test_missing_personality_model_is_unavailable() {
        let p = Pipeline::new(Some(detector(0.1)), None, None);
        match p.run(SAMPLE) {
            Err(AppError::ServiceUnavailable(msg)) => assert_eq!(msg, PERSONALITY_UNAVAILABLE),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_ai_check_precedes_availability_check() {
        let p = Pipeline::new(Some(detector(0.99)), None, None);
        assert!(matches!(p.run(SAMPLE), Err(AppError::AiGeneratedDetected)));
    }

    #[test]
    fn test_missing_career_model_is_unavailable() {
        let p = Pipeline::new(None, Some(personality("ENTJ")), None);
        match p.run(SAMPLE) {
            Err(AppError::ServiceUnavailable(msg)) => assert_eq!(msg, CAREER_UNAVAILABLE),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_label_unknown_to_mbti_encoder_is_invalid_type() {
        let p = Pipeline::new(
            None,
            Some(personality("ISTP")),
            Some(career(&["ENTJ", "INTJ"], vec![true, false, false])),
        );
        match p.run(SAMPLE) {
            Err(AppError::InvalidPersonalityType(label)) => assert_eq!(label, "ISTP"),
            other => panic!("expected invalid type, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_career_set_becomes_sentinel() {
        let p = full(0.1, "ISFJ", vec![false, false, false]);
        assert_eq!(p.run(SAMPLE).unwrap().recommended_jobs, vec![NO_CAREERS_MESSAGE]);
    }

    #[test]
    fn test_personality_model_failure_is_inference_error() {
        let p = Pipeline::new(
            None,
            Some(PersonalityClassifier::new(
                Arc::new(FittedTokenizer::new(HashMap::new())),
                Arc::new(FixedClassifier::failing()),
                Arc::new(encoder(&ALL_TYPES)),
            )),
            Some(career(&ALL_TYPES, vec![true, false, false])),
        );
        assert!(matches!(p.run(SAMPLE), Err(AppError::Inference(_))));
    }

    #[test]
    fn test_stage_status_reflects_loaded_stages() {
        let p = Pipeline::new(None, Some(personality("ENTJ")), None);
        assert_eq!(
            p.stages(),
            StageStatus {
                ai_detection: false,
                personality: true,
                career: false
            }
        );
    }
}
