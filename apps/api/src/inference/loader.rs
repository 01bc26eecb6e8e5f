//! Startup loading of every model artifact.
//!
//! Each stage loads independently. A stage whose files are missing or invalid
//! is logged and left out of the pipeline; the process keeps serving.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::inference::career::CareerRecommender;
use crate::inference::detector::AiTextDetector;
use crate::inference::encoders::{
    class_set_difference, FittedLabelEncoder, LabelEncoder, MultiLabelBinarizer,
    MultiLabelDecoder,
};
use crate::inference::error::ArtifactError;
use crate::inference::forest::{MultiLabelClassifier, TreeEnsemble};
use crate::inference::network::{SequenceNetwork, TextClassifier};
use crate::inference::personality::PersonalityClassifier;
use crate::inference::pipeline::Pipeline;
use crate::inference::sequence::WordIndexVocabulary;
use crate::inference::tokenizer::FittedTokenizer;

/// File locations of every artifact, relative to the model directory.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub detector_config: PathBuf,
    pub detector_weights: PathBuf,
    pub detector_vocabulary: PathBuf,
    pub personality_config: PathBuf,
    pub personality_weights: PathBuf,
    pub personality_tokenizer: PathBuf,
    pub personality_labels: PathBuf,
    pub career_model: PathBuf,
    pub mbti_encoder: PathBuf,
    pub career_binarizer: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            detector_config: dir.join("ai_text_detector.json"),
            detector_weights: dir.join("ai_text_detector.safetensors"),
            detector_vocabulary: dir.join("ai_text_vocabulary.json"),
            personality_config: dir.join("personality_model.json"),
            personality_weights: dir.join("personality_model.safetensors"),
            personality_tokenizer: dir.join("personality_tokenizer.json"),
            personality_labels: dir.join("personality_label_encoder.json"),
            career_model: dir.join("career_model.json"),
            mbti_encoder: dir.join("mbti_label_encoder.json"),
            career_binarizer: dir.join("career_binarizer.json"),
        }
    }
}

/// Loads every stage from `config.model_dir`. Never fails: unavailable stages
/// are simply absent from the returned pipeline.
pub fn load_pipeline(config: &Config) -> Pipeline {
    let start = Instant::now();
    let paths = ArtifactPaths::in_dir(&config.model_dir);
    info!(model_dir = %config.model_dir.display(), "Loading model artifacts");

    let detector = stage("AI text detection", || {
        load_detector(&paths, config.ai_detection_threshold)
    });
    let personality = stage("personality prediction", || load_personality(&paths));
    let mut career = stage("career recommendation", || load_career(&paths));

    if let (Some(classifier), Some(recommender)) = (&personality, &career) {
        if !encoders_agree(classifier.labels(), recommender.mbti_encoder())
            && config.strict_encoder_check
        {
            warn!("Career recommendation disabled: encoder class sets differ (STRICT_ENCODER_CHECK=true)");
            career = None;
        }
    }

    let pipeline = Pipeline::new(detector, personality, career);
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        stages = ?pipeline.stages(),
        "Model artifacts loaded"
    );
    pipeline
}

fn stage<T>(name: &str, load: impl FnOnce() -> Result<T, ArtifactError>) -> Option<T> {
    match load() {
        Ok(loaded) => {
            info!("Loaded {name} stage");
            Some(loaded)
        }
        Err(e) => {
            warn!("Error loading {name} stage, stage disabled: {e}");
            None
        }
    }
}

/// Logs and returns whether the two encoders know exactly the same labels.
fn encoders_agree(personality: &dyn LabelEncoder, mbti: &dyn LabelEncoder) -> bool {
    let diff = class_set_difference(personality, mbti);
    if diff.is_empty() {
        return true;
    }
    error!(
        labels = ?diff,
        "Personality label encoder and MBTI encoder disagree on their class sets"
    );
    false
}

pub fn load_detector(paths: &ArtifactPaths, threshold: f32) -> Result<AiTextDetector, ArtifactError> {
    let vocabulary = WordIndexVocabulary::load(&paths.detector_vocabulary)?;
    let network = SequenceNetwork::load(&paths.detector_config, &paths.detector_weights)?;

    if network.output_width() != 1 {
        return Err(ArtifactError::Invalid(format!(
            "AI text detector must have one output unit, found {}",
            network.output_width()
        )));
    }
    if vocabulary.max_index() as usize >= network.vocab_size() {
        return Err(ArtifactError::Invalid(format!(
            "vocabulary index {} exceeds detector embedding table of {}",
            vocabulary.max_index(),
            network.vocab_size()
        )));
    }
    debug!(words = vocabulary.len(), "AI text vocabulary loaded");

    Ok(AiTextDetector::new(
        Arc::new(vocabulary),
        Arc::new(network),
        threshold,
    ))
}

pub fn load_personality(paths: &ArtifactPaths) -> Result<PersonalityClassifier, ArtifactError> {
    let tokenizer = FittedTokenizer::load(&paths.personality_tokenizer)?;
    let labels = FittedLabelEncoder::load(&paths.personality_labels)?;
    let network = SequenceNetwork::load(&paths.personality_config, &paths.personality_weights)?;

    if network.output_width() != labels.classes().len() {
        return Err(ArtifactError::Invalid(format!(
            "personality model has {} outputs but the label encoder has {} classes",
            network.output_width(),
            labels.classes().len()
        )));
    }
    if tokenizer.max_index() as usize >= network.vocab_size() {
        return Err(ArtifactError::Invalid(format!(
            "tokenizer index {} exceeds personality embedding table of {}",
            tokenizer.max_index(),
            network.vocab_size()
        )));
    }

    Ok(PersonalityClassifier::new(
        Arc::new(tokenizer),
        Arc::new(network),
        Arc::new(labels),
    ))
}

pub fn load_career(paths: &ArtifactPaths) -> Result<CareerRecommender, ArtifactError> {
    let model = TreeEnsemble::load(&paths.career_model)?;
    let mbti_encoder = FittedLabelEncoder::load(&paths.mbti_encoder)?;
    let binarizer = MultiLabelBinarizer::load(&paths.career_binarizer)?;

    if model.n_features() != 1 {
        return Err(ArtifactError::Invalid(format!(
            "career model expects {} features, but is fed a single encoded label",
            model.n_features()
        )));
    }
    if model.n_outputs() != binarizer.width() {
        return Err(ArtifactError::Invalid(format!(
            "career model has {} outputs but the binarizer has {} careers",
            model.n_outputs(),
            binarizer.width()
        )));
    }

    Ok(CareerRecommender::new(
        Arc::new(mbti_encoder),
        Arc::new(model),
        Arc::new(binarizer),
    ))
}
