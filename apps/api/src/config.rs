use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Sequence length the AI-text detector was trained with.
pub const AI_DETECTION_SEQUENCE_LEN: usize = 340;
/// Sequence length the personality classifier was trained with.
pub const PERSONALITY_SEQUENCE_LEN: usize = 100;

const DEFAULT_AI_DETECTION_THRESHOLD: f32 = 0.85;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Probability above which text is treated as machine-written.
    pub ai_detection_threshold: f32,
    /// Disable the career stage when the two MBTI encoders disagree at startup.
    pub strict_encoder_check: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ai_detection_threshold = match std::env::var("AI_DETECTION_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_AI_DETECTION_THRESHOLD,
        };

        let strict_encoder_check = match std::env::var("STRICT_ENCODER_CHECK") {
            Ok(raw) => parse_flag(&raw)
                .with_context(|| format!("STRICT_ENCODER_CHECK must be a boolean, got '{raw}'"))?,
            Err(_) => true,
        };

        Ok(Config {
            model_dir: std::env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_detection_threshold,
            strict_encoder_check,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model_dir: PathBuf::from("models"),
            port: 8080,
            rust_log: "info".to_string(),
            ai_detection_threshold: DEFAULT_AI_DETECTION_THRESHOLD,
            strict_encoder_check: true,
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f32> {
    let value = raw
        .trim()
        .parse::<f32>()
        .with_context(|| format!("AI_DETECTION_THRESHOLD must be a number, got '{raw}'"))?;
    if !(0.0..=1.0).contains(&value) {
        bail!("AI_DETECTION_THRESHOLD must be within [0, 1], got {value}");
    }
    Ok(value)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
