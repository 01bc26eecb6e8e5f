/// Minimum number of whitespace-separated words a submission must contain.
pub const MIN_WORDS: usize = 5;

/// Whole-input phrases that carry no personality signal.
const GREETING_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "bye",
    "excuse me",
    "thank you",
    "good morning",
    "good night",
];

pub const TOO_SHORT_MESSAGE: &str = "Please enter a meaningful text with at least 5 words.";
pub const GREETING_MESSAGE: &str =
    "Please enter a meaningful text, not just greetings or short phrases.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    Empty,
    TooShort,
    Greeting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub reason: RejectionReason,
    pub message: &'static str,
}

/// Rejects input that is empty, exactly a greeting once trimmed and
/// lower-cased, or shorter than `MIN_WORDS` words.
///
/// Greetings are checked before the word count so a bare "hi" is told why it
/// was rejected. The greeting check only matches the whole input: a sentence
/// that merely contains "hi" is accepted.
pub fn validate_input(text: &str) -> Result<(), ValidationFailure> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationFailure {
            reason: RejectionReason::Empty,
            message: TOO_SHORT_MESSAGE,
        });
    }

    let lowered = trimmed.to_lowercase();
    if GREETING_PHRASES.contains(&lowered.as_str()) {
        return Err(ValidationFailure {
            reason: RejectionReason::Greeting,
            message: GREETING_MESSAGE,
        });
    }

    if trimmed.split_whitespace().count() < MIN_WORDS {
        return Err(ValidationFailure {
            reason: RejectionReason::TooShort,
            message: TOO_SHORT_MESSAGE,
        });
    }

    Ok(())
}
