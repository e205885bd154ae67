use serde::{Deserialize, Serialize};

use crate::error::{ensure_within_limit, NlpResult};

pub const NO_VITALS_CAPTURED: &str = "No vitals captured.";
pub const NO_ASSESSMENT: &str = "No assessment.";
pub const FOLLOW_UP_RECOMMENDED: &str = "Follow-up recommended.";

// Questions and exclamations end the Subjective sentence too, not only `.`
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Four-field clinical-style note, serialized with the `S`/`O`/`A`/`P` keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapNote {
    #[serde(rename = "S")]
    pub subjective: String,
    #[serde(rename = "O")]
    pub objective: String,
    #[serde(rename = "A")]
    pub assessment: String,
    #[serde(rename = "P")]
    pub plan: String,
}

/// Fixed-rule SOAP note synthesizer.
///
/// The Objective and Plan fields are fixed placeholders: vitals are never
/// extracted from speech and no plan is inferred.
#[derive(Debug, Clone)]
pub struct NoteSynthesizer {
    max_input_bytes: usize,
}

impl NoteSynthesizer {
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }

    pub fn synthesize(&self, transcript: &str, summary: Option<&str>) -> NlpResult<SoapNote> {
        if transcript.is_empty() {
            return Ok(SoapNote::default());
        }
        ensure_within_limit(transcript, self.max_input_bytes)?;

        let subjective = transcript
            .split(SENTENCE_TERMINATORS)
            .next()
            .unwrap_or(transcript)
            .trim();

        let assessment = summary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_ASSESSMENT);

        Ok(SoapNote {
            subjective: subjective.to_string(),
            objective: NO_VITALS_CAPTURED.to_string(),
            assessment: assessment.to_string(),
            plan: FOLLOW_UP_RECOMMENDED.to_string(),
        })
    }
}
