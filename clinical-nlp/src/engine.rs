use tracing::debug;

use crate::config::NlpConfig;
use crate::error::NlpResult;
use crate::redactor::PiiRedactor;
use crate::risk::{RiskClassifier, RiskTier};
use crate::soap::{NoteSynthesizer, SoapNote};

/// The three post-call transforms. Each is independent of the others and
/// may fail on its own.
pub trait TranscriptTransforms: Send + Sync {
    fn redact(&self, text: &str) -> NlpResult<String>;

    fn synthesize(&self, transcript: &str, summary: Option<&str>) -> NlpResult<SoapNote>;

    fn classify(&self, text: &str) -> NlpResult<RiskTier>;
}

/// Rule-based implementation of [`TranscriptTransforms`]
#[derive(Debug, Clone)]
pub struct ClinicalNlp {
    redactor: PiiRedactor,
    synthesizer: NoteSynthesizer,
    classifier: RiskClassifier,
}

impl ClinicalNlp {
    pub fn new(config: &NlpConfig) -> NlpResult<Self> {
        debug!(
            denylist_size = config.name_denylist.len(),
            max_input_bytes = config.max_input_bytes,
            "Building clinical transcript transforms"
        );
        Ok(Self {
            redactor: PiiRedactor::new(config)?,
            synthesizer: NoteSynthesizer::new(config.max_input_bytes),
            classifier: RiskClassifier::new(config.max_input_bytes),
        })
    }
}

impl TranscriptTransforms for ClinicalNlp {
    fn redact(&self, text: &str) -> NlpResult<String> {
        self.redactor.redact(text)
    }

    fn synthesize(&self, transcript: &str, summary: Option<&str>) -> NlpResult<SoapNote> {
        self.synthesizer.synthesize(transcript, summary)
    }

    fn classify(&self, text: &str) -> NlpResult<RiskTier> {
        self.classifier.classify(text)
    }
}
