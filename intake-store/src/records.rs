use clinical_nlp::{RiskTier, SoapNote};
use serde::{Deserialize, Serialize};

/// One post-processed voice session, keyed by `session_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub session_id: String,
    #[serde(default)]
    pub bot_uid: Option<String>,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub redacted_transcript: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub soap: SoapNote,
    #[serde(default)]
    pub risk: RiskTier,
    #[serde(default)]
    pub is_successful: bool,
    /// Vendor-supplied timestamps, stored verbatim
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
}

impl CallRecord {
    /// Merge a later event for the same session into this record.
    ///
    /// Transcript-derived fields and `is_successful` are always replaced.
    /// Optional metadata is replaced only when the incoming event carries it.
    pub fn merge_from(&mut self, incoming: CallRecord) {
        self.transcript = incoming.transcript;
        self.redacted_transcript = incoming.redacted_transcript;
        self.soap = incoming.soap;
        self.risk = incoming.risk;
        self.is_successful = incoming.is_successful;

        merge_optional(&mut self.bot_uid, incoming.bot_uid);
        merge_optional(&mut self.summary, incoming.summary);
        merge_optional(&mut self.started_at, incoming.started_at);
        merge_optional(&mut self.ended_at, incoming.ended_at);
    }
}

fn merge_optional(target: &mut Option<String>, incoming: Option<String>) {
    if incoming.is_some() {
        *target = incoming;
    }
}
