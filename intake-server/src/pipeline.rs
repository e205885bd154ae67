//! Post-call processing: redact, summarize and triage a finished call, then
//! insert-or-merge the record by session id.

use clinical_nlp::{NlpResult, RiskTier, SoapNote, TranscriptTransforms};
use intake_store::{CallRecord, CallStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Post-call webhook payload from the voice-AI platform.
///
/// Built leniently from whatever JSON the vendor sent: scalar ids and
/// timestamps are kept as strings, wrongly typed optional fields are
/// dropped, and a body that is not a JSON object yields an empty event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCallEvent {
    /// `sessionId`
    pub session_id_camel: Option<String>,
    /// `session_id`
    pub session_id_snake: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub bot_uid: Option<String>,
    /// `isSuccessful`
    pub is_successful: Option<bool>,
    /// `startedAt`
    pub started_at: Option<String>,
    /// `endedAt`
    pub ended_at: Option<String>,
}

impl PostCallEvent {
    pub fn from_json(payload: &Value) -> Self {
        let Some(fields) = payload.as_object() else {
            return Self::default();
        };
        let text = |key: &str| fields.get(key).and_then(scalar_to_string);

        Self {
            session_id_camel: text("sessionId"),
            session_id_snake: text("session_id"),
            transcript: text("transcript"),
            summary: text("summary"),
            bot_uid: text("bot_uid"),
            is_successful: fields.get("isSuccessful").and_then(loose_bool),
            started_at: text("startedAt"),
            ended_at: text("endedAt"),
        }
    }

    /// Parse a raw request body. Invalid JSON yields an empty event.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(payload) => Self::from_json(&payload),
            Err(error) => {
                warn!(
                    body_len = body.len(),
                    error = %error,
                    "Post-call body is not valid JSON; processing as empty event"
                );
                Self::default()
            }
        }
    }

    /// Supplied session id, `sessionId` first. Blank values count as absent.
    pub fn supplied_session_id(&self) -> Option<&str> {
        [&self.session_id_camel, &self.session_id_snake]
            .into_iter()
            .filter_map(|id| id.as_deref().map(str::trim))
            .find(|id| !id.is_empty())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn loose_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Acknowledgment returned to the event source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCallAck {
    pub status: String,
    pub session_id: String,
    pub updated: bool,
    pub total_records: usize,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The record could not be persisted; the event source should retry
    #[error("Failed to persist call record: {0}")]
    Storage(#[from] StoreError),
}

pub struct PostCallPipeline {
    transforms: Arc<dyn TranscriptTransforms>,
    store: Arc<dyn CallStore>,
}

impl PostCallPipeline {
    pub fn new(transforms: Arc<dyn TranscriptTransforms>, store: Arc<dyn CallStore>) -> Self {
        Self { transforms, store }
    }

    pub fn store(&self) -> &Arc<dyn CallStore> {
        &self.store
    }

    /// Process one post-call event.
    ///
    /// Transform failures never fail the request: each failing transform is
    /// replaced by its degraded output. Only a storage write failure is
    /// returned as an error.
    pub async fn process(&self, event: PostCallEvent) -> Result<PostCallAck, PipelineError> {
        let session_id = match event.supplied_session_id() {
            Some(id) => id.to_string(),
            None => {
                let generated = Uuid::new_v4().to_string();
                info!(session_id = %generated, "Post-call event without session id; generated one");
                generated
            }
        };

        let transcript = event.transcript.unwrap_or_default();
        let summary = event.summary;

        let redacted_transcript = guarded(
            &session_id,
            "redact",
            || self.transforms.redact(&transcript),
            || transcript.clone(),
        );
        let soap = guarded(
            &session_id,
            "synthesize",
            || self.transforms.synthesize(&transcript, summary.as_deref()),
            SoapNote::default,
        );
        let risk = guarded(
            &session_id,
            "classify",
            || self.transforms.classify(&transcript),
            || RiskTier::Unknown,
        );

        let transcript_len = transcript.len();
        let record = CallRecord {
            session_id: session_id.clone(),
            bot_uid: event.bot_uid,
            transcript,
            redacted_transcript,
            summary,
            soap,
            risk,
            is_successful: event.is_successful.unwrap_or(false),
            started_at: event.started_at,
            ended_at: event.ended_at,
        };

        let outcome = self.store.upsert(record).await.map_err(|e| {
            error!(session_id = %session_id, error = %e, "Failed to persist call record");
            PipelineError::from(e)
        })?;

        info!(
            session_id = %session_id,
            updated = outcome.updated,
            total_records = outcome.total_count,
            risk = %risk,
            transcript_len,
            "Post-call record stored"
        );

        Ok(PostCallAck {
            status: "ok".to_string(),
            session_id,
            updated: outcome.updated,
            total_records: outcome.total_count,
        })
    }
}

/// Run one transform; on error or panic log it and use the fallback
fn guarded<T>(
    session_id: &str,
    transform: &'static str,
    run: impl FnOnce() -> NlpResult<T>,
    fallback: impl FnOnce() -> T,
) -> T {
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(
                session_id = %session_id,
                transform,
                error = %e,
                "Transform failed; storing degraded output"
            );
            fallback()
        }
        Err(_) => {
            error!(
                session_id = %session_id,
                transform,
                "Transform panicked; storing degraded output"
            );
            fallback()
        }
    }
}
