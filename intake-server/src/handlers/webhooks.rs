//! Webhooks called by the voice-AI platform around each call

use axum::{body::Bytes, extract::State, Json};
use intake_store::PatientContext;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::pipeline::{PostCallAck, PostCallEvent};
use crate::server::IntakeServer;

#[derive(Debug, Default, Deserialize)]
pub struct PreCallEvent {
    #[serde(default)]
    pub call: PreCallInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreCallInfo {
    #[serde(default)]
    pub from_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreCallResponse {
    pub call: DynamicCall,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DynamicCall {
    /// Empty object when the caller is unknown
    pub dynamic_variables: DynamicVariables,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DynamicVariables {
    #[serde(flatten)]
    pub patient: Option<PatientVariables>,
}

/// Caller context injected into the agent prompt before the call starts
#[derive(Debug, Serialize, Deserialize)]
pub struct PatientVariables {
    pub patient_name: String,
    pub medical_id: String,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub last_visit: String,
}

impl From<PatientContext> for PatientVariables {
    fn from(patient: PatientContext) -> Self {
        Self {
            patient_name: patient.name,
            medical_id: patient.medical_id,
            allergies: patient.allergies,
            conditions: patient.conditions,
            last_visit: patient.last_visit,
        }
    }
}

/// Look up the caller by phone number. Unknown callers proceed with no
/// dynamic variables.
pub async fn pre_call(
    State(server): State<IntakeServer>,
    Json(event): Json<PreCallEvent>,
) -> Json<PreCallResponse> {
    let phone = event.call.from_number.unwrap_or_default();
    let patient = server.patients.lookup_by_phone(phone.trim()).await;

    match &patient {
        Some(found) => info!(medical_id = %found.medical_id, "Pre-call caller matched"),
        None => debug!("Pre-call caller not found in directory"),
    }

    Json(PreCallResponse {
        call: DynamicCall {
            dynamic_variables: DynamicVariables {
                patient: patient.map(PatientVariables::from),
            },
        },
    })
}

/// Store the finished call. The body is read leniently so that a loosely
/// typed or malformed vendor payload is still acknowledged.
pub async fn post_call(
    State(server): State<IntakeServer>,
    body: Bytes,
) -> ApiResult<Json<PostCallAck>> {
    let event = PostCallEvent::from_body(&body);
    let ack = server.pipeline.process(event).await?;
    Ok(Json(ack))
}
