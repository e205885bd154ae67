//! Custom functions the voice agent can invoke mid-call

use axum::{extract::State, Json};
use intake_store::PatientContext;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::server::IntakeServer;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FetchPatientRequest {
    #[serde(default)]
    pub medical_id: Option<String>,
}

pub async fn fetch_patient(
    State(server): State<IntakeServer>,
    Json(request): Json<FetchPatientRequest>,
) -> ApiResult<Json<PatientContext>> {
    let medical_id = request
        .medical_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("medical_id required"))?;

    server
        .patients
        .lookup_by_id(medical_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Patient"))
}
