use axum::{
    extract::{Path, State},
    Json,
};
use intake_store::CallRecord;

use crate::error::{ApiError, ApiResult};
use crate::server::IntakeServer;

pub async fn list_calls(State(server): State<IntakeServer>) -> Json<Vec<CallRecord>> {
    Json(server.calls.list_all().await)
}

pub async fn get_call(
    State(server): State<IntakeServer>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<CallRecord>> {
    server
        .calls
        .get(&session_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Call record"))
}
