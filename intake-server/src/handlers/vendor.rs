//! Pass-through to the vendor's bot-management API

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::ApiResult;
use crate::handlers::bots::DeletedResponse;
use crate::server::IntakeServer;

pub async fn list_bots(State(server): State<IntakeServer>) -> ApiResult<Json<Value>> {
    Ok(Json(server.vendor.list_bots().await?))
}

pub async fn get_bot(
    State(server): State<IntakeServer>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Value>> {
    Ok(Json(server.vendor.get_bot(&uid).await?))
}

pub async fn create_bot(
    State(server): State<IntakeServer>,
    Json(bot): Json<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(server.vendor.create_bot(&bot).await?))
}

pub async fn update_bot(
    State(server): State<IntakeServer>,
    Path(uid): Path<String>,
    Json(updates): Json<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(server.vendor.update_bot(&uid, &updates).await?))
}

pub async fn delete_bot(
    State(server): State<IntakeServer>,
    Path(uid): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    server.vendor.delete_bot(&uid).await?;
    Ok(Json(DeletedResponse::deleted()))
}
