//! Local bot registry CRUD

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use intake_store::{Bot, BotUpdate, NewBot};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::server::IntakeServer;

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub status: String,
}

impl DeletedResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}

pub async fn list_bots(State(server): State<IntakeServer>) -> Json<Vec<Bot>> {
    Json(server.bots.list().await)
}

pub async fn get_bot(
    State(server): State<IntakeServer>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Bot>> {
    Ok(Json(server.bots.get(&uid).await?))
}

pub async fn create_bot(
    State(server): State<IntakeServer>,
    Json(new_bot): Json<NewBot>,
) -> ApiResult<(StatusCode, Json<Bot>)> {
    if new_bot.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    let bot = server.bots.create(new_bot).await?;
    Ok((StatusCode::CREATED, Json(bot)))
}

pub async fn update_bot(
    State(server): State<IntakeServer>,
    Path(uid): Path<String>,
    Json(update): Json<BotUpdate>,
) -> ApiResult<Json<Bot>> {
    if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(ApiError::validation("name must not be empty"));
    }
    Ok(Json(server.bots.update(&uid, update).await?))
}

pub async fn delete_bot(
    State(server): State<IntakeServer>,
    Path(uid): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    server.bots.delete(&uid).await?;
    Ok(Json(DeletedResponse::deleted()))
}
