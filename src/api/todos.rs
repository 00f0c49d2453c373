//! Todo handlers. All of these run behind the auth middleware and receive
//! the caller's identity via request extensions; the queries they call are
//! scoped to that identity.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::token::Identity;
use crate::api::validation::validate_date;
use crate::db::{self, CreateTodoRequest, MessageResponse, SetCompletedRequest, SetTextRequest, Todo};
use crate::AppState;

pub async fn list_for_date(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    validate_date(&date).map_err(ApiError::validation)?;

    let todos = db::todos::list_for_date(&state.db, identity.id, &date).await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    if request.text.is_empty() || request.date.is_empty() {
        return Err(ApiError::validation("Text and date are required"));
    }
    validate_date(&request.date).map_err(ApiError::validation)?;

    let todo = db::todos::create(&state.db, identity.id, &request.text, &request.date).await?;
    Ok(Json(todo))
}

/// An id that matches no row owned by the caller is a silent no-op; the
/// response does not distinguish it from a successful update.
pub async fn set_completed(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(request): Json<SetCompletedRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    db::todos::set_completed(&state.db, identity.id, id, request.completed).await?;
    Ok(Json(MessageResponse {
        message: "Todo updated successfully".to_string(),
    }))
}

pub async fn set_text(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(request): Json<SetTextRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.text.is_empty() {
        return Err(ApiError::validation("Text is required"));
    }

    db::todos::set_text(&state.db, identity.id, id, &request.text).await?;
    Ok(Json(MessageResponse {
        message: "Todo text updated successfully".to_string(),
    }))
}

pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    db::todos::delete(&state.db, identity.id, id).await?;
    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}
