//! `/memories` handlers.
//!
//! Every handler receives the authenticated [`Caller`]. Reads are allowed when
//! the memory is public or owned by the caller; writes only for the owner.

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{parse_memory_id, ApiJson, ApiPath, MemoryBody};
use crate::auth::Caller;
use crate::error::{ApiError, ApiResult};
use crate::memory::store;
use crate::memory::summary::to_summary;
use crate::memory::types::{Memory, MemoryDraft, MemorySummary};
use crate::state::AppState;

/// `GET /memories` — the caller's memories, oldest first, as summaries.
pub async fn list_memories(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<MemorySummary>>> {
    let owner = caller.sub.clone();
    let memories = state
        .with_db(move |conn| store::list_memories(conn, &owner))
        .await?;

    tracing::debug!(user = %caller.sub, count = memories.len(), "listed memories");
    Ok(Json(memories.iter().map(to_summary).collect()))
}

/// `GET /memories/{id}`
pub async fn get_memory(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(raw_id): ApiPath<String>,
) -> ApiResult<Json<Memory>> {
    let id = parse_memory_id(&raw_id)?;
    let memory = state.with_db(move |conn| store::get_memory(conn, &id)).await?;

    if !memory.is_readable_by(&caller.sub) {
        tracing::warn!(id = %memory.id, user = %caller.sub, "read of private memory denied");
        return Err(ApiError::NotOwner);
    }
    Ok(Json(memory))
}

/// `POST /memories`
pub async fn create_memory(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<MemoryBody>,
) -> ApiResult<Json<Memory>> {
    let draft = MemoryDraft::from(body);
    let owner = caller.sub;
    let memory = state
        .with_db(move |conn| store::create_memory(conn, &owner, &draft))
        .await?;

    tracing::info!(id = %memory.id, user = %memory.user_id, is_public = memory.is_public, "memory created");
    Ok(Json(memory))
}

/// `PUT /memories/{id}` — full replacement of content, cover and visibility.
pub async fn update_memory(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(raw_id): ApiPath<String>,
    ApiJson(body): ApiJson<MemoryBody>,
) -> ApiResult<Json<Memory>> {
    let id = parse_memory_id(&raw_id)?;
    require_owner(&state, &caller, &id).await?;

    let draft = MemoryDraft::from(body);
    let memory = state
        .with_db(move |conn| store::update_memory(conn, &id, &draft))
        .await?;

    tracing::info!(id = %memory.id, user = %caller.sub, "memory updated");
    Ok(Json(memory))
}

/// `DELETE /memories/{id}` — 200 with an empty body.
pub async fn delete_memory(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(raw_id): ApiPath<String>,
) -> ApiResult<StatusCode> {
    let id = parse_memory_id(&raw_id)?;
    require_owner(&state, &caller, &id).await?;

    let deleted = id.clone();
    state
        .with_db(move |conn| store::delete_memory(conn, &deleted))
        .await?;

    tracing::info!(id = %id, user = %caller.sub, "memory deleted");
    Ok(StatusCode::OK)
}

/// Fails with 404 if the memory is gone and a bare 401 if someone else owns it.
async fn require_owner(state: &AppState, caller: &Caller, id: &str) -> ApiResult<()> {
    let lookup = id.to_string();
    let memory = state
        .with_db(move |conn| store::get_memory(conn, &lookup))
        .await?;

    if !memory.is_owned_by(&caller.sub) {
        tracing::warn!(id = %id, user = %caller.sub, "write to foreign memory denied");
        return Err(ApiError::NotOwner);
    }
    Ok(())
}
