use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    improver::{ImproveError, ImproveRequest},
    prompts::{
        dto::{HistoryQuery, ImprovePromptRequest, PromptStats, StatsQuery},
        services::{build_saved_prompt, quality_stats, search_prompts},
    },
    state::AppState,
    store::SavedPrompt,
};

// --- public routers ---

pub fn prompt_routes() -> Router<AppState> {
    Router::new()
        .route("/prompts/improve", post(improve_prompt))
        .route("/prompts", get(list_history))
        .route("/prompts/stats", get(get_stats))
        .route("/prompts/:id", delete(delete_prompt))
}

// --- handlers ---

#[instrument(skip(state, payload))]
pub async fn improve_prompt(
    State(state): State<AppState>,
    Json(payload): Json<ImprovePromptRequest>,
) -> Result<(StatusCode, Json<SavedPrompt>), (StatusCode, String)> {
    if payload.prompt.trim().is_empty() {
        warn!(user_id = %payload.user_id, "blank prompt");
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter a prompt first.".into(),
        ));
    }

    let request = ImproveRequest {
        original_prompt: payload.prompt,
        category: payload.category,
        tone: payload.tone,
        platform: payload.platform,
        length: payload.length,
    };

    let improved = match state.improver.improve(&request).await {
        Ok(i) => i,
        Err(e) => {
            error!(error = %e, user_id = %payload.user_id, "improvement failed");
            return Err((improve_status(&e), e.to_string()));
        }
    };

    // Guest results are returned but never persisted; the store no-ops.
    let saved = build_saved_prompt(&payload.user_id, &request, improved);
    state.store.save_prompt(&saved).await.map_err(internal)?;

    info!(prompt_id = %saved.id, user_id = %saved.user_id, "prompt improved");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SavedPrompt>>, (StatusCode, String)> {
    let prompts = state
        .store
        .list_prompts_for_user(&query.user_id)
        .await
        .map_err(internal)?;
    Ok(Json(search_prompts(prompts, &query.q)))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<PromptStats>, (StatusCode, String)> {
    let prompts = state
        .store
        .list_prompts_for_user(&query.user_id)
        .await
        .map_err(internal)?;
    Ok(Json(quality_stats(&prompts)))
}

#[instrument(skip(state))]
pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.delete_prompt(&id).await.map_err(internal)?;
    info!(prompt_id = %id, "prompt deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn improve_status(error: &ImproveError) -> StatusCode {
    match error {
        ImproveError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ImproveError::Transport(_) | ImproveError::EmptyResponse | ImproveError::Reply(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
