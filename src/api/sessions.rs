//! Session, checklist, quiz and leaderboard handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::routes::{session_not_found, AppState};
use super::types::*;
use crate::identity::Identity;
use crate::inspiration;
use crate::leaderboard::Leaderboard;
use crate::progress::{Checklist, ProgressSnapshot};
use crate::quiz::QuizResult;
use crate::session::SessionSnapshot;

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    let identity = Identity::new(&req.name, &req.profession)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let session = state.sessions.create(identity).await;
    Ok(Json(session.snapshot()))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    state
        .sessions
        .get(id)
        .await
        .map(|s| Json(s.snapshot()))
        .ok_or_else(|| session_not_found(id))
}

pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    state
        .sessions
        .with_session(id, |s| {
            s.theme = req.mode;
            s.cycle();
            s.snapshot()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

pub async fn quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TextResponse>, (StatusCode, String)> {
    let streak = state
        .sessions
        .with_session(id, |s| s.cycle())
        .await
        .ok_or_else(|| session_not_found(id))?;
    let text = inspiration::random_quote(&mut *state.rng.lock().await);
    Ok(Json(TextResponse {
        text: text.to_string(),
        streak,
    }))
}

pub async fn tip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TextResponse>, (StatusCode, String)> {
    let streak = state
        .sessions
        .with_session(id, |s| s.cycle())
        .await
        .ok_or_else(|| session_not_found(id))?;
    let text = inspiration::random_tip(&mut *state.rng.lock().await);
    Ok(Json(TextResponse {
        text: text.to_string(),
        streak,
    }))
}

pub async fn update_checklist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChecklistRequest>,
) -> Result<Json<ProgressSnapshot>, (StatusCode, String)> {
    let checklist = match req.indices {
        Some(indices) => Checklist::from_indices(&indices).map_err(|idx| {
            (
                StatusCode::BAD_REQUEST,
                format!("No checklist task at index {}", idx),
            )
        })?,
        None => Checklist::from_states(&req.checked),
    };
    state
        .sessions
        .with_session(id, |s| s.update_checklist(checklist))
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

pub async fn answer_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuizRequest>,
) -> Result<Json<QuizResult>, (StatusCode, String)> {
    state
        .sessions
        .with_session(id, |s| s.update_answers(req.answers))
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

pub async fn finalize_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalScoreResponse>, (StatusCode, String)> {
    state
        .sessions
        .with_session(id, |s| {
            let streak = s.cycle();
            let result = s.quiz_result();
            FinalScoreResponse {
                message: result.final_message(&s.identity),
                score: result.score,
                total: result.total,
                streak,
            }
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// Regenerated on every request, so the user's score changes each time.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Leaderboard>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    let board = Leaderboard::generate(&session.identity.name, &mut *state.rng.lock().await);
    Ok(Json(board))
}
