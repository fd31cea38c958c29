//! Reflection journal handlers: save & export, log view, document download.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;

use super::routes::{session_not_found, AppState};
use super::types::*;
use crate::journal::{self, JournalError};

fn journal_error(err: JournalError) -> (StatusCode, String) {
    match &err {
        e if e.is_validation() => {
            tracing::warn!("Rejected reflection: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        JournalError::UnsupportedCharacter { .. } => {
            tracing::warn!("Reflection cannot be exported: {}", err);
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        _ => {
            tracing::error!("Journal failure: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Save the reflection and export the document.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<JournalRequest>,
) -> Result<Json<JournalResponse>, (StatusCode, String)> {
    let (identity, streak) = state
        .sessions
        .with_session(id, |s| (s.identity.clone(), s.cycle()))
        .await
        .ok_or_else(|| session_not_found(id))?;

    let today = chrono::Local::now().date_naive();
    let submission = journal::submit(
        &state.recorder,
        &identity,
        &req.reflection,
        &req.goals,
        today,
    )
    .await
    .map_err(journal_error)?;

    let document_name = submission.document_name.clone();
    state
        .sessions
        .with_session(id, |s| s.exported_document = Some(document_name))
        .await;

    Ok(Json(JournalResponse {
        message: submission.message,
        document_name: submission.document_name,
        download_url: format!("/api/session/{}/journal/pdf", id),
        streak,
    }))
}

/// Raw log text for the session's identity.
pub async fn read_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<String, (StatusCode, String)> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    state
        .recorder
        .read_all(&session.identity)
        .await
        .map_err(journal_error)
}

/// Download the identity's latest document, once this session has exported one.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, (StatusCode, String)> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    let not_exported = || {
        (
            StatusCode::NOT_FOUND,
            "No reflection document has been exported in this session yet".to_string(),
        )
    };
    let filename = session.exported_document.clone().ok_or_else(not_exported)?;
    let bytes = state
        .recorder
        .read_document(&session.identity)
        .await
        .map_err(journal_error)?
        .ok_or_else(not_exported)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename)
            .parse()
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Filename produces an invalid header value: {}", filename),
                )
            })?,
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );

    Ok((headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::identity::Identity;

    fn state(dir: &std::path::Path) -> Arc<AppState> {
        Arc::new(AppState::new(Config::new(dir.to_path_buf())))
    }

    async fn start(state: &Arc<AppState>) -> Uuid {
        let identity = Identity::new("Sara", "Dev").unwrap();
        state.sessions.create(identity).await.id
    }

    fn request(reflection: &str, goals: &str) -> Json<JournalRequest> {
        Json(JournalRequest {
            reflection: reflection.to_string(),
            goals: goals.to_string(),
        })
    }

    #[tokio::test]
    async fn empty_goals_is_bad_request_and_writes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let state = state(temp.path());
        let id = start(&state).await;

        let err = save(State(Arc::clone(&state)), Path(id), request("Learned X", ""))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);

        let err = download(State(state), Path(id)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_character_is_unprocessable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let state = state(temp.path());
        let id = start(&state).await;

        let err = save(State(state), Path(id), request("Learned \u{2603}", "Practice Y"))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn save_then_download_and_read_log() {
        let temp = tempfile::tempdir().expect("tempdir");
        let state = state(temp.path());
        let id = start(&state).await;

        let Json(saved) = save(
            State(Arc::clone(&state)),
            Path(id),
            request("Learned X", "Practice Y"),
        )
        .await
        .expect("save");
        assert_eq!(saved.document_name, "Sara_Dev_Reflection.pdf");
        assert_eq!(saved.download_url, format!("/api/session/{}/journal/pdf", id));

        let log = read_log(State(Arc::clone(&state)), Path(id)).await.unwrap();
        assert!(log.contains("Dev: Learned X\nGoals for Tomorrow: Practice Y\n---\n"));

        let response = download(State(state), Path(id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("application/pdf")
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Sara_Dev_Reflection.pdf\""
        );
    }

    #[tokio::test]
    async fn download_needs_an_export_from_the_same_session() {
        let temp = tempfile::tempdir().expect("tempdir");
        let state = state(temp.path());
        let first = start(&state).await;
        save(
            State(Arc::clone(&state)),
            Path(first),
            request("Learned X", "Practice Y"),
        )
        .await
        .expect("save");

        let second = start(&state).await;
        assert!(temp.path().join("Sara_Dev_Reflection.pdf").exists());
        let err = download(State(Arc::clone(&state)), Path(second))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        let session = state.sessions.get(first).await.unwrap();
        assert_eq!(
            session.exported_document.as_deref(),
            Some("Sara_Dev_Reflection.pdf")
        );
        let response = download(State(state), Path(first)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
