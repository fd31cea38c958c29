//! HTTP route wiring and shared state.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::inspiration::{FOOTER, VIDEO_URL};
use crate::journal::Recorder;
use crate::progress::CHECKLIST;
use crate::quiz::QUESTIONS;
use crate::session::{SessionStore, SharedSessionStore};

use super::journal;
use super::sessions;
use super::types::*;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sessions: SharedSessionStore,
    /// Reflection logs and exported documents
    pub recorder: Recorder,
    /// Randomness for quotes, tips and leaderboard scores
    pub rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            recorder: Recorder::new(config.journal_dir.clone()),
            sessions: Arc::new(SessionStore::new()),
            rng: Mutex::new(rng),
            config,
        }
    }
}

pub(super) fn session_not_found(id: Uuid) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Session {} not found", id))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let session_routes = Router::new()
        .route("/api/session", post(sessions::create_session))
        .route(
            "/api/session/:id",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route("/api/session/:id/theme", post(sessions::set_theme))
        .route("/api/session/:id/quote", post(sessions::quote))
        .route("/api/session/:id/tip", post(sessions::tip))
        .route("/api/session/:id/checklist", post(sessions::update_checklist))
        .route("/api/session/:id/quiz", post(sessions::answer_quiz))
        .route("/api/session/:id/quiz/finalize", post(sessions::finalize_quiz))
        .route("/api/session/:id/leaderboard", get(sessions::leaderboard))
        .route(
            "/api/session/:id/journal",
            post(journal::save).get(journal::read_log),
        )
        .route("/api/session/:id/journal/pdf", get(journal::download));

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/content", get(content))
        .merge(session_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.journal_dir).await?;
    tracing::info!("Journal directory: {}", config.journal_dir.display());

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let max_idle = chrono::Duration::from_std(std::time::Duration::from_secs(
        state.config.session_idle_timeout_secs,
    ))?;
    Arc::clone(&state.sessions).start_cleanup_task(
        max_idle,
        std::time::Duration::from_secs(state.config.session_sweep_interval_secs),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, sessions will be discarded");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.len().await,
    })
}

async fn content() -> Json<ContentResponse> {
    Json(ContentResponse {
        checklist: CHECKLIST.to_vec(),
        questions: QUESTIONS.to_vec(),
        video_url: VIDEO_URL,
        footer: FOOTER,
    })
}
