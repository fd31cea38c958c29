//! HTTP API for the growth journal.
//!
//! ## Endpoints
//!
//! - `GET /` - Embedded single-page form
//! - `GET /api/health` - Health check
//! - `GET /api/content` - Checklist labels, quiz questions, video link, footer
//! - `POST /api/session` - Start a session for a (name, profession) identity
//! - `GET /api/session/:id` - Session snapshot
//! - `DELETE /api/session/:id` - End a session
//! - `POST /api/session/:id/theme` - Switch light/dark mode
//! - `POST /api/session/:id/quote` - Random motivational quote
//! - `POST /api/session/:id/tip` - Random growth tip
//! - `POST /api/session/:id/checklist` - Submit checkbox states
//! - `POST /api/session/:id/journal` - Save reflection and export the document
//! - `GET /api/session/:id/journal` - Raw reflection log
//! - `GET /api/session/:id/journal/pdf` - Download the exported document
//! - `POST /api/session/:id/quiz` - Submit quiz answers
//! - `POST /api/session/:id/quiz/finalize` - Final quiz score
//! - `GET /api/session/:id/leaderboard` - Leaderboard with a fresh user score

mod journal;
mod routes;
mod sessions;
pub mod types;

pub use routes::{build_router, serve, AppState};
pub use types::*;
