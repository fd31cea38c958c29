//! # Growth Journal
//!
//! Single-page growth mindset tracker served over HTTP.
//!
//! This library provides:
//! - A daily checklist with a session-scoped completion streak
//! - A reflection journal appended to a per-identity log and exported as PDF
//! - A fixed six-question quiz, motivational quotes and tips, and a leaderboard
//!
//! ## Modules
//! - `identity`: (name, profession) pairs and the path-safe file key
//! - `progress`: checklist completion and the streak rule
//! - `journal`: reflection validation, the append-only log and document export
//! - `quiz`: questions and scoring
//! - `inspiration`, `leaderboard`: randomized content with an injected RNG
//! - `session`: per-session state held in memory
//! - `api`: axum routes

pub mod api;
pub mod config;
pub mod identity;
pub mod inspiration;
pub mod journal;
pub mod leaderboard;
pub mod progress;
pub mod quiz;
pub mod session;

pub use config::Config;
pub use identity::Identity;
pub use session::{SessionState, SessionStore};
