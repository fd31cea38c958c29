//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::quiz::Question;
use crate::session::Theme;

/// Request to start a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub profession: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeRequest {
    pub mode: Theme,
}

/// Checkbox states in display order; missing entries are unchecked.
/// `indices`, when given, lists checked tasks instead and takes precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistRequest {
    #[serde(default)]
    pub checked: Vec<bool>,
    #[serde(default)]
    pub indices: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalRequest {
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub goals: String,
}

/// Selected option per question; `null` or a missing entry means unanswered.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub answers: Vec<Option<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
}

/// Static page content.
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub checklist: Vec<&'static str>,
    pub questions: Vec<Question>,
    pub video_url: &'static str,
    pub footer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextResponse {
    pub text: String,
    /// Streak after this interaction.
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalResponse {
    pub message: String,
    pub document_name: String,
    pub download_url: String,
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalScoreResponse {
    pub message: String,
    pub score: usize,
    pub total: usize,
    pub streak: u32,
}
