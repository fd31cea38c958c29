//! Per-session state and the in-memory session store.
//!
//! Every mutating interaction on a session is one render cycle: the streak
//! rule is applied against the checklist as it stands after the interaction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::identity::Identity;
use crate::progress::{Checklist, Progress, ProgressSnapshot};
use crate::quiz::{self, QuizResult, QUESTION_COUNT};

/// Visual mode; has no effect on anything but styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: Uuid,
    pub identity: Identity,
    pub progress: Progress,
    pub quiz_answers: Vec<Option<String>>,
    pub theme: Theme,
    /// Document name of this session's last successful export.
    pub exported_document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl SessionState {
    pub fn new(identity: Identity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            identity,
            progress: Progress::default(),
            quiz_answers: vec![None; QUESTION_COUNT],
            theme: Theme::default(),
            exported_document: None,
            created_at: now,
            last_active: now,
        }
    }

    /// Run one interaction cycle and return the resulting streak.
    pub fn cycle(&mut self) -> u32 {
        self.progress.advance()
    }

    /// Replace the checkbox states, then run the cycle.
    pub fn update_checklist(&mut self, checklist: Checklist) -> ProgressSnapshot {
        self.progress.checklist = checklist;
        self.cycle();
        self.progress.snapshot()
    }

    /// Replace the selected options, then run the cycle.
    pub fn update_answers(&mut self, answers: Vec<Option<String>>) -> QuizResult {
        self.quiz_answers = answers;
        self.quiz_answers.resize(QUESTION_COUNT, None);
        self.cycle();
        quiz::evaluate(&self.quiz_answers)
    }

    pub fn quiz_result(&self) -> QuizResult {
        quiz::evaluate(&self.quiz_answers)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            name: self.identity.name.clone(),
            profession: self.identity.profession.clone(),
            greeting: format!(
                "Welcome {} to Your Growth Mindset Challenge!",
                self.identity.display()
            ),
            theme: self.theme,
            progress: self.progress.snapshot(),
            quiz_answers: self.quiz_answers.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub name: String,
    pub profession: String,
    pub greeting: String,
    pub theme: Theme,
    pub progress: ProgressSnapshot,
    pub quiz_answers: Vec<Option<String>>,
    pub created_at: DateTime<Utc>,
}

/// Sessions live only as long as the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, identity: Identity) -> SessionState {
        let session = SessionState::new(identity);
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        tracing::info!(
            "Created session {} for {}",
            session.id,
            session.identity.display()
        );
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Apply `f` to the session under the write lock and mark it active.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(|session| {
            session.last_active = Utc::now();
            f(session)
        })
    }

    /// Drop sessions with no interaction for longer than `max_idle`.
    pub async fn evict_idle(&self, max_idle: chrono::Duration) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(max_idle) else {
            return 0;
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active >= cutoff);
        before - sessions.len()
    }

    /// Periodically evict idle sessions for as long as the process runs.
    pub fn start_cleanup_task(self: Arc<Self>, max_idle: chrono::Duration, interval: Duration) {
        tokio::spawn(async move {
            tracing::info!(
                "Starting idle session cleanup (idle timeout {}s)",
                max_idle.num_seconds()
            );
            loop {
                tokio::time::sleep(interval).await;
                let evicted = self.evict_idle(max_idle).await;
                if evicted > 0 {
                    tracing::info!("Evicted {} idle session(s)", evicted);
                }
            }
        });
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!("Ended session {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

pub type SharedSessionStore = Arc<SessionStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::TASK_COUNT;

    fn identity() -> Identity {
        Identity::new("Sara", "Dev").unwrap()
    }

    #[test]
    fn any_interaction_advances_the_streak() {
        let mut session = SessionState::new(identity());
        let snap = session.update_checklist(Checklist::new([true; TASK_COUNT]));
        assert_eq!(snap.streak, 1);
        assert_eq!(snap.percentage, 100);

        session.update_answers(vec![Some("Learn from it".to_string())]);
        assert_eq!(session.progress.streak, 2);

        let snap = session.update_checklist(Checklist::from_states(&[true; 7]));
        assert_eq!(snap.streak, 0);
        assert_eq!(snap.percentage, 87);
    }

    #[test]
    fn answers_are_padded_to_question_count() {
        let mut session = SessionState::new(identity());
        let result = session.update_answers(vec![Some("Learn from it".to_string())]);
        assert_eq!(session.quiz_answers.len(), QUESTION_COUNT);
        assert_eq!(result.score, 1);
        assert_eq!(session.quiz_result().score, 1);
    }

    #[tokio::test]
    async fn store_round_trip() {
        let store = SessionStore::new();
        let session = store.create(identity()).await;
        assert_eq!(store.len().await, 1);

        let streak = store
            .with_session(session.id, |s| {
                s.update_checklist(Checklist::new([true; TASK_COUNT]));
                s.progress.streak
            })
            .await;
        assert_eq!(streak, Some(1));
        assert_eq!(store.get(session.id).await.unwrap().progress.streak, 1);

        assert!(store.remove(session.id).await);
        assert!(!store.remove(session.id).await);
        assert!(store.with_session(session.id, |s| s.cycle()).await.is_none());
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let store = SessionStore::new();
        let stale = store.create(identity()).await;
        let fresh = store.create(identity()).await;

        store
            .with_session(stale.id, |s| {
                s.last_active = Utc::now() - chrono::Duration::hours(2);
            })
            .await;
        // Touching a session refreshes it before `f` runs.
        let touched = store.with_session(fresh.id, |s| s.last_active).await.unwrap();
        assert!(Utc::now() - touched < chrono::Duration::seconds(5));

        assert_eq!(store.evict_idle(chrono::Duration::hours(1)).await, 1);
        assert!(store.get(stale.id).await.is_none());
        assert!(store.get(fresh.id).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn cleanup_task_evicts_in_background() {
        let store = Arc::new(SessionStore::new());
        let session = store.create(identity()).await;
        store
            .with_session(session.id, |s| {
                s.last_active = Utc::now() - chrono::Duration::hours(2);
            })
            .await;

        Arc::clone(&store).start_cleanup_task(chrono::Duration::hours(1), Duration::from_millis(10));
        for _ in 0..100 {
            if store.len().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.len().await, 0);
    }
}
