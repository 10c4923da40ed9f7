//! Client-side application state.
//!
//! Holds what the player surface has loaded: the session list and the
//! current selection. Every selection change bumps a generation counter so
//! an RSVP fetch that finishes after the user moved on can be recognised as
//! stale and dropped.

use courtside_core::session::Session;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StateInner {
    sessions: Vec<Session>,
    current_session_id: Option<String>,
    generation: u64,
}

/// Shared, cheaply cloneable state handle.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    inner: Arc<RwLock<StateInner>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded sessions and selection. Returns the new generation.
    pub async fn replace_sessions(&self, sessions: Vec<Session>, current: Option<String>) -> u64 {
        let mut inner = self.inner.write().await;
        inner.sessions = sessions;
        inner.current_session_id = current;
        inner.generation += 1;
        inner.generation
    }

    /// Changes the selection. Returns the new generation.
    pub async fn select(&self, session_id: Option<String>) -> u64 {
        let mut inner = self.inner.write().await;
        inner.current_session_id = session_id;
        inner.generation += 1;
        inner.generation
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.inner.read().await.sessions.clone()
    }

    pub async fn session(&self, session_id: &str) -> Option<Session> {
        self.inner
            .read()
            .await
            .sessions
            .iter()
            .find(|s| s.session_id == session_id)
            .cloned()
    }

    pub async fn current_session_id(&self) -> Option<String> {
        self.inner.read().await.current_session_id.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Whether `generation` is still the latest.
    pub async fn is_current(&self, generation: u64) -> bool {
        self.generation().await == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_change_bumps_generation() {
        let state = AppState::new();
        assert_eq!(state.generation().await, 0);

        let g1 = state.replace_sessions(Vec::new(), None).await;
        let g2 = state.select(Some("S1".into())).await;
        assert!(g2 > g1);
        assert!(!state.is_current(g1).await);
        assert!(state.is_current(g2).await);
        assert_eq!(state.current_session_id().await.as_deref(), Some("S1"));
    }
}
