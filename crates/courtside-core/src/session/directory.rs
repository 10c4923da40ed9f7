//! Session directory selection policy.
//!
//! Decides which sessions are offered to players and which one is selected
//! when the page first loads.

use super::model::Session;
use chrono::NaiveDateTime;

/// Outcome of picking the default session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSession<'a> {
    /// The session to preselect.
    Selected(&'a Session),
    /// No session is currently open. This is a display state, not an error.
    NoOpenSession,
}

impl<'a> DefaultSession<'a> {
    /// The selected session, if any.
    pub fn session(&self) -> Option<&'a Session> {
        match self {
            DefaultSession::Selected(s) => Some(*s),
            DefaultSession::NoOpenSession => None,
        }
    }
}

/// Open sessions ordered by `(date, start)`.
pub fn open_sessions_sorted(sessions: &[Session]) -> Vec<&Session> {
    let mut open: Vec<&Session> = sessions.iter().filter(|s| s.is_open).collect();
    open.sort_by_key(|s| s.sort_key());
    open
}

/// All sessions, open or closed, ordered by `(date, start)`.
pub fn all_sessions_sorted(sessions: &[Session]) -> Vec<&Session> {
    let mut all: Vec<&Session> = sessions.iter().collect();
    all.sort_by_key(|s| s.sort_key());
    all
}

/// Picks the session a player should see first.
///
/// Among open sessions, the earliest one starting at or after `now` wins.
/// When every open session is already in the past, the most recent one is
/// chosen instead so the player still sees something.
pub fn pick_default_session(sessions: &[Session], now: NaiveDateTime) -> DefaultSession<'_> {
    let open = open_sessions_sorted(sessions);
    match open.iter().copied().find(|s| s.starts_at() >= now) {
        Some(upcoming) => DefaultSession::Selected(upcoming),
        None => match open.last().copied() {
            Some(latest) => DefaultSession::Selected(latest),
            None => DefaultSession::NoOpenSession,
        },
    }
}

/// Looks a session up by identifier.
pub fn find<'a>(sessions: &'a [Session], session_id: &str) -> Option<&'a Session> {
    sessions.iter().find(|s| s.session_id == session_id)
}
