//! Player RSVP use case.
//!
//! Each user action is a sequential fetch-then-render cycle: load the open
//! sessions, pick one, fetch its RSVP rows, allocate seats locally.

use crate::nudge::{MAYBE_NOT_SUBMITTED, NudgeRotation};
use crate::state::AppState;
use chrono::NaiveDateTime;
use courtside_core::api::BookingApi;
use courtside_core::config::ClientConfig;
use courtside_core::rsvp::{
    Allocation, AllocationRules, AttendanceSummary, Placement, RsvpChoice, RsvpSubmission, allocate,
};
use courtside_core::session::{DefaultSession, Session, open_sessions_sorted, pick_default_session};
use courtside_core::{CourtsideError, Result};
use std::sync::Arc;

pub const MSG_SELECT_SESSION: &str = "請先選擇場次 / Please select a session.";
pub const MSG_ENTER_NAME: &str = "請輸入姓名 / Please enter your name.";
pub const MSG_SELECT_STATUS: &str = "請選擇狀態 / Please select a status.";
pub const MSG_NO_OPEN_SESSIONS: &str = "暫時無開放場次 / No open sessions";

/// Open sessions in display order, plus the preselected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub open_sessions: Vec<Session>,
    pub default_session_id: Option<String>,
}

impl DirectoryView {
    pub fn has_open_session(&self) -> bool {
        self.default_session_id.is_some()
    }

    pub fn default_session(&self) -> Option<&Session> {
        let id = self.default_session_id.as_deref()?;
        self.open_sessions.iter().find(|s| s.session_id == id)
    }
}

/// Allocated attendance of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceView {
    pub session: Session,
    pub allocation: Allocation,
    pub summary: AttendanceSummary,
}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    pub session_id: Option<String>,
    pub name: String,
    pub choice: Option<RsvpChoice>,
    pub pax: Option<u32>,
    pub note: String,
}

/// Result of a submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// MAYBE was picked; nothing was sent.
    Nudge { nudge: String, notice: &'static str },
    /// The booking service accepted the RSVP.
    Submitted {
        placement: Option<Placement>,
        message: &'static str,
        /// Refreshed attendance; `None` if the refresh failed or went stale.
        attendance: Option<AttendanceView>,
    },
}

/// Message shown for the placement the service reported.
pub fn placement_message(placement: Option<Placement>) -> &'static str {
    match placement {
        Some(Placement::Confirmed) => "你已成功報名出席 / Successfully registered.",
        Some(Placement::Waitlist) => "你已進入候補名單 / You are on the waitlist.",
        Some(Placement::Overflow) => "已記錄，但已超出候補上限 / Recorded but overflowed waitlist.",
        None => "已更新 / Updated.",
    }
}

/// Use case behind the public player surface.
pub struct RsvpUseCase {
    api: Arc<dyn BookingApi>,
    state: AppState,
    config: ClientConfig,
    nudges: NudgeRotation,
}

impl RsvpUseCase {
    pub fn new(api: Arc<dyn BookingApi>, config: ClientConfig) -> Self {
        Self::with_state(api, config, AppState::new())
    }

    pub fn with_state(api: Arc<dyn BookingApi>, config: ClientConfig, state: AppState) -> Self {
        Self {
            api,
            state,
            config,
            nudges: NudgeRotation::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn rules_for(&self, session: &Session) -> AllocationRules {
        AllocationRules::new(session.capacity)
            .with_waitlist_limit(self.config.waitlist_limit)
            .with_capacity_zero(self.config.capacity_zero)
    }

    /// Fetches the open sessions and preselects the closest upcoming one.
    pub async fn load_sessions(&self, now: NaiveDateTime) -> Result<DirectoryView> {
        let sessions = self.api.list_sessions().await?;

        let open_sessions: Vec<Session> = open_sessions_sorted(&sessions).into_iter().cloned().collect();
        let default_session_id = match pick_default_session(&sessions, now) {
            DefaultSession::Selected(session) => Some(session.session_id.clone()),
            DefaultSession::NoOpenSession => None,
        };
        tracing::debug!(
            total = sessions.len(),
            open = open_sessions.len(),
            default = ?default_session_id,
            "sessions loaded"
        );

        self.state
            .replace_sessions(sessions, default_session_id.clone())
            .await;
        Ok(DirectoryView {
            open_sessions,
            default_session_id,
        })
    }

    /// Makes `session_id` current. Returns the new generation.
    pub async fn select_session(&self, session_id: &str) -> Result<u64> {
        if self.state.session(session_id).await.is_none() {
            return Err(CourtsideError::not_found("Session", session_id));
        }
        Ok(self.state.select(Some(session_id.to_string())).await)
    }

    /// Fetches and allocates the RSVPs of a loaded session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(view))`: the allocation, still matching the current selection
    /// - `Ok(None)`: the selection changed while fetching; the result was dropped
    pub async fn attendance(&self, session_id: &str) -> Result<Option<AttendanceView>> {
        let generation = self.state.generation().await;
        let session = self
            .state
            .session(session_id)
            .await
            .ok_or_else(|| CourtsideError::not_found("Session", session_id))?;

        let rows = self.api.list_rsvps(session_id).await?;
        let rules = self.rules_for(&session);
        let allocation = allocate(&rows, &rules);
        let summary = AttendanceSummary::new(&allocation, &rules);

        if !self.state.is_current(generation).await {
            tracing::debug!(session_id, generation, "dropping stale attendance");
            return Ok(None);
        }

        tracing::debug!(
            session_id,
            rows = rows.len(),
            confirmed_pax = allocation.totals.confirmed_pax,
            waitlist_pax = allocation.totals.waitlist_pax,
            "attendance allocated"
        );
        Ok(Some(AttendanceView {
            session,
            allocation,
            summary,
        }))
    }

    /// Validates and submits the form.
    ///
    /// MAYBE never reaches the booking service. After a successful submit the
    /// session becomes current and its attendance is refreshed.
    pub async fn submit(&self, form: RsvpForm) -> Result<SubmitOutcome> {
        let session_id = form
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CourtsideError::validation(MSG_SELECT_SESSION))?;
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(CourtsideError::validation(MSG_ENTER_NAME));
        }
        let choice = form
            .choice
            .ok_or_else(|| CourtsideError::validation(MSG_SELECT_STATUS))?;

        let Some(status) = choice.to_status() else {
            return Ok(SubmitOutcome::Nudge {
                nudge: self.nudges.next_line(),
                notice: MAYBE_NOT_SUBMITTED,
            });
        };

        let submission = RsvpSubmission {
            session_id: session_id.clone(),
            name,
            status,
            pax: form.pax.unwrap_or(1).max(1),
            note: form.note.trim().to_string(),
        };
        let placement = self.api.submit_rsvp(&submission).await?;

        self.state.select(Some(session_id.clone())).await;
        let attendance = match self.attendance(&session_id).await {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "attendance refresh after submit failed");
                None
            }
        };

        Ok(SubmitOutcome::Submitted {
            placement,
            message: placement_message(placement),
            attendance,
        })
    }
}
