//! In-memory doubles of the booking service for use case tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use courtside_core::api::{AdminApi, BookingApi};
use courtside_core::rsvp::{AttendanceStatus, Placement, RsvpRecord, RsvpSubmission};
use courtside_core::session::{Session, SessionDraft};
use courtside_core::{CourtsideError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

pub type Hook = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

pub fn session(id: &str, date: &str, is_open: bool) -> Session {
    Session {
        session_id: id.to_string(),
        title: "YR Badminton".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        start: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        venue: "Goodminton".to_string(),
        capacity: 20,
        note: String::new(),
        is_open,
    }
}

/// A row submitted `minute` minutes after a fixed instant.
pub fn record(name: &str, status: AttendanceStatus, pax: u32, minute: i64) -> RsvpRecord {
    RsvpRecord {
        name: name.to_string(),
        status,
        pax,
        note: String::new(),
        timestamp: Utc.timestamp_opt(1_740_000_000 + minute * 60, 0).unwrap(),
        session_id: String::new(),
    }
}

#[derive(Default)]
pub struct MockBooking {
    open: Mutex<Vec<Session>>,
    all: Mutex<Option<Vec<Session>>>,
    rsvps: Mutex<HashMap<String, Vec<RsvpRecord>>>,
    placement: Mutex<Option<Placement>>,
    submit_error: Mutex<Option<String>>,
    submissions: Mutex<Vec<RsvpSubmission>>,
    list_hook: Mutex<Option<Hook>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockBooking {
    /// Serves `sessions` for both `sessions` and `sessions_all`; the public
    /// listing only returns the open ones.
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        let mock = Self::default();
        *mock.open.lock().unwrap() = sessions.iter().filter(|s| s.is_open).cloned().collect();
        *mock.all.lock().unwrap() = Some(sessions);
        mock
    }

    /// Makes `sessions_all` fail.
    pub fn without_sessions_all(self) -> Self {
        *self.all.lock().unwrap() = None;
        self
    }

    pub fn set_rsvps(&self, session_id: &str, rows: Vec<RsvpRecord>) {
        self.rsvps.lock().unwrap().insert(session_id.to_string(), rows);
    }

    pub fn set_placement(&self, placement: Option<Placement>) {
        *self.placement.lock().unwrap() = placement;
    }

    pub fn fail_submit(&self, message: &str) {
        *self.submit_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn on_list_rsvps<F>(&self, hook: F)
    where
        F: Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static,
    {
        *self.list_hook.lock().unwrap() = Some(Arc::new(hook));
    }

    pub fn submissions(&self) -> Vec<RsvpSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for MockBooking {
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.calls.lock().unwrap().push("sessions");
        Ok(self.open.lock().unwrap().clone())
    }

    async fn list_all_sessions(&self) -> Result<Vec<Session>> {
        self.calls.lock().unwrap().push("sessions_all");
        self.all
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CourtsideError::backend(Some("unknown action".into()), "load sessions failed"))
    }

    async fn list_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>> {
        self.calls.lock().unwrap().push("list");
        let hook = self.list_hook.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook().await;
        }
        Ok(self
            .rsvps
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<Option<Placement>> {
        self.calls.lock().unwrap().push("rsvp");
        if let Some(message) = self.submit_error.lock().unwrap().clone() {
            return Err(CourtsideError::backend(Some(message), "submit failed"));
        }
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(*self.placement.lock().unwrap())
    }
}

#[derive(Default)]
pub struct MockAdmin {
    pub created: Mutex<Vec<(SessionDraft, bool)>>,
    pub updated: Mutex<Vec<Session>>,
    pub deleted: Mutex<Vec<String>>,
    pub only_open: Mutex<Vec<String>>,
    pub bulk: Mutex<Vec<Vec<Session>>>,
    pub rsvp_updates: Mutex<Vec<RsvpSubmission>>,
    pub rsvp_deletes: Mutex<Vec<(String, String)>>,
    rsvps: Mutex<HashMap<String, Vec<RsvpRecord>>>,
    list_fails: Mutex<bool>,
    deleted_bookings: Mutex<Option<u32>>,
}

impl MockAdmin {
    pub fn set_rsvps(&self, session_id: &str, rows: Vec<RsvpRecord>) {
        self.rsvps.lock().unwrap().insert(session_id.to_string(), rows);
    }

    pub fn fail_list_rsvps(&self) {
        *self.list_fails.lock().unwrap() = true;
    }

    pub fn set_deleted_bookings(&self, count: Option<u32>) {
        *self.deleted_bookings.lock().unwrap() = count;
    }

    pub fn request_count(&self) -> usize {
        self.created.lock().unwrap().len()
            + self.updated.lock().unwrap().len()
            + self.deleted.lock().unwrap().len()
            + self.only_open.lock().unwrap().len()
            + self.bulk.lock().unwrap().len()
            + self.rsvp_updates.lock().unwrap().len()
            + self.rsvp_deletes.lock().unwrap().len()
    }
}

#[async_trait]
impl AdminApi for MockAdmin {
    async fn create_session(&self, draft: &SessionDraft, only_open: bool) -> Result<String> {
        let mut created = self.created.lock().unwrap();
        created.push((draft.clone(), only_open));
        Ok(format!("NEW{}", created.len()))
    }

    async fn update_session(&self, session: &Session) -> Result<()> {
        self.updated.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<Option<u32>> {
        self.deleted.lock().unwrap().push(session_id.to_string());
        Ok(*self.deleted_bookings.lock().unwrap())
    }

    async fn set_only_open(&self, session_id: &str) -> Result<()> {
        self.only_open.lock().unwrap().push(session_id.to_string());
        Ok(())
    }

    async fn list_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>> {
        if *self.list_fails.lock().unwrap() {
            return Err(CourtsideError::post_failed("HTTP 500"));
        }
        Ok(self
            .rsvps
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_rsvp(&self, update: &RsvpSubmission) -> Result<()> {
        self.rsvp_updates.lock().unwrap().push(update.clone());
        Ok(())
    }

    async fn delete_rsvp(&self, session_id: &str, name: &str) -> Result<()> {
        self.rsvp_deletes
            .lock()
            .unwrap()
            .push((session_id.to_string(), name.to_string()));
        Ok(())
    }

    async fn bulk_update_sessions(&self, sessions: &[Session]) -> Result<()> {
        self.bulk.lock().unwrap().push(sessions.to_vec());
        Ok(())
    }
}
