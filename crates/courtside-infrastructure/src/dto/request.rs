//! Request bodies for `POST`.
//!
//! Every body carries an `action`; admin bodies also carry `adminKey`.

use super::session::{SessionFieldsWire, SessionWire};
use courtside_core::rsvp::{AttendanceStatus, RsvpSubmission};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<'a, P: Serialize> {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<&'a str>,
    #[serde(flatten)]
    pub payload: P,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload<'a> {
    pub session_id: &'a str,
    pub name: &'a str,
    pub status: AttendanceStatus,
    pub pax: u32,
    pub note: &'a str,
}

impl<'a> From<&'a RsvpSubmission> for RsvpPayload<'a> {
    fn from(submission: &'a RsvpSubmission) -> Self {
        Self {
            session_id: &submission.session_id,
            name: submission.name.trim(),
            status: submission.status,
            pax: submission.pax.max(1),
            note: &submission.note,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionPayload {
    #[serde(flatten)]
    pub fields: SessionFieldsWire,
    pub only_open: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateSessionPayload {
    pub session: SessionWire,
}

#[derive(Debug, Serialize)]
pub struct BulkSessionsPayload {
    pub sessions: Vec<SessionWire>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdPayload<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRsvpPayload<'a> {
    pub session_id: &'a str,
    pub name: &'a str,
}
