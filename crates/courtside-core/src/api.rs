//! Booking service interfaces.
//!
//! The booking service is an external HTTP JSON endpoint. These traits
//! decouple the use cases from the transport so they can be driven by the
//! real client or by in-memory doubles in tests.

use crate::error::Result;
use crate::rsvp::{Placement, RsvpRecord, RsvpSubmission};
use crate::session::{Session, SessionDraft};
use async_trait::async_trait;

/// Public, unauthenticated operations used by players.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Lists open sessions (`action=sessions`).
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// Lists every session including closed ones (`action=sessions_all`).
    async fn list_all_sessions(&self) -> Result<Vec<Session>>;

    /// Lists the raw RSVP rows of a session (`action=list`).
    ///
    /// Rows are not deduplicated; several rows per name are expected.
    async fn list_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>>;

    /// Submits an RSVP (`action=rsvp`).
    ///
    /// # Returns
    ///
    /// - `Ok(Some(placement))`: the service reported where the RSVP landed
    /// - `Ok(None)`: accepted without a placement (e.g. a NO, or an update)
    /// - `Err(_)`: transport failure or `ok: false`
    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<Option<Placement>>;
}

/// Operations that require the operator's admin key.
///
/// Implementations carry the key and send it with every request.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Creates a session and returns its new identifier.
    ///
    /// With `only_open`, the service closes every other session.
    async fn create_session(&self, draft: &SessionDraft, only_open: bool) -> Result<String>;

    /// Overwrites a session's fields.
    async fn update_session(&self, session: &Session) -> Result<()>;

    /// Deletes a session together with its bookings.
    ///
    /// # Returns
    ///
    /// The number of bookings removed, when the service reports it.
    async fn delete_session(&self, session_id: &str) -> Result<Option<u32>>;

    /// Opens `session_id` and closes every other session.
    async fn set_only_open(&self, session_id: &str) -> Result<()>;

    /// Lists the raw RSVP rows of a session, including private notes.
    async fn list_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>>;

    /// Overwrites the current RSVP of `update.name`.
    async fn update_rsvp(&self, update: &RsvpSubmission) -> Result<()>;

    /// Deletes every RSVP row of `name` in a session.
    async fn delete_rsvp(&self, session_id: &str, name: &str) -> Result<()>;

    /// Saves several sessions in one request.
    async fn bulk_update_sessions(&self, sessions: &[Session]) -> Result<()>;
}
