//! HTTP client for the booking service.
//!
//! The service is a single URL dispatching on an `action` parameter. Reads
//! are `GET ?action=...`; writes are `POST` with a JSON body sent as
//! `text/plain` so browsers never issue a CORS preflight, which the
//! deployment does not answer.

use crate::dto::envelope::error_text;
use crate::dto::request::{
    BulkSessionsPayload, CreateSessionPayload, DeleteRsvpPayload, Request, RsvpPayload,
    SessionIdPayload, UpdateSessionPayload,
};
use crate::dto::{Envelope, SessionFieldsWire, SessionWire, placement_from, rsvps_from_rows, sessions_from_rows};
use async_trait::async_trait;
use courtside_core::api::{AdminApi, BookingApi};
use courtside_core::config::ClientConfig;
use courtside_core::rsvp::{Placement, RsvpRecord, RsvpSubmission};
use courtside_core::session::{Session, SessionDraft};
use courtside_core::{CourtsideError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

const POST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";
const RSVP_LIST_KEYS: &[&str] = &["rsvps", "current", "rows"];

/// Public client for the booking service.
#[derive(Debug, Clone)]
pub struct HttpBookingClient {
    client: Client,
    base_url: String,
}

impl HttpBookingClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().to_string();
        if base_url.is_empty() {
            return Err(CourtsideError::config(
                "api_base is not set (use --api-base, COURTSIDE_API_BASE or config.toml)",
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CourtsideError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Builds the public client from `api_base`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, params: &[(&str, &str)], default_error: &str) -> Result<Envelope> {
        tracing::debug!(url = %self.base_url, ?params, "GET");
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| CourtsideError::get_failed(e.to_string()))?;

        read_envelope(response, "GET", default_error).await
    }

    async fn post<P: Serialize>(&self, body: &Request<'_, P>, default_error: &str) -> Result<Envelope> {
        tracing::debug!(url = %self.base_url, action = body.action, "POST");
        let payload = serde_json::to_string(body)?;
        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, POST_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| CourtsideError::post_failed(e.to_string()))?;

        read_envelope(response, "POST", default_error).await
    }
}

async fn read_envelope(response: Response, method: &'static str, default_error: &str) -> Result<Envelope> {
    let status = response.status();
    let text = response.text().await.map_err(|e| CourtsideError::Transport {
        method,
        message: format!("failed to read response body: {e}"),
    })?;

    if !status.is_success() {
        return Err(map_http_error(method, status, &text));
    }

    Envelope::parse(&text, default_error)
}

fn map_http_error(method: &'static str, status: StatusCode, body: &str) -> CourtsideError {
    let message = match error_text(body) {
        Some(error) => format!("HTTP {}: {error}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    };
    tracing::warn!(method, status = status.as_u16(), "booking service returned an error status");
    CourtsideError::Transport { method, message }
}

#[async_trait]
impl BookingApi for HttpBookingClient {
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let envelope = self
            .get(&[("action", "sessions")], "load sessions failed")
            .await?;
        Ok(sessions_from_rows(envelope.first_array(&["sessions"])))
    }

    async fn list_all_sessions(&self) -> Result<Vec<Session>> {
        let envelope = self
            .get(&[("action", "sessions_all")], "load sessions failed")
            .await?;
        Ok(sessions_from_rows(envelope.first_array(&["sessions"])))
    }

    async fn list_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>> {
        let envelope = self
            .get(&[("action", "list"), ("sessionId", session_id)], "load rsvps failed")
            .await?;
        Ok(rsvps_from_rows(envelope.first_array(RSVP_LIST_KEYS), session_id))
    }

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<Option<Placement>> {
        let body = Request {
            action: "rsvp",
            admin_key: None,
            payload: RsvpPayload::from(submission),
        };
        let envelope = self.post(&body, "提交失敗 / Submit failed.").await?;
        let placement = placement_from(envelope.get("placement"));
        tracing::info!(session_id = %submission.session_id, ?placement, "rsvp submitted");
        Ok(placement)
    }
}

/// Admin client. Sends the admin key with every request.
#[derive(Clone)]
pub struct HttpAdminClient {
    http: HttpBookingClient,
    admin_key: String,
}

impl fmt::Debug for HttpAdminClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAdminClient")
            .field("http", &self.http)
            .field("admin_key", &"<redacted>")
            .finish()
    }
}

impl HttpAdminClient {
    pub fn new(http: HttpBookingClient, admin_key: impl Into<String>) -> Self {
        Self {
            http,
            admin_key: admin_key.into().trim().to_string(),
        }
    }

    /// Builds the admin client against `admin_api_base`, or `api_base`.
    pub fn from_config(config: &ClientConfig, admin_key: impl Into<String>) -> Result<Self> {
        let http = HttpBookingClient::new(
            config.admin_endpoint(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(http, admin_key))
    }

    fn request<P: Serialize>(&self, action: &'static str, payload: P) -> Request<'_, P> {
        Request {
            action,
            admin_key: Some(&self.admin_key),
            payload,
        }
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn create_session(&self, draft: &SessionDraft, only_open: bool) -> Result<String> {
        let body = self.request(
            "admin_createSession",
            CreateSessionPayload {
                fields: SessionFieldsWire::from(draft),
                only_open,
            },
        );
        let envelope = self.http.post(&body, "create failed").await?;
        let session_id = envelope
            .text("sessionId")
            .ok_or_else(|| CourtsideError::malformed("create response without sessionId"))?;
        tracing::info!(%session_id, date = %draft.date, "session created");
        Ok(session_id)
    }

    async fn update_session(&self, session: &Session) -> Result<()> {
        let body = self.request(
            "admin_updateSession",
            UpdateSessionPayload {
                session: SessionWire::from(session),
            },
        );
        self.http.post(&body, "save failed").await?;
        tracing::info!(session_id = %session.session_id, "session updated");
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<Option<u32>> {
        let body = self.request("admin_deleteSession", SessionIdPayload { session_id });
        let envelope = self.http.post(&body, "delete failed").await?;
        let deleted = envelope
            .integer("deletedBookings")
            .and_then(|n| u32::try_from(n).ok());
        tracing::info!(session_id, ?deleted, "session deleted");
        Ok(deleted)
    }

    async fn set_only_open(&self, session_id: &str) -> Result<()> {
        let body = self.request("admin_setOnlyOpen", SessionIdPayload { session_id });
        self.http.post(&body, "update failed").await?;
        tracing::info!(session_id, "session set as the only open one");
        Ok(())
    }

    async fn list_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>> {
        let body = self.request("admin_listRsvps", SessionIdPayload { session_id });
        let envelope = self.http.post(&body, "load rsvps failed").await?;
        Ok(rsvps_from_rows(envelope.first_array(RSVP_LIST_KEYS), session_id))
    }

    async fn update_rsvp(&self, update: &RsvpSubmission) -> Result<()> {
        let body = self.request("admin_updateRsvp", RsvpPayload::from(update));
        self.http.post(&body, "update failed").await?;
        tracing::info!(session_id = %update.session_id, "rsvp updated");
        Ok(())
    }

    async fn delete_rsvp(&self, session_id: &str, name: &str) -> Result<()> {
        let body = self.request(
            "admin_deleteRsvp",
            DeleteRsvpPayload {
                session_id,
                name: name.trim(),
            },
        );
        self.http.post(&body, "delete failed").await?;
        tracing::info!(session_id, "rsvp deleted");
        Ok(())
    }

    async fn bulk_update_sessions(&self, sessions: &[Session]) -> Result<()> {
        let body = self.request(
            "admin_bulkUpdateSessions",
            BulkSessionsPayload {
                sessions: sessions.iter().map(SessionWire::from).collect(),
            },
        );
        self.http.post(&body, "bulk update failed").await?;
        tracing::info!(count = sessions.len(), "sessions bulk updated");
        Ok(())
    }
}
