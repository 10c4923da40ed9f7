//! Session rows on the wire.

use super::loose;
use chrono::NaiveTime;
use courtside_core::schedule::{format_hm, normalize_date, normalize_time};
use courtside_core::session::{Session, SessionDraft};
use courtside_core::{CourtsideError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A session row as the service returns it. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(default, deserialize_with = "loose::text")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "loose::integer")]
    pub capacity: Option<i64>,
    #[serde(default, deserialize_with = "loose::text")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "loose::flag")]
    pub is_open: Option<bool>,
}

impl TryFrom<SessionDto> for Session {
    type Error = CourtsideError;

    fn try_from(dto: SessionDto) -> Result<Self> {
        let session_id = dto
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CourtsideError::malformed("session row without sessionId"))?;

        let raw_date = dto.date.unwrap_or_default();
        let date = normalize_date(&raw_date).ok_or_else(|| {
            CourtsideError::malformed(format!("session {session_id}: unparseable date {raw_date:?}"))
        })?;

        let start = parse_time_field(&session_id, "start", dto.start.as_deref())?
            .unwrap_or(NaiveTime::MIN);
        let end = parse_time_field(&session_id, "end", dto.end.as_deref())?.unwrap_or(start);

        Ok(Session {
            session_id,
            title: dto.title.unwrap_or_default().trim().to_string(),
            date,
            start,
            end,
            venue: dto.venue.unwrap_or_default().trim().to_string(),
            capacity: dto.capacity.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32,
            note: dto.note.unwrap_or_default(),
            is_open: dto.is_open.unwrap_or(false),
        })
    }
}

/// Blank means absent; anything else must parse.
fn parse_time_field(session_id: &str, field: &str, raw: Option<&str>) -> Result<Option<NaiveTime>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => normalize_time(raw).map(Some).ok_or_else(|| {
            CourtsideError::malformed(format!("session {session_id}: unparseable {field} {raw:?}"))
        }),
    }
}

/// Converts raw rows, dropping the ones that fail validation.
pub fn sessions_from_rows(rows: Vec<Value>) -> Vec<Session> {
    let total = rows.len();
    let sessions: Vec<Session> = rows
        .into_iter()
        .filter_map(|row| {
            let parsed = serde_json::from_value::<SessionDto>(row)
                .map_err(CourtsideError::from)
                .and_then(Session::try_from);
            match parsed {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(error = %e, "rejected session row");
                    None
                }
            }
        })
        .collect();
    tracing::debug!(total, accepted = sessions.len(), "parsed session rows");
    sessions
}

/// Editable session fields as the service expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFieldsWire {
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub venue: String,
    pub capacity: u32,
    pub note: String,
    pub is_open: bool,
}

impl From<&SessionDraft> for SessionFieldsWire {
    fn from(draft: &SessionDraft) -> Self {
        Self {
            title: draft.title.clone(),
            date: draft.date.format("%Y-%m-%d").to_string(),
            start: format_hm(draft.start),
            end: format_hm(draft.end),
            venue: draft.venue.clone(),
            capacity: draft.capacity,
            note: draft.note.clone(),
            is_open: draft.is_open,
        }
    }
}

/// A full session as sent in `admin_updateSession`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWire {
    pub session_id: String,
    #[serde(flatten)]
    pub fields: SessionFieldsWire,
}

impl From<&Session> for SessionWire {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id.clone(),
            fields: SessionFieldsWire::from(&session.to_draft()),
        }
    }
}
