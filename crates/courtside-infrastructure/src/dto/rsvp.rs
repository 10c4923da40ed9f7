//! RSVP rows on the wire.

use super::loose;
use courtside_core::rsvp::{AttendanceStatus, Placement, RsvpRecord};
use courtside_core::schedule::parse_timestamp;
use courtside_core::{CourtsideError, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpDto {
    #[serde(default, deserialize_with = "loose::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "loose::integer")]
    pub pax: Option<i64>,
    #[serde(default, deserialize_with = "loose::text")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub session_id: Option<String>,
}

impl RsvpDto {
    /// Validates the row.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: a usable row; `pax` below 1 or non-numeric is 1
    /// - `Ok(None)`: blank name, silently skipped
    /// - `Err(_)`: unknown status or unparseable timestamp
    pub fn into_record(self, fallback_session_id: &str) -> Result<Option<RsvpRecord>> {
        let name = self.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Ok(None);
        }

        let raw_status = self.status.unwrap_or_default();
        let status: AttendanceStatus = raw_status.trim().parse().map_err(|_| {
            CourtsideError::malformed(format!("rsvp {name:?}: unknown status {raw_status:?}"))
        })?;

        let raw_timestamp = self.timestamp.unwrap_or_default();
        let timestamp = parse_timestamp(&raw_timestamp).ok_or_else(|| {
            CourtsideError::malformed(format!("rsvp {name:?}: unparseable timestamp {raw_timestamp:?}"))
        })?;

        let pax = self
            .pax
            .filter(|p| *p >= 1)
            .map(|p| p.min(i64::from(u32::MAX)) as u32)
            .unwrap_or(1);

        let session_id = self
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_session_id.to_string());

        Ok(Some(RsvpRecord {
            name,
            status,
            pax,
            note: self.note.unwrap_or_default(),
            timestamp,
            session_id,
        }))
    }
}

/// Converts raw rows of one session, dropping the ones that fail validation.
pub fn rsvps_from_rows(rows: Vec<Value>, session_id: &str) -> Vec<RsvpRecord> {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    for row in rows {
        let parsed = serde_json::from_value::<RsvpDto>(row)
            .map_err(CourtsideError::from)
            .and_then(|dto| dto.into_record(session_id));
        match parsed {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => tracing::warn!(session_id, error = %e, "rejected rsvp row"),
        }
    }
    tracing::debug!(session_id, total, accepted = records.len(), "parsed rsvp rows");
    records
}

/// Reads the `placement` field of a submit response.
///
/// Unknown or missing values mean "no placement reported".
pub fn placement_from(value: Option<&Value>) -> Option<Placement> {
    let raw = value.and_then(loose::as_text)?;
    match raw.trim().parse() {
        Ok(placement) => Some(placement),
        Err(_) => {
            if !raw.trim().is_empty() {
                tracing::debug!(placement = %raw, "ignoring unknown placement");
            }
            None
        }
    }
}
