//! RSVP domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Attendance status as stored by the booking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AttendanceStatus {
    Yes,
    No,
}

/// What a player picked in the form.
///
/// `Maybe` exists only on the client. It is never sent to the booking
/// service; picking it produces a nudge instead of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RsvpChoice {
    Yes,
    No,
    Maybe,
}

impl RsvpChoice {
    /// The status to submit, or `None` for `Maybe`.
    pub fn to_status(self) -> Option<AttendanceStatus> {
        match self {
            RsvpChoice::Yes => Some(AttendanceStatus::Yes),
            RsvpChoice::No => Some(AttendanceStatus::No),
            RsvpChoice::Maybe => None,
        }
    }
}

/// Where the booking service placed a submitted RSVP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Placement {
    Confirmed,
    Waitlist,
    Overflow,
}

/// One attendance declaration row.
///
/// Several rows may exist for the same person and session; the one with
/// the latest `timestamp` is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub name: String,
    pub status: AttendanceStatus,
    /// Party size; anything below 1 counts as 1
    pub pax: u32,
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl RsvpRecord {
    /// Key used to decide whether two rows belong to the same person.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Party size as counted against capacity.
    pub fn effective_pax(&self) -> u32 {
        self.pax.max(1)
    }
}

/// Trims and lowercases a display name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An RSVP as sent to the booking service.
///
/// Also used by admins to overwrite an existing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSubmission {
    pub session_id: String,
    pub name: String,
    pub status: AttendanceStatus,
    pub pax: u32,
    pub note: String,
}
