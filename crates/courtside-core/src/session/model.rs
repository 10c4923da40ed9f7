//! Session domain model.

use crate::schedule::{format_hm, weekday_short};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A scheduled badminton time slot.
///
/// Created and mutated only through admin actions on the booking service;
/// players only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier assigned by the booking service
    pub session_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub venue: String,
    /// Seats available; zero is interpreted per `CapacityPolicy`
    pub capacity: u32,
    #[serde(default)]
    pub note: String,
    pub is_open: bool,
}

impl Session {
    /// Start of the session as a local date-time.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    /// Sort key used everywhere sessions are listed.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.start)
    }

    /// Human-readable one-line label.
    ///
    /// `2025-03-09 (Sun) 17:00-19:00 · Goodminton`, optionally followed by
    /// the open/closed flag.
    pub fn label(&self, with_open_flag: bool) -> String {
        let mut label = format!(
            "{} ({}) {}-{} · {}",
            self.date.format("%Y-%m-%d"),
            weekday_short(self.date),
            format_hm(self.start),
            format_hm(self.end),
            self.venue
        );
        if with_open_flag {
            label.push_str(if self.is_open { " · OPEN" } else { " · CLOSED" });
        }
        label
    }

    /// Copies the editable fields into a draft.
    pub fn to_draft(&self) -> SessionDraft {
        SessionDraft {
            title: self.title.clone(),
            date: self.date,
            start: self.start,
            end: self.end,
            venue: self.venue.clone(),
            capacity: self.capacity,
            note: self.note.clone(),
            is_open: self.is_open,
        }
    }
}

/// Session fields as edited locally by an admin before saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub venue: String,
    pub capacity: u32,
    pub note: String,
    pub is_open: bool,
}

impl SessionDraft {
    /// Attaches an identifier, producing a full session for update calls.
    pub fn into_session(self, session_id: impl Into<String>) -> Session {
        Session {
            session_id: session_id.into(),
            title: self.title,
            date: self.date,
            start: self.start,
            end: self.end,
            venue: self.venue,
            capacity: self.capacity,
            note: self.note,
            is_open: self.is_open,
        }
    }
}
