//! Application layer for Courtside.
//!
//! Use cases coordinate the domain policies in `courtside-core` with a
//! booking service reached through the `BookingApi` / `AdminApi` traits.

pub mod admin_usecase;
pub mod nudge;
pub mod rsvp_usecase;
pub mod state;

#[cfg(test)]
mod test_support;

pub use admin_usecase::{AdminUseCase, CreateSessionInput, GenerateSundaysInput, GeneratedSessions, RsvpTableView, SessionEdit};
pub use nudge::NudgeRotation;
pub use rsvp_usecase::{AttendanceView, DirectoryView, RsvpForm, RsvpUseCase, SubmitOutcome};
pub use state::AppState;
