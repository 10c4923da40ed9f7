//! Wire formats of the booking service.
//!
//! Responses are decoded leniently into DTOs and validated into domain
//! types here, so nothing past this module sees a half-parsed row.

pub mod envelope;
pub mod loose;
pub mod request;
pub mod rsvp;
pub mod session;

pub use envelope::Envelope;
pub use rsvp::{RsvpDto, placement_from, rsvps_from_rows};
pub use session::{SessionDto, SessionFieldsWire, SessionWire, sessions_from_rows};
