//! Domain layer for Courtside.
//!
//! Pure types and policies: sessions, RSVPs, attendance allocation, the
//! schedule helpers used by admins, and the traits the booking service is
//! reached through.

pub mod announcement;
pub mod api;
pub mod config;
pub mod error;
pub mod rsvp;
pub mod schedule;
pub mod session;

// Re-export common error type
pub use error::{CourtsideError, Result};
