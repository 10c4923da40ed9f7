//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session` and the admin-side `SessionDraft`
//! - `directory`: which sessions are listed and which one is preselected

pub mod directory;
mod model;

pub use directory::{
    DefaultSession, all_sessions_sorted, find, open_sessions_sorted, pick_default_session,
};
pub use model::{Session, SessionDraft};
