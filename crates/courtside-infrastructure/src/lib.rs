//! Infrastructure for Courtside: the HTTP booking client, wire DTOs and
//! local configuration storage.

pub mod config_service;
pub mod dto;
pub mod http_client;
pub mod paths;
pub mod storage;

pub use crate::config_service::{ConfigOverrides, ConfigService};
pub use crate::http_client::{HttpAdminClient, HttpBookingClient};
pub use crate::paths::CourtsidePaths;
