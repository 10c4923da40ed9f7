//! Client configuration model.
//!
//! The on-disk representation lives in `config.toml`; loading, caching and
//! environment overrides are handled by the infrastructure crate.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Waitlist size used by every deployment seen so far.
pub const DEFAULT_WAITLIST_LIMIT: u32 = 6;

/// How a session capacity of zero is interpreted by the allocator.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CapacityPolicy {
    /// Zero capacity means no limit: every YES is confirmed.
    #[default]
    Unlimited,
    /// Zero capacity means no seats: YES records go straight to the waitlist.
    Closed,
}

/// Values used when an admin creates or generates sessions without
/// specifying every field.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_venue")]
    pub venue: String,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default = "default_weeks")]
    pub weeks: u32,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            title: default_title(),
            venue: default_venue(),
            start: default_start(),
            end: default_end(),
            capacity: default_capacity(),
            weeks: default_weeks(),
        }
    }
}

/// Root client configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Public booking endpoint.
    #[serde(default)]
    pub api_base: String,
    /// Admin endpoint, when the deployment splits it from the public one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_api_base: Option<String>,
    /// Link to the public RSVP page, printed in announcements.
    #[serde(default)]
    pub public_url: String,
    #[serde(default = "default_waitlist_limit")]
    pub waitlist_limit: u32,
    #[serde(default)]
    pub capacity_zero: CapacityPolicy,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub session_defaults: SessionDefaults,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            admin_api_base: None,
            public_url: String::new(),
            waitlist_limit: DEFAULT_WAITLIST_LIMIT,
            capacity_zero: CapacityPolicy::default(),
            request_timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            session_defaults: SessionDefaults::default(),
        }
    }
}

impl ClientConfig {
    /// Endpoint for admin actions, falling back to the public endpoint.
    pub fn admin_endpoint(&self) -> &str {
        self.admin_api_base
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.api_base)
    }
}

fn default_title() -> String {
    "Badminton".to_string()
}

fn default_venue() -> String {
    "Goodminton".to_string()
}

fn default_start() -> String {
    "17:00".to_string()
}

fn default_end() -> String {
    "19:00".to_string()
}

fn default_capacity() -> u32 {
    20
}

fn default_weeks() -> u32 {
    8
}

fn default_waitlist_limit() -> u32 {
    DEFAULT_WAITLIST_LIMIT
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}
