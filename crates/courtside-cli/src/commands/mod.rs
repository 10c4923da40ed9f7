pub mod admin;
pub mod config;
pub mod public;
pub mod render;

use anyhow::Result;
use courtside_application::{AdminUseCase, RsvpUseCase};
use courtside_core::config::ClientConfig;
use courtside_infrastructure::{HttpAdminClient, HttpBookingClient};
use std::sync::Arc;

/// Everything a command needs to build its use case.
pub struct Context {
    pub config: ClientConfig,
    admin_key: Option<String>,
}

impl Context {
    pub fn new(config: ClientConfig, admin_key: Option<String>) -> Self {
        Self { config, admin_key }
    }

    pub fn rsvp_usecase(&self) -> Result<RsvpUseCase> {
        let client = HttpBookingClient::from_config(&self.config)?;
        Ok(RsvpUseCase::new(Arc::new(client), self.config.clone()))
    }

    /// A missing key is passed through as blank; the use case rejects it
    /// before any request is made.
    pub fn admin_usecase(&self) -> Result<AdminUseCase> {
        let key = self.admin_key.clone().unwrap_or_default();
        let public = HttpBookingClient::from_config(&self.config)?;
        let admin = HttpAdminClient::from_config(&self.config, key.clone())?;
        Ok(AdminUseCase::new(
            Arc::new(public),
            Arc::new(admin),
            key,
            self.config.clone(),
        ))
    }
}
