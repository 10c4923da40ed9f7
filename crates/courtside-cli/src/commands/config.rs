//! `courtside config` subcommands.

use super::render;
use crate::ConfigCommand;
use anyhow::Result;
use courtside_infrastructure::ConfigService;

pub fn run(service: &ConfigService, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => println!("{}", service.path().display()),
        ConfigCommand::Show => {
            let config = service.get_config()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::Set {
            api_base,
            admin_api_base,
            public_url,
            waitlist_limit,
        } => {
            service.update(|config| {
                if let Some(api_base) = api_base {
                    config.api_base = api_base.trim().to_string();
                }
                if let Some(admin_api_base) = admin_api_base {
                    let trimmed = admin_api_base.trim();
                    config.admin_api_base = (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
                if let Some(public_url) = public_url {
                    config.public_url = public_url.trim().to_string();
                }
                if let Some(limit) = waitlist_limit {
                    config.waitlist_limit = limit;
                }
                Ok(())
            })?;
            render::success(&format!("已儲存 / Saved {}", service.path().display()));
        }
    }
    Ok(())
}
