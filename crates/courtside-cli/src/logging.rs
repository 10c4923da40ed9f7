//! Logging bootstrap.
//!
//! Logs go to stderr; stdout carries only command output so announcements
//! can be piped.

use tracing_subscriber::{EnvFilter, fmt};

/// Picks the filter directive: `RUST_LOG`, then `-v`, then the config level.
pub fn filter_directive(rust_log: Option<&str>, verbose: u8, config_level: &str) -> String {
    if let Some(directive) = rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        return directive.to_string();
    }
    match verbose {
        0 => {
            let level = config_level.trim();
            if level.is_empty() { "warn".to_string() } else { level.to_string() }
        }
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init(verbose: u8, config_level: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), verbose, config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
