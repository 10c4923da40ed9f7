//! Configuration service.
//!
//! Loads `ClientConfig` from `config.toml`, creating the file with defaults
//! on first use, and caches it for the lifetime of the process.

use crate::paths::CourtsidePaths;
use crate::storage::ConfigStorage;
use courtside_core::config::ClientConfig;
use courtside_core::{CourtsideError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub const API_BASE_ENV: &str = "COURTSIDE_API_BASE";
pub const ADMIN_API_BASE_ENV: &str = "COURTSIDE_ADMIN_API_BASE";
pub const ADMIN_KEY_ENV: &str = "COURTSIDE_ADMIN_KEY";

/// Endpoint overrides layered on top of the file.
///
/// Overrides only live in memory; they are never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub admin_api_base: Option<String>,
}

impl ConfigOverrides {
    /// Reads `COURTSIDE_API_BASE` and `COURTSIDE_ADMIN_API_BASE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base: lookup(API_BASE_ENV),
            admin_api_base: lookup(ADMIN_API_BASE_ENV),
        }
    }

    /// Layers `other` over `self`; set values in `other` win.
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            api_base: other.api_base.or(self.api_base),
            admin_api_base: other.admin_api_base.or(self.admin_api_base),
        }
    }

    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(api_base) = non_blank(&self.api_base) {
            config.api_base = api_base;
        }
        if let Some(admin_api_base) = non_blank(&self.admin_api_base) {
            config.admin_api_base = Some(admin_api_base);
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Loads and caches the client configuration.
#[derive(Clone)]
pub struct ConfigService {
    storage: Arc<ConfigStorage>,
    overrides: ConfigOverrides,
    /// Effective configuration, overrides applied.
    cache: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses the default location, `<config dir>/courtside/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(CourtsidePaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: Arc::new(ConfigStorage::new(path)),
            overrides: ConfigOverrides::default(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn path(&self) -> PathBuf {
        self.storage.path().to_path_buf()
    }

    /// Returns the effective configuration, loading from disk if not cached.
    ///
    /// A missing file is created with defaults.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self
                .cache
                .read()
                .map_err(|_| CourtsideError::internal("config cache lock poisoned"))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut config = self.load_or_create()?;
        self.overrides.apply(&mut config);

        let mut write_lock = self
            .cache
            .write()
            .map_err(|_| CourtsideError::internal("config cache lock poisoned"))?;
        *write_lock = Some(config.clone());
        Ok(config)
    }

    /// Applies `f` to the stored file and drops the cache.
    ///
    /// `f` sees the file contents, without in-memory overrides.
    pub fn update<F>(&self, f: F) -> Result<ClientConfig>
    where
        F: FnOnce(&mut ClientConfig) -> Result<()>,
    {
        let saved = self.storage.update(ClientConfig::default(), f)?;
        self.invalidate_cache();
        Ok(saved)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.cache.write() {
            *write_lock = None;
        }
    }

    fn load_or_create(&self) -> Result<ClientConfig> {
        if let Some(config) = self.storage.load::<ClientConfig>()? {
            return Ok(config);
        }

        let config = ClientConfig::default();
        self.storage.save(&config)?;
        tracing::info!(path = %self.storage.path().display(), "created default config");
        Ok(config)
    }
}
