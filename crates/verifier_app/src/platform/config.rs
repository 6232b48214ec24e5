//! RON configuration file for the verifier binary.
//!
//! Every section and field is optional; missing values take the defaults
//! below and command-line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use verifier_core::presentation::{
    PresentationState, DEFAULT_LIST_HEIGHT, DEFAULT_PAGE_SIZE, DEFAULT_ROW_HEIGHT,
    PAGE_SIZE_OPTIONS,
};
use verifier_engine::{
    ApiRoute, Backoff, ClientSettings, RetryPolicy, DEFAULT_ORIGIN, DEFAULT_VERIFY_PATH,
};
use verifier_logging::verifier_warn;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "verifier.ron";

/// Terminal columns below which results switch to the list layout.
pub const DEFAULT_SMALL_SCREEN_BELOW: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub retry: RetryConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub origin: String,
    pub verify_path: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            verify_path: DEFAULT_VERIFY_PATH.to_string(),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackoffKind {
    #[default]
    Constant,
    Exponential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub delay_ms: u64,
    pub backoff: BackoffKind,
    /// Only used by exponential backoff.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_ms: 1_000,
            backoff: BackoffKind::Constant,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        let backoff = match self.backoff {
            BackoffKind::Constant => Backoff::Constant,
            BackoffKind::Exponential => Backoff::Exponential {
                max_delay: Duration::from_millis(self.max_delay_ms),
            },
        };
        RetryPolicy {
            max_retries: self.max_retries,
            delay: Duration::from_millis(self.delay_ms),
            backoff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub small_screen_below: u32,
    pub row_height: u32,
    pub list_height: u32,
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            small_screen_below: DEFAULT_SMALL_SCREEN_BELOW,
            row_height: DEFAULT_ROW_HEIGHT,
            list_height: DEFAULT_LIST_HEIGHT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DisplayConfig {
    pub fn presentation(&self, viewport_width: u32) -> PresentationState {
        let page_size = if PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            self.page_size
        } else {
            verifier_warn!(
                "Unsupported page size {} in config, using {}",
                self.page_size,
                DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        };
        PresentationState {
            viewport_width,
            medium_breakpoint: self.small_screen_below,
            row_height: self.row_height.max(1),
            list_height: self.list_height,
            page_size,
            ..PresentationState::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub destination: LogDestination,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Client settings for the configured (or overridden) backend origin.
    pub fn client_settings(&self, origin_override: Option<&str>) -> Result<ClientSettings> {
        let origin = origin_override.unwrap_or(&self.service.origin);
        let route = ApiRoute::new(origin)?;
        let mut settings = ClientSettings::new(route.resolve(&self.service.verify_path));
        settings.connect_timeout = Duration::from_millis(self.service.connect_timeout_ms);
        settings.request_timeout = Duration::from_millis(self.service.request_timeout_ms);
        settings.max_response_bytes = self.service.max_response_bytes;
        settings.retry = self.retry.policy();
        Ok(settings)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(ron::from_str(content)?)
}

/// Loads `explicit` if given, otherwise `./verifier.ron` when it exists.
///
/// An explicitly named file must exist; a missing default file yields the
/// built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()));
        }
    };

    parse_config(&content).with_context(|| format!("failed to parse config {}", path.display()))
}
