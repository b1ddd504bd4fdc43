//! Handler configuration and construction-time host validation.
//!
//! The host application loads these values however it likes (environment,
//! config file, hardcoded) and hands a [`Config`] to the handler builder
//! once. The struct is never mutated afterwards.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::ConfigError;
use crate::level::Level;

/// Default ingestion host (PostHog US cloud).
pub const DEFAULT_HOST: &str = "us.i.posthog.com";
/// Default batch size before a flush is triggered.
pub const DEFAULT_BATCH_MAX_SIZE: usize = 100;
/// Default overall HTTP request timeout. Kept short so synchronous delivery
/// fails fast instead of stalling the emitting thread.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
/// Default connection-establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Characters that are never legal in a bare hostname and indicate a path,
/// query, fragment, or script injection attempt.
const FORBIDDEN_HOST_CHARS: &[char] = &['<', '>', '"', '\'', '/', '?', '&', '#'];

/// HTTP client settings shared by the synchronous sender and queued jobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection-establishment timeout.
    pub connect_timeout: Duration,
    /// Whether to verify the server's TLS certificate.
    pub verify_tls: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            verify_tls: true,
        }
    }
}

/// Static configuration for a [`PosthogHandler`](crate::PosthogHandler).
#[derive(Clone, Debug)]
pub struct Config {
    /// PostHog project API key. `None` or empty disables all sending.
    pub api_key: Option<String>,
    /// Bare ingestion hostname, optionally with a port. Never a full URL.
    pub host: String,
    /// Value of the `service.name` resource attribute.
    pub service_name: String,
    /// Value of the `deployment.environment` resource attribute.
    pub environment: String,
    /// Minimum level a record must meet to be forwarded.
    pub level: Level,
    /// Master switch; when false the handler ignores every event.
    pub enabled: bool,
    /// Records per batch before a flush is triggered. Zero disables batching
    /// and delivers each record immediately.
    pub batch_max_size: usize,
    /// Name of the async delivery queue. `None` selects synchronous delivery.
    pub queue: Option<String>,
    /// Custom resource attributes merged into every payload.
    pub resource_attributes: BTreeMap<String, Value>,
    /// HTTP client settings.
    pub http: HttpSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_HOST.to_owned(),
            service_name: "app".to_owned(),
            environment: "production".to_owned(),
            level: Level::Debug,
            enabled: true,
            batch_max_size: DEFAULT_BATCH_MAX_SIZE,
            queue: None,
            resource_attributes: BTreeMap::new(),
            http: HttpSettings::default(),
        }
    }
}

impl Config {
    /// Convenience constructor for the common case of key-only configuration.
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_owned()),
            ..Self::default()
        }
    }

    /// The ingestion endpoint derived from the configured host.
    ///
    /// Callers must run [`validate_host`] first; this performs no checking.
    pub(crate) fn endpoint(&self) -> String {
        format!("https://{}/i/v1/logs", self.host)
    }

    /// Whether an API key is present and non-empty.
    pub(crate) fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

/// Validate a configured ingestion host.
///
/// A valid host is a bare hostname, optionally with a port. Anything that
/// fails to parse as `https://{host}`, or that carries URL metacharacters or
/// whitespace, is rejected so a hostile configuration cannot smuggle a path,
/// query string, or markup into the endpoint URL.
pub fn validate_host(host: &str) -> Result<(), ConfigError> {
    if Url::parse(&format!("https://{host}")).is_err() {
        return Err(ConfigError::InvalidHost(host.to_owned()));
    }

    if host
        .chars()
        .any(|c| c.is_whitespace() || FORBIDDEN_HOST_CHARS.contains(&c))
    {
        return Err(ConfigError::InvalidHostCharacters(host.to_owned()));
    }

    Ok(())
}
