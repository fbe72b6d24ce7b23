//! Environment configuration.
//!
//! Store access needs a base URL and one credential. Both are checked here,
//! before any client exists, so a missing key stops the process at startup
//! instead of surfacing later as confusing query failures.

use std::time::Duration;

use url::Url;

pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const STORE_TIMEOUT_VAR: &str = "STORE_TIMEOUT_SECS";
pub const SIMULATION_URL_VAR: &str = "WORLD_SIMULATION_URL";
pub const CRON_SECRET_VAR: &str = "CRON_SECRET";

/// Default store request timeout.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Which credential the store client authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialTier {
    /// Service-role key. Bypasses row-level policy; server-side only.
    Service,
    /// Public anon key. Subject to row-level policy.
    Anon,
}

impl CredentialTier {
    pub fn key_var(self) -> &'static str {
        match self {
            Self::Service => SERVICE_KEY_VAR,
            Self::Anon => ANON_KEY_VAR,
        }
    }
}

impl std::fmt::Display for CredentialTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::Anon => write!(f, "anon"),
        }
    }
}

/// Validated store connection settings.
#[derive(Clone)]
pub struct StoreConfig {
    pub base_url: Url,
    pub tier: CredentialTier,
    pub key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("tier", &self.tier)
            .field("key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Build from raw values, rejecting absent or blank ones.
    pub fn new(
        base_url: Option<&str>,
        key: Option<&str>,
        tier: CredentialTier,
    ) -> Result<Self, ConfigError> {
        let base_url = non_blank(base_url).ok_or(ConfigError::Missing(STORE_URL_VAR))?;
        let key = non_blank(key).ok_or(ConfigError::Missing(tier.key_var()))?;

        let base_url = Url::parse(base_url).map_err(|e| ConfigError::Invalid {
            var: STORE_URL_VAR,
            message: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                var: STORE_URL_VAR,
                message: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        Ok(Self {
            base_url,
            tier,
            key: key.to_string(),
            timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        })
    }

    /// Read `SUPABASE_URL` and the tier's key from the environment.
    pub fn from_env(tier: CredentialTier) -> Result<Self, ConfigError> {
        let base_url = std::env::var(STORE_URL_VAR).ok();
        let key = std::env::var(tier.key_var()).ok();
        let config = Self::new(base_url.as_deref(), key.as_deref(), tier)?;

        match std::env::var(STORE_TIMEOUT_VAR) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: STORE_TIMEOUT_VAR,
                    message: e.to_string(),
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Optional settings of the world-update route.
#[derive(Debug, Clone, Default)]
pub struct CronConfig {
    /// Endpoint of the external simulation step.
    pub simulation_url: Option<Url>,
    /// Bearer token the cron caller must present.
    pub secret: Option<String>,
}

impl CronConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let simulation_url = match non_blank(std::env::var(SIMULATION_URL_VAR).ok().as_deref()) {
            Some(raw) => Some(Url::parse(raw).map_err(|e| ConfigError::Invalid {
                var: SIMULATION_URL_VAR,
                message: e.to_string(),
            })?),
            None => None,
        };
        let secret = non_blank(std::env::var(CRON_SECRET_VAR).ok().as_deref()).map(str::to_string);

        Ok(Self {
            simulation_url,
            secret,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
