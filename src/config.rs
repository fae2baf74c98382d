//! Configuration for the conformance harness

use serde::{Deserialize, Serialize};
use log::{debug, error};
use std::fs;
use std::path::Path;

/// Production endpoint of the prompt enhancement service
pub const DEFAULT_ENDPOINT: &str
  = "https://njzzp0serg.execute-api.us-east-1.amazonaws.com/prod/generate-prompt";

/// Overall call timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

pub const ENDPOINT_ENV: &str = "PROMPTCHECK_ENDPOINT";
pub const TIMEOUT_ENV: &str = "PROMPTCHECK_TIMEOUT_MS";

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig
{   /// URL the prompt is POSTed to
    pub endpoint: String
  , /// Overall call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64
  , /// Health check URL, probed only when set
    #[serde(default)]
    pub health_endpoint: Option<String>
  , /// Send a CORS preflight to the endpoint
    #[serde(default)]
    pub check_preflight: bool
  , /// Optional `language` field sent with every prompt
    #[serde(default)]
    pub language: Option<String>
}

fn default_timeout_ms() -> u64
{   DEFAULT_TIMEOUT_MS
}

impl Default for HarnessConfig
{   fn default() -> Self
    {   HarnessConfig
        {   endpoint: DEFAULT_ENDPOINT.to_string()
          , timeout_ms: DEFAULT_TIMEOUT_MS
          , health_endpoint: None
          , check_preflight: false
          , language: None
        }
    }
}

impl HarnessConfig
{   /// Point the harness at another endpoint, keeping defaults otherwise
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self
    {   HarnessConfig
        {   endpoint: endpoint.into()
          , ..HarnessConfig::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading harness config from {}", path.display());
        let config_str = fs::read_to_string(path)
          .map_err(|e| {
            error!("Failed to read {}: {}", path.display(), e);
            crate::error::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;
        let config: HarnessConfig = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PROMPTCHECK_ENDPOINT` and `PROMPTCHECK_TIMEOUT_MS`
    pub fn with_env_overrides(mut self)
      -> Result<Self, crate::error::Error>
    {   if let Ok(endpoint) = std::env::var(ENDPOINT_ENV)
        {   debug!("Endpoint overridden from {}", ENDPOINT_ENV);
            self.endpoint = endpoint;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV)
        {   self.timeout_ms = raw.trim().parse::<u64>()
              .map_err(|_| {
                crate::error::Error::InvalidConfiguration(
                  format!("{} is not a number: {}", TIMEOUT_ENV, raw)
                )
              })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations the client cannot use
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   let endpoint = self.endpoint.trim();
        if endpoint.is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "endpoint is empty".to_string()
            ));
        }
        if !is_http_url(endpoint)
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("endpoint is not an http(s) URL: {}", endpoint)
            ));
        }
        if let Some(health) = &self.health_endpoint
        {   if !is_http_url(health.trim())
            {   return Err(crate::error::Error::InvalidConfiguration(
                  format!("health endpoint is not an http(s) URL: {}", health)
                ));
            }
        }
        if self.timeout_ms == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "timeout_ms must be greater than zero".to_string()
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration
    {   std::time::Duration::from_millis(self.timeout_ms)
    }
}

fn is_http_url(url: &str) -> bool
{   url.starts_with("http://") || url.starts_with("https://")
}
