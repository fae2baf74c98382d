pub mod error;
pub mod config;
pub mod request;
pub mod client;
pub mod checks;
pub mod scenario;
pub mod suite;
use serde::{Deserialize, Serialize};

/*

promptcheck is an async conformance harness for the prompt enhancement
api. one client task owns the http connection for the whole suite;
scenarios are run strictly one after another and every scenario
succeeds or fails on its own.

promptcheck/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports, request taxonomy, logging
│   ├── error.rs        # Harness error type
│   ├── config.rs       # Endpoint, timeout, optional probes
│   ├── request.rs      # Wire types
│   ├── client.rs       # Client task owning reqwest::Client
│   ├── checks.rs       # Assertions over a captured exchange
│   ├── scenario.rs     # Probe + expectation catalogue
│   └── suite.rs        # Sequential runner and report
└── tests/

*/

pub use client::{ConformanceClient, Exchange};
pub use config::HarnessConfig;
pub use error::Error;
pub use scenario::{Expectation, Probe, Scenario};
pub use suite::{ConformanceSuite, ScenarioOutcome, SuiteReport};

/// Longest prompt the service accepts, in characters
pub const MAX_PROMPT_CHARS: usize = 10_000;

// ===== Reply types =====

pub type ExchangeReply = Result<client::Exchange, crate::error::Error>;
pub type ExchangeReplySender
  = tokio::sync::mpsc::UnboundedSender<ExchangeReply>;

/// Classification label assigned by the service.
/// The taxonomy belongs to the server; unknown labels are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType
{   Poetry
  , ImageGeneration
  , AppDevelopment
  , /// Default bucket for prompts with no specific intent
    General
  , Other(String)
}

impl RequestType
{   pub fn as_str(&self) -> &str
    {   match self
        {   RequestType::Poetry => "poetry"
          , RequestType::ImageGeneration => "image_generation"
          , RequestType::AppDevelopment => "app_development"
          , RequestType::General => "general"
          , RequestType::Other(label) => label.as_str()
        }
    }
}

impl From<String> for RequestType
{   fn from(label: String) -> Self
    {   match label.as_str()
        {   "poetry" => RequestType::Poetry
          , "image_generation" => RequestType::ImageGeneration
          , "app_development" => RequestType::AppDevelopment
          , "general" => RequestType::General
          , _ => RequestType::Other(label)
        }
    }
}

impl From<&str> for RequestType
{   fn from(label: &str) -> Self
    {   RequestType::from(label.to_string())
    }
}

impl From<RequestType> for String
{   fn from(request_type: RequestType) -> Self
    {   match request_type
        {   RequestType::Other(label) => label
          , known => known.as_str().to_string()
        }
    }
}

impl std::fmt::Display for RequestType
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

/// Install env_logger once; later calls are no-ops.
/// Honours `RUST_LOG`, defaults to `info`.
pub fn init_logging()
{   let _ = env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    )
    .try_init();
}
