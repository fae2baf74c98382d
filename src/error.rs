use std::fmt;

/// Error type for harness operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// HTTP transport error
    HttpError(String)
  , /// Call exceeded the configured timeout
    Timeout
  , /// Response body was empty or blank
    EmptyBody
  , /// Failed to parse a body or config file as JSON
    ParseError(String)
  , /// Status code differs from the scenario's expectation
    UnexpectedStatus
    {   expected: u16
      , actual: u16
      , body: String
    }
  , /// Expected JSON field is absent or null
    MissingField(String)
  , /// A content assertion did not hold
    AssertionFailed(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Client task is no longer running
    ClientShutdown
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::EmptyBody => {
              write!(f, "Response body should not be empty")
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::UnexpectedStatus { expected, actual, body } => {
              write!(f,
                "Expected status {} but got {}: {}",
                expected, actual, body
              )
            }
          , Error::MissingField(field) => {
              write!(f, "Missing field in response: {}", field)
            }
          , Error::AssertionFailed(msg) => {
              write!(f, "Assertion failed: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::ClientShutdown => {
              write!(f, "Conformance client has shut down")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}
