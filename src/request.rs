//! Wire types for the prompt enhancement API

use serde::{Deserialize, Serialize};

/// Prompt submission body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest
{   /// The prompt text
    pub prompt: String
  , /// Output language, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>
}

impl PromptRequest
{   pub fn new(prompt: impl Into<String>) -> Self
    {   PromptRequest
        {   prompt: prompt.into()
          , language: None
        }
    }
}

/// Successful enhancement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse
{   pub success: bool
  , pub request_type: crate::RequestType
  , pub enhanced_prompt: String
}

/// Validation failure, sent with HTTP 400
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse
{   pub error: String
  , pub message: String
  , /// Machine readable code, e.g. `PROMPT_TOO_LONG`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse
{   pub status: String
  , #[serde(default)]
    pub timestamp: Option<String>
  , #[serde(default)]
    pub version: Option<String>
}
