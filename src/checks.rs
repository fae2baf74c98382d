//! Assertions over a captured exchange.
//!
//! Every check returns `Error::AssertionFailed` (or a more specific
//! variant) instead of panicking, so a suite can record the failure
//! and move on to the next scenario.

use serde_json::Value;
use log::{debug, error};

/// Field names of the enhancement response
pub const SUCCESS_FIELD: &str = "success";
pub const REQUEST_TYPE_FIELD: &str = "requestType";
pub const ENHANCED_PROMPT_FIELD: &str = "enhancedPrompt";
pub const ERROR_FIELD: &str = "error";
pub const MESSAGE_FIELD: &str = "message";

/// Bullet glyph, and the same glyph decoded as Windows-1252
pub const BULLET_MARKERS: [&str; 2] = ["\u{2022}", "\u{e2}\u{20ac}\u{a2}"];

fn fail(msg: String) -> crate::error::Error
{   error!("{}", msg);
    crate::error::Error::AssertionFailed(msg)
}

/// Status must match, body must be non-blank JSON
pub fn expect_json(
  exchange: &crate::client::Exchange
, expected_status: u16
) -> Result<Value, crate::error::Error>
{   debug!(
      "Expecting status {}, got {}",
      expected_status, exchange.status
    );
    if exchange.status != expected_status
    {   error!(
          "Unexpected status {} (wanted {})",
          exchange.status, expected_status
        );
        return Err(crate::error::Error::UnexpectedStatus
        {   expected: expected_status
          , actual: exchange.status
          , body: exchange.body.clone()
        });
    }
    exchange.json()
}

/// Field must be present and not null
pub fn expect_field<'a>(
  json: &'a Value
, field: &str
) -> Result<&'a Value, crate::error::Error>
{   match json.get(field)
    {   Some(Value::Null) | None => {
          error!("Missing field: {}", field);
          Err(crate::error::Error::MissingField(field.to_string()))
        }
      , Some(value) => Ok(value)
    }
}

pub fn expect_success(json: &Value) -> Result<(), crate::error::Error>
{   match expect_field(json, SUCCESS_FIELD)?
    {   Value::Bool(true) => Ok(())
      , other => Err(fail(format!(
          "expected success=true, got {}", other
        )))
    }
}

/// Typed success body: `success=true`, both fields present,
/// non-blank `enhancedPrompt`
pub fn expect_enhance_response(
  json: &Value
) -> Result<crate::request::EnhanceResponse, crate::error::Error>
{   expect_success(json)?;
    expect_field(json, REQUEST_TYPE_FIELD)?;
    expect_field(json, ENHANCED_PROMPT_FIELD)?;
    let response: crate::request::EnhanceResponse
      = serde_json::from_value(json.clone())?;
    if response.enhanced_prompt.trim().is_empty()
    {   return Err(fail(
          format!("{} should not be empty", ENHANCED_PROMPT_FIELD)
        ));
    }
    Ok(response)
}

pub fn expect_request_type(
  response: &crate::request::EnhanceResponse
, expected: &crate::RequestType
) -> Result<(), crate::error::Error>
{   if &response.request_type != expected
    {   return Err(fail(format!(
          "expected requestType {:?}, got {:?}",
          expected.as_str(), response.request_type.as_str()
        )));
    }
    Ok(())
}

pub fn expect_single_paragraph(text: &str)
  -> Result<(), crate::error::Error>
{   if text.contains('\n')
    {   return Err(fail(
          "Enhanced prompt should be a single paragraph".to_string()
        ));
    }
    Ok(())
}

pub fn expect_no_markdown_bold(text: &str)
  -> Result<(), crate::error::Error>
{   if text.contains("**")
    {   return Err(fail(
          "No markdown headings or bold markers".to_string()
        ));
    }
    Ok(())
}

pub fn expect_no_bullets(text: &str)
  -> Result<(), crate::error::Error>
{   if BULLET_MARKERS.iter().any(|m| text.contains(m))
    {   return Err(fail("No bullet points".to_string()));
    }
    Ok(())
}

/// Case-sensitive substring
pub fn expect_contains(text: &str, needle: &str)
  -> Result<(), crate::error::Error>
{   if !text.contains(needle)
    {   return Err(fail(format!(
          "expected enhanced prompt to contain {:?}", needle
        )));
    }
    Ok(())
}

/// Case-insensitive substring
pub fn expect_contains_ci(text: &str, needle: &str)
  -> Result<(), crate::error::Error>
{   if !text.to_lowercase().contains(&needle.to_lowercase())
    {   return Err(fail(format!(
          "expected enhanced prompt to contain {:?} (any case)", needle
        )));
    }
    Ok(())
}

/// At least one needle, case-insensitive
pub fn expect_contains_any_ci(text: &str, needles: &[String])
  -> Result<(), crate::error::Error>
{   let lower = text.to_lowercase();
    if needles.is_empty()
      || needles.iter().any(|n| lower.contains(&n.to_lowercase()))
    {   return Ok(());
    }
    Err(fail(format!(
      "expected enhanced prompt to contain one of {:?}", needles
    )))
}

/// Both `error` and `message` must be present
pub fn expect_validation_error(
  json: &Value
) -> Result<crate::request::ValidationErrorResponse, crate::error::Error>
{   expect_field(json, ERROR_FIELD)?;
    expect_field(json, MESSAGE_FIELD)?;
    Ok(serde_json::from_value(json.clone())?)
}

pub fn expect_healthy(
  exchange: &crate::client::Exchange
) -> Result<(), crate::error::Error>
{   let json = expect_json(exchange, 200)?;
    let health: crate::request::HealthResponse
      = serde_json::from_value(json)?;
    if health.status != "healthy"
    {   return Err(fail(format!(
          "expected status \"healthy\", got {:?}", health.status
        )));
    }
    Ok(())
}

/// 2xx with CORS headers allowing POST
pub fn expect_cors_preflight(
  exchange: &crate::client::Exchange
) -> Result<(), crate::error::Error>
{   if !(200..300).contains(&exchange.status)
    {   return Err(crate::error::Error::UnexpectedStatus
        {   expected: 200
          , actual: exchange.status
          , body: exchange.body.clone()
        });
    }
    if exchange.header("access-control-allow-origin").is_none()
    {   return Err(fail(
          "missing access-control-allow-origin".to_string()
        ));
    }
    let methods = exchange
      .header("access-control-allow-methods")
      .unwrap_or_default();
    if !methods.to_uppercase().contains("POST")
    {   return Err(fail(format!(
          "access-control-allow-methods does not allow POST: {:?}",
          methods
        )));
    }
    Ok(())
}
