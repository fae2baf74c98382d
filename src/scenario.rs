//! Named conformance scenarios

use log::debug;
use crate::checks;

/// What a scenario sends
#[derive(Debug, Clone, PartialEq)]
pub enum Probe
{   /// POST `{"prompt": ...}`
    Prompt(String)
  , /// GET the health endpoint
    Health
  , /// OPTIONS on the endpoint
    Preflight
}

/// What a scenario expects back
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation
{   /// HTTP 200 with `success=true` and a single paragraph
    Enhanced
    {   request_type: Option<crate::RequestType>
      , contains: Vec<String>
      , contains_ci: Vec<String>
      , contains_any_ci: Vec<String>
      , /// Also reject markdown bold and bullets
        strict_formatting: bool
    }
  , /// HTTP 400 with `error` and `message`
    ValidationError
  , Healthy
  , CorsPreflight
}

impl Expectation
{   /// Bare enhancement expectation: 200, success, single paragraph
    pub fn enhanced() -> Self
    {   Expectation::Enhanced
        {   request_type: None
          , contains: vec![]
          , contains_ci: vec![]
          , contains_any_ci: vec![]
          , strict_formatting: false
        }
    }

    /// Check a captured exchange against this expectation
    pub fn verify(
      &self
    , exchange: &crate::client::Exchange
    ) -> Result<(), crate::error::Error>
    {   match self
        {   Expectation::Enhanced {
              request_type,
              contains,
              contains_ci,
              contains_any_ci,
              strict_formatting,
            } => {
              let json = checks::expect_json(exchange, 200)?;
              let response = checks::expect_enhance_response(&json)?;
              if let Some(expected) = request_type
              {   checks::expect_request_type(&response, expected)?;
              }
              let enhanced = response.enhanced_prompt.as_str();
              checks::expect_single_paragraph(enhanced)?;
              if *strict_formatting
              {   checks::expect_no_markdown_bold(enhanced)?;
                  checks::expect_no_bullets(enhanced)?;
              }
              for needle in contains
              {   checks::expect_contains(enhanced, needle)?;
              }
              for needle in contains_ci
              {   checks::expect_contains_ci(enhanced, needle)?;
              }
              checks::expect_contains_any_ci(enhanced, contains_any_ci)
            }
          , Expectation::ValidationError => {
              let json = checks::expect_json(exchange, 400)?;
              checks::expect_validation_error(&json)?;
              Ok(())
            }
          , Expectation::Healthy => {
              checks::expect_healthy(exchange)
            }
          , Expectation::CorsPreflight => {
              checks::expect_cors_preflight(exchange)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario
{   pub name: String
  , pub probe: Probe
  , pub expectation: Expectation
}

impl Scenario
{   pub fn new(
      name: impl Into<String>
    , probe: Probe
    , expectation: Expectation
    ) -> Self
    {   Scenario
        {   name: name.into()
          , probe
          , expectation
        }
    }

    /// Prompt scenario expecting a successful enhancement
    pub fn enhanced(
      name: impl Into<String>
    , prompt: impl Into<String>
    , expectation: Expectation
    ) -> Self
    {   Scenario::new(name, Probe::Prompt(prompt.into()), expectation)
    }

    /// Prompt scenario expecting a 400 validation error
    pub fn rejected(
      name: impl Into<String>
    , prompt: impl Into<String>
    ) -> Self
    {   Scenario::new(
          name,
          Probe::Prompt(prompt.into()),
          Expectation::ValidationError
        )
    }
}

fn strings(items: &[&str]) -> Vec<String>
{   items.iter().map(|s| s.to_string()).collect()
}

/// The scenarios every deployment must pass
pub fn standard_scenarios() -> Vec<Scenario>
{   debug!("Building standard scenarios");
    vec![
      Scenario::enhanced(
        "poem_prompt_returns_paragraph_only_and_poetry_type"
      , "write a poem on ai"
      , Expectation::Enhanced
        {   request_type: Some(crate::RequestType::Poetry)
          , contains: strings(&["AI"])
          , contains_ci: strings(&["poem"])
          , contains_any_ci: vec![]
          , strict_formatting: true
        }
      )
    , Scenario::enhanced(
        "image_edit_prompt_returns_image_generation_type"
      , "Convert this image to Hyderabad nawab like a ruler and remove \
         the red flower in hand keep him like a king"
      , Expectation::Enhanced
        {   request_type: Some(crate::RequestType::ImageGeneration)
          , contains: vec![]
          , contains_ci: vec![]
          , contains_any_ci: strings(&["image", "prompt"])
          , strict_formatting: false
        }
      )
    , Scenario::enhanced(
        "app_prompt_returns_app_development_type"
      , "build a todo app for iphone with login"
      , Expectation::Enhanced
        {   request_type: Some(crate::RequestType::AppDevelopment)
          , contains: vec![]
          , contains_ci: strings(&["ios"])
          , contains_any_ci: vec![]
          , strict_formatting: false
        }
      )
    , Scenario::enhanced(
        "general_prompt_returns_paragraph_only"
      , "Explain quantum computing like I'm five"
      , Expectation::enhanced()
      )
    , Scenario::rejected(
        "missing_prompt_returns_validation_error"
      , ""
      )
    , Scenario::rejected(
        "empty_prompt_returns_validation_error"
      , "   "
      )
    , Scenario::rejected(
        "too_long_prompt_returns_validation_error"
      , "a".repeat(crate::MAX_PROMPT_CHARS + 1)
      )
    ]
}

/// Health and preflight probes, when the config asks for them
pub fn optional_scenarios(
  config: &crate::config::HarnessConfig
) -> Vec<Scenario>
{   let mut scenarios = vec![];
    if config.health_endpoint.is_some()
    {   scenarios.push(Scenario::new(
          "health_endpoint_reports_healthy",
          Probe::Health,
          Expectation::Healthy
        ));
    }
    if config.check_preflight
    {   scenarios.push(Scenario::new(
          "preflight_allows_post",
          Probe::Preflight,
          Expectation::CorsPreflight
        ));
    }
    scenarios
}
