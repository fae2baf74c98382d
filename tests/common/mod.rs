//! In-process stand-in for the prompt enhancement service

#![allow(dead_code)]

use axum::{
  extract::State
, http::{header, HeaderMap, StatusCode}
, response::{IntoResponse, Response}
, routing::{get, post}
, Json, Router
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const GENERATE_PATH: &str = "/prod/generate-prompt";
pub const HEALTH_PATH: &str = "/health";

/// How the mock answers prompt submissions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockMode
{   /// Behaves like the production service
    Conforming
  , /// Multi-paragraph markdown with bullets
    Markdown
  , /// 200 with an empty body
    EmptyBody
  , /// 200 with a non-JSON body
    Garbage
  , /// Sleeps before answering
    Slow(Duration)
  , /// Classifies everything as `general`
    Unclassified
}

#[derive(Clone)]
struct MockState
{   mode: MockMode
  , seen: Arc<Mutex<Vec<SeenRequest>>>
}

#[derive(Debug, Clone)]
pub struct SeenRequest
{   pub content_type: Option<String>
  , pub body: Value
}

pub struct MockService
{   pub endpoint: String
  , pub health_endpoint: String
  , seen: Arc<Mutex<Vec<SeenRequest>>>
}

impl MockService
{   pub fn seen(&self) -> Vec<SeenRequest>
    {   self.seen.lock().unwrap().clone()
    }

    pub fn config(&self) -> promptcheck::HarnessConfig
    {   promptcheck::HarnessConfig::for_endpoint(self.endpoint.clone())
    }
}

pub async fn spawn_mock_service(mode: MockMode) -> MockService
{   let seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState
    {   mode
      , seen: seen.clone()
    };
    let app = Router::new()
      .route(GENERATE_PATH, post(generate).options(preflight))
      .route(HEALTH_PATH, get(health))
      .with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
      .await
      .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });

    MockService
    {   endpoint: format!("http://{}{}", addr, GENERATE_PATH)
      , health_endpoint: format!("http://{}{}", addr, HEALTH_PATH)
      , seen
    }
}

fn classify(prompt: &str) -> (&'static str, String)
{   let lower = prompt.to_lowercase();
    if lower.contains("poem") || lower.contains("poetry")
    {   ( "poetry"
        , "Write an original free-verse poem about AI that explores how \
           artificial intelligence learns, dreams and reflects its makers, \
           using vivid imagery and a hopeful closing stanza."
            .to_string()
        )
    } else if lower.contains("image") || lower.contains("photo")
    {   ( "image_generation"
        , "Edit the provided image so the subject appears as a regal \
           Hyderabad nawab, remove the red flower from his hand and keep a \
           dignified royal pose; this prompt preserves the original lighting."
            .to_string()
        )
    } else if lower.contains("app") || lower.contains("iphone")
    {   ( "app_development"
        , "Build a native iOS todo app in SwiftUI with email login, \
           persistent task lists, due dates and reminders, following Apple \
           human interface guidelines."
            .to_string()
        )
    } else
    {   ( "general"
        , format!(
            "Explain the following in simple, friendly language with one \
             everyday analogy: {}",
            prompt.trim()
          )
        )
    }
}

fn validation_error(error: &str, message: &str, code: &str) -> Response
{   ( StatusCode::BAD_REQUEST
    , Json(json!({ "error": error, "message": message, "code": code }))
    ).into_response()
}

async fn generate(
  State(state): State<MockState>
, headers: HeaderMap
, Json(body): Json<Value>
) -> Response
{   state.seen.lock().unwrap().push(SeenRequest
    {   content_type: headers
          .get(header::CONTENT_TYPE)
          .and_then(|v| v.to_str().ok())
          .map(|v| v.to_string())
      , body: body.clone()
    });

    match state.mode
    {   MockMode::EmptyBody => {
          return (StatusCode::OK, "").into_response();
        }
      , MockMode::Garbage => {
          return (StatusCode::OK, "<html>oops</html>").into_response();
        }
      , MockMode::Slow(delay) => tokio::time::sleep(delay).await
      , _ => {}
    }

    let prompt = body.get("prompt")
      .and_then(Value::as_str)
      .unwrap_or_default();
    if prompt.trim().is_empty()
    {   return validation_error(
          "Prompt is required",
          "Please provide a non-empty prompt",
          "MISSING_PROMPT"
        );
    }
    if prompt.chars().count() > 10_000
    {   return validation_error(
          "Prompt too long",
          "Prompt exceeds maximum length of 10,000 characters",
          "PROMPT_TOO_LONG"
        );
    }

    let (request_type, enhanced) = match state.mode
    {   MockMode::Unclassified => ("general", classify(prompt).1)
      , _ => classify(prompt)
    };
    let enhanced = match state.mode
    {   MockMode::Markdown => {
          format!("**Task**\n\u{2022} {}\n\n**Tone**", enhanced)
        }
      , _ => enhanced
    };

    ( StatusCode::OK
    , Json(json!({
        "success": true,
        "requestType": request_type,
        "enhancedPrompt": enhanced,
      }))
    ).into_response()
}

async fn preflight() -> Response
{   ( StatusCode::NO_CONTENT
    , [ (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
      , (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS")
      , (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization")
      ]
    ).into_response()
}

async fn health() -> Json<Value>
{   Json(json!({ "status": "healthy", "version": "1.0.0" }))
}
