use std::collections::HashMap;
use tokio::sync::mpsc;
use log::{debug, trace, error, info};

// ===== Exchange =====

/// One captured HTTP call: status, lowercased headers, full body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange
{   pub status: u16
  , pub headers: HashMap<String, String>
  , pub body: String
}

impl Exchange
{   /// Parse the body as JSON; a blank body is an error
    pub fn json(&self)
      -> Result<serde_json::Value, crate::error::Error>
    {   if self.body.trim().is_empty()
        {   error!("Empty response body (status {})", self.status);
            return Err(crate::error::Error::EmptyBody);
        }
        serde_json::from_str(&self.body).map_err(|e| {
          error!("Response body is not JSON: {}", e);
          crate::error::Error::ParseError(e.to_string())
        })
    }

    /// Header lookup, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str>
    {   self.headers
          .get(&name.to_ascii_lowercase())
          .map(|v| v.as_str())
    }
}

// ===== Client Actor =====

/// Commands for the client task
pub enum ClientCommand
{   SubmitPrompt
    {   request: crate::request::PromptRequest
      , reply: crate::ExchangeReplySender
    }
  , CheckHealth
    {   url: String
      , reply: crate::ExchangeReplySender
    }
  , Preflight
    {   reply: crate::ExchangeReplySender
    }
  , Shutdown
}

/// State owned by the client task
pub struct ClientState
{   endpoint: String
  , http_client: reqwest::Client
}

impl ClientState
{   pub fn new(config: &crate::config::HarnessConfig)
      -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating ClientState for {} ({} ms timeout)",
          config.endpoint, config.timeout_ms
        );
        let http_client = reqwest::Client::builder()
          .timeout(config.timeout())
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;
        Ok(ClientState
        {   endpoint: config.endpoint.clone()
          , http_client
        })
    }

    async fn handle_submit_prompt(
      &self
    , request: crate::request::PromptRequest
    ) -> Result<Exchange, crate::error::Error>
    {   debug!(
          "Submitting prompt ({} chars)",
          request.prompt.chars().count()
        );
        trace!("Prompt request: {:?}", request);

        let response = self.http_client
          .post(&self.endpoint)
          .header("Content-Type", "application/json")
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from(e)
          })?;

        capture(response).await
    }

    async fn handle_check_health(
      &self
    , url: String
    ) -> Result<Exchange, crate::error::Error>
    {   debug!("Checking health at {}", url);

        let response = self.http_client
          .get(&url)
          .send()
          .await
          .map_err(|e| {
            error!("Health check failed: {}", e);
            crate::error::Error::from(e)
          })?;

        capture(response).await
    }

    async fn handle_preflight(
      &self
    ) -> Result<Exchange, crate::error::Error>
    {   debug!("Sending CORS preflight to {}", self.endpoint);

        let response = self.http_client
          .request(reqwest::Method::OPTIONS, &self.endpoint)
          .header("Origin", "http://localhost")
          .header("Access-Control-Request-Method", "POST")
          .header("Access-Control-Request-Headers", "content-type")
          .send()
          .await
          .map_err(|e| {
            error!("Preflight failed: {}", e);
            crate::error::Error::from(e)
          })?;

        capture(response).await
    }
}

/// Read status, headers and the whole body
async fn capture(
  response: reqwest::Response
) -> Result<Exchange, crate::error::Error>
{   let status = response.status().as_u16();
    trace!("Response status: {}", status);

    let headers: HashMap<String, String>
      = response.headers()
        .iter()
        .filter_map(|(name, value)| {
          value.to_str().ok().map(|v| {
            (name.as_str().to_ascii_lowercase(), v.to_string())
          })
        })
        .collect();

    let body = response.text().await.map_err(|e| {
      error!("Failed to read response body: {}", e);
      crate::error::Error::from(e)
    })?;
    trace!("Response body: {}", body);

    Ok(Exchange
    {   status
      , headers
      , body
    })
}

/// Public client interface - one per suite
pub struct ConformanceClient
{   tx: mpsc::UnboundedSender<ClientCommand>
  , language: Option<String>
  , health_endpoint: Option<String>
  , task: tokio::task::JoinHandle<()>
}

impl ConformanceClient
{   /// Create and spawn the client task.
    /// Must be called inside a tokio runtime.
    pub fn new(
      config: &crate::config::HarnessConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating ConformanceClient");
        config.validate()?;
        let state = ClientState::new(config)?;

        let (cmd_tx, cmd_rx)
          = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
          run_client_loop(cmd_rx, state).await;
        });

        Ok(ConformanceClient
        {   tx: cmd_tx
          , language: config.language.clone()
          , health_endpoint: config.health_endpoint.clone()
          , task
        })
    }

    /// POST `{"prompt": ...}` and capture the exchange
    pub async fn submit_prompt(
      &self
    , prompt: impl Into<String>
    ) -> Result<Exchange, crate::error::Error>
    {   let request = crate::request::PromptRequest
        {   prompt: prompt.into()
          , language: self.language.clone()
        };
        self.dispatch(|reply| ClientCommand::SubmitPrompt {
          request,
          reply,
        }).await
    }

    /// GET the configured health endpoint
    pub async fn check_health(
      &self
    ) -> Result<Exchange, crate::error::Error>
    {   let url = self.health_endpoint.clone()
          .ok_or_else(|| {
            crate::error::Error::InvalidConfiguration(
              "no health endpoint configured".to_string()
            )
          })?;
        self.dispatch(|reply| ClientCommand::CheckHealth {
          url,
          reply,
        }).await
    }

    /// OPTIONS on the endpoint
    pub async fn preflight(
      &self
    ) -> Result<Exchange, crate::error::Error>
    {   self.dispatch(|reply| ClientCommand::Preflight {
          reply,
        }).await
    }

    async fn dispatch(
      &self
    , build: impl FnOnce(crate::ExchangeReplySender) -> ClientCommand
    ) -> Result<Exchange, crate::error::Error>
    {   let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        self.tx.send(build(reply_tx)).map_err(|_| {
          error!("Client task disconnected");
          crate::error::Error::ClientShutdown
        })?;

        match reply_rx.recv().await
        {   Some(result) => result
          , None => {
              error!("Client task dropped the reply");
              Err(crate::error::Error::ClientShutdown)
            }
        }
    }

    /// Release the HTTP client and wait for the task to finish
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down ConformanceClient");
        self.tx.send(ClientCommand::Shutdown)
          .map_err(|_| crate::error::Error::ClientShutdown)?;
        self.task.await.map_err(|e| {
          error!("Client task panicked: {}", e);
          crate::error::Error::Other(e.to_string())
        })
    }
}

/// Main client event loop.
/// Commands are handled one at a time, so calls never overlap.
async fn run_client_loop(
  mut cmd_rx: mpsc::UnboundedReceiver<ClientCommand>
, state: ClientState
)
{   debug!("Starting client loop");

    loop
    { match cmd_rx.recv().await
      {   Some(ClientCommand::SubmitPrompt { request, reply }) => {
            debug!("Processing SubmitPrompt");
            let result = state.handle_submit_prompt(request).await;
            let _ = reply.send(result);
          }
        , Some(ClientCommand::CheckHealth { url, reply }) => {
            debug!("Processing CheckHealth");
            let result = state.handle_check_health(url).await;
            let _ = reply.send(result);
          }
        , Some(ClientCommand::Preflight { reply }) => {
            debug!("Processing Preflight");
            let result = state.handle_preflight().await;
            let _ = reply.send(result);
          }
        , Some(ClientCommand::Shutdown) => {
            info!("Conformance client shutting down");
            break;
          }
        , None => {
            debug!("Command channel closed");
            break;
          }
      }
    }
}
