use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use log::{debug, trace, error};
use crate::error::{Error, Result};
use crate::request::{CompletionRequest, ModerationRequest};

// ===== Moderation Response Types =====

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModerationsResponse
{   #[serde(default)]
    pub id: String
  , #[serde(default)]
    pub model: String
  , #[serde(default)]
    pub results: Vec<ModerationEntry>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModerationEntry
{   #[serde(default)]
    pub categories: Categories
  , #[serde(default)]
    pub category_scores: CategoryScores
  , #[serde(default)]
    pub flagged: bool
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Categories
{   pub hate: bool
  , #[serde(rename = "hate/threatening")]
    pub hate_threatening: bool
  , #[serde(rename = "self-harm")]
    pub self_harm: bool
  , pub sexual: bool
  , #[serde(rename = "sexual/minors")]
    pub sexual_minors: bool
  , pub violence: bool
  , #[serde(rename = "violence/graphic")]
    pub violence_graphic: bool
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryScores
{   pub hate: f64
  , #[serde(rename = "hate/threatening")]
    pub hate_threatening: f64
  , #[serde(rename = "self-harm")]
    pub self_harm: f64
  , pub sexual: f64
  , #[serde(rename = "sexual/minors")]
    pub sexual_minors: f64
  , pub violence: f64
  , #[serde(rename = "violence/graphic")]
    pub violence_graphic: f64
}

// ===== Chat Completion Response Types =====

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionsResponse
{   #[serde(default)]
    pub id: String
  , #[serde(default)]
    pub object: String
  , #[serde(default)]
    pub created: i64
  , #[serde(default)]
    pub model: String
  , #[serde(default)]
    pub choices: Vec<Choice>
  , #[serde(default)]
    pub usage: Usage
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub index: u32
  , pub message: ReplyMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
  , /// Usually null; kept untyped
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>
}

/// Assistant message inside a choice. Content is null for
/// refusals and tool calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplyMessage
{   pub role: Option<String>
  , pub content: Option<String>
  , pub refusal: Option<String>
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Usage
{   pub prompt_tokens: u32
  , pub completion_tokens: u32
  , pub total_tokens: u32
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody
{   error: ApiErrorDetail
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail
{   message: String
}

// ===== Client =====

/// Invokes the moderations and chat completions endpoints.
///
/// Every call is a single round trip: no retries, no timeout.
#[derive(Debug, Clone)]
pub struct OpenAiClient
{   api_base: String
  , http_client: reqwest::Client
}

impl OpenAiClient
{   pub fn new(config: &crate::config::GatewayConfig) -> Self
    {   debug!(
          "Creating OpenAiClient for {} at {}",
          config.name, config.api_base
        );
        OpenAiClient
        {   api_base: config.api_base.clone()
          , http_client: reqwest::Client::new()
        }
    }

    pub fn api_base(&self) -> &str
    {   &self.api_base
    }

    /// POST to the moderations endpoint and decode the full response
    pub async fn moderations(
      &self
    , request: &ModerationRequest
    ) -> Result<ModerationsResponse>
    {   debug!("moderations: model={}", request.model);
        self.post_json(
          "moderations"
        , &request.api_key
        , &request.body()
        ).await
    }

    /// Flag of the last moderation result entry.
    ///
    /// The provider may return several entries; only the last
    /// one is consulted.
    pub async fn moderation_endpoint(
      &self
    , request: &ModerationRequest
    ) -> Result<bool>
    {   let response = self.moderations(request).await?;

        match response.results.last()
        {   Some(entry) => {
              debug!(
                "moderations: {} result(s), last flagged={}",
                response.results.len(),
                entry.flagged
              );
              Ok(entry.flagged)
            }
          , None => {
              error!("No results in moderations response");
              Err(Error::EmptyResults)
            }
        }
    }

    /// POST to the chat completions endpoint
    pub async fn chat_completions_endpoint(
      &self
    , request: &CompletionRequest
    ) -> Result<CompletionsResponse>
    {   debug!(
          "chat_completions: model={}, {} message(s)",
          request.model,
          request.messages.len()
        );
        self.post_json(
          "chat/completions"
        , &request.api_key
        , &request.body()
        ).await
    }

    /// Shared pipeline: encode, build, send, read, check status, decode
    async fn post_json<B, R>(
      &self
    , path: &str
    , api_key: &str
    , body: &B
    ) -> Result<R>
    where
      B: Serialize
    , R: DeserializeOwned
    {   let url = format!("{}/{}", self.api_base, path);

        let payload = serde_json::to_vec(body).map_err(|e| {
          error!("Encode error for {}: {}", path, e);
          Error::Serialize(e)
        })?;
        trace!(
          "POST {} body: {}",
          url,
          String::from_utf8_lossy(&payload)
        );

        let http_request = self.http_client
          .post(&url)
          .header("Content-Type", "application/json")
          .header("Authorization", format!("Bearer {}", api_key))
          .body(payload)
          .build()
          .map_err(|e| {
            error!("Failed to build request for {}: {}", url, e);
            Error::RequestBuild(e)
          })?;

        let response = self.http_client
          .execute(http_request)
          .await
          .map_err(|e| {
            error!("HTTP error for {}: {}", url, e);
            Error::Network(e)
          })?;

        let status = response.status();
        trace!("{} response status: {}", path, status);

        let bytes = response.bytes().await.map_err(|e| {
          error!("Failed to read {} response: {}", path, e);
          Error::ResponseRead(e)
        })?;
        trace!(
          "{} response body: {}",
          path,
          String::from_utf8_lossy(&bytes)
        );

        if !status.is_success()
        {   let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
              .map(|b| b.error.message)
              .unwrap_or_else(|_| {
                String::from_utf8_lossy(&bytes).into_owned()
              });
            error!("API error from {} ({}): {}", path, status, message);
            return Err(Error::Api
            {   status: status.as_u16()
              , message
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
          error!("Parse error for {}: {}", path, e);
          Error::Deserialize(e)
        })
    }
}
