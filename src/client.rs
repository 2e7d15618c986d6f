use log::{debug, error};
use crate::error::{Error, Result};
use crate::providers::OpenAiClient;
use crate::request::{build_completions_request, build_moderations_request};

const MODERATION_TARGET: &str = "language_gateway::moderation";
const COMPLETION_TARGET: &str = "language_gateway::completion";

/// Caller-facing entry points: build a request, then invoke
/// the endpoint. A failed stage aborts the remaining ones.
#[derive(Debug, Clone)]
pub struct Gateway
{   client: OpenAiClient
}

impl Default for Gateway
{   fn default() -> Self
    {   Gateway::new(&crate::config::GatewayConfig::default())
    }
}

impl Gateway
{   pub fn new(config: &crate::config::GatewayConfig) -> Self
    {   Gateway
        {   client: OpenAiClient::new(config)
        }
    }

    /// Underlying endpoint invoker
    pub fn client(&self) -> &OpenAiClient
    {   &self.client
    }

    /// Check a message against the moderation policy.
    /// Returns `true` when the message was flagged.
    pub async fn send_to_moderations(
      &self
    , message: &crate::UserMessage
    , api_key: &str
    ) -> Result<bool>
    {   debug!(
          target: MODERATION_TARGET,
          "uid={} building moderation request", message.uid
        );
        let request = build_moderations_request(
          &message.text
        , &message.model
        , api_key
        ).map_err(|e| {
          debug!(
            target: MODERATION_TARGET,
            "uid={} build failed: {}", message.uid, e
          );
          e
        })?;

        let flagged = self.client
          .moderation_endpoint(&request)
          .await
          .map_err(|e| {
            debug!(
              target: MODERATION_TARGET,
              "uid={} moderation call failed: {}", message.uid, e
            );
            e
          })?;

        debug!(
          target: MODERATION_TARGET,
          "uid={} flagged={}", message.uid, flagged
        );
        Ok(flagged)
    }

    /// Ask the model for a reply and decode it as a `ModelResponse`
    pub async fn send_to_model(
      &self
    , message: &crate::UserMessage
    , system_prompt: &crate::SystemPrompt
    , api_key: &str
    ) -> Result<crate::ModelResponse>
    {   debug!(
          target: COMPLETION_TARGET,
          "uid={} building completion request", message.uid
        );
        let request = build_completions_request(
          &message.model
        , system_prompt
        , &message.text
        , api_key
        ).map_err(|e| {
          debug!(
            target: COMPLETION_TARGET,
            "uid={} build failed: {}", message.uid, e
          );
          e
        })?;

        let response = self.client
          .chat_completions_endpoint(&request)
          .await
          .map_err(|e| {
            debug!(
              target: COMPLETION_TARGET,
              "uid={} completion call failed: {}", message.uid, e
            );
            e
          })?;

        let choice = response.choices.first().ok_or_else(|| {
          error!(
            target: COMPLETION_TARGET,
            "uid={} no choices in response", message.uid
          );
          Error::NoChoices
        })?;

        let reply: crate::ModelResponse
          = serde_json::from_str(
              choice.message.content.as_deref().unwrap_or_default()
            )
            .map_err(|e| {
              error!(
                target: COMPLETION_TARGET,
                "uid={} model reply is not a ModelResponse: {}",
                message.uid, e
              );
              Error::ModelReplyDecode(e)
            })?;

        debug!(
          target: COMPLETION_TARGET,
          "uid={} reply from {} ({})",
          message.uid, reply.sender, reply.message_type
        );
        Ok(reply)
    }
}

/// `Gateway::send_to_moderations` against the default provider
pub async fn send_to_moderations(
  message: &crate::UserMessage
, api_key: &str
) -> Result<bool>
{   Gateway::default()
      .send_to_moderations(message, api_key)
      .await
}

/// `Gateway::send_to_model` against the default provider
pub async fn send_to_model(
  message: &crate::UserMessage
, system_prompt: &crate::SystemPrompt
, api_key: &str
) -> Result<crate::ModelResponse>
{   Gateway::default()
      .send_to_model(message, system_prompt, api_key)
      .await
}
