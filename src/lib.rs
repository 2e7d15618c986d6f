//! Outbound gateway to an OpenAI-compatible LLM API.
//!
//! Two call paths, each a single round trip:
//! moderation (`send_to_moderations`) and chat completion
//! (`send_to_model`). The model is expected to reply with a
//! JSON `ModelResponse`.

pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod client;
use serde::{Deserialize, Serialize};

pub use client::{send_to_model, send_to_moderations, Gateway};
pub use config::GatewayConfig;
pub use error::{Error, Result};

// ===== UserMessage =====

/// A message from a caller, passed into every call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserMessage
{   /// Caller-identifying id, used to scope log lines
    pub uid: String
  , /// Target model name, for both moderation and completion
    pub model: String
  , /// Raw message text
    pub text: String
}

impl UserMessage
{   pub fn new(
      uid: impl Into<String>
    , model: impl Into<String>
    , text: impl Into<String>
    ) -> Self
    {   UserMessage
        {   uid: uid.into()
          , model: model.into()
          , text: text.into()
        }
    }
}

// ===== SystemPrompt =====

/// Free-text fragments making up the system instruction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemPrompt
{   pub scenario: String
  , pub speech_style: String
  , pub level: String
  , pub user_type: String
  , pub role: String
  , pub role_flavor: String
  , pub mission: String
  , /// Conversation so far, sent as the "History: " message
    pub history: String
}

impl SystemPrompt
{   /// Concatenation of mission, user type, role and role
    /// flavor, in that order. Provider-side prompts rely on
    /// this order.
    pub fn system_instruction(&self) -> String
    {   [
          self.mission.as_str()
        , self.user_type.as_str()
        , self.role.as_str()
        , self.role_flavor.as_str()
        ].concat()
    }
}

// ===== ModelResponse =====

/// Reply the model encodes as JSON in its message content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelResponse
{   pub sender: String
  , #[serde(rename = "type")]
    pub message_type: String
  , pub content: String
}
