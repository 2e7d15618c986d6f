//! Request types and their builders

use std::fmt;
use serde::{Deserialize, Serialize};
use log::error;
use crate::error::{Error, Result};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::User, content: content.into() }
    }
}

// ===== Moderations =====

/// Input for a single moderation call
#[derive(Clone, PartialEq, Eq)]
pub struct ModerationRequest
{   pub api_key: String
  , pub model: String
  , pub input: String
}

impl ModerationRequest
{   /// JSON body sent to the moderations endpoint
    pub fn body(&self) -> ModerationBody<'_>
    {   ModerationBody
        {   input: &self.input
          , model: &self.model
        }
    }
}

impl fmt::Debug for ModerationRequest
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("ModerationRequest")
          .field("api_key", &"<redacted>")
          .field("model", &self.model)
          .field("input", &self.input)
          .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct ModerationBody<'a>
{   pub input: &'a str
  , pub model: &'a str
}

// ===== Chat Completions =====

/// Input for a single chat completion call
#[derive(Clone, PartialEq, Eq)]
pub struct CompletionRequest
{   pub api_key: String
  , pub model: String
  , pub messages: Vec<ChatMessage>
}

impl CompletionRequest
{   /// JSON body sent to the chat completions endpoint
    pub fn body(&self) -> CompletionBody<'_>
    {   CompletionBody
        {   model: &self.model
          , messages: &self.messages
        }
    }
}

impl fmt::Debug for CompletionRequest
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("CompletionRequest")
          .field("api_key", &"<redacted>")
          .field("model", &self.model)
          .field("messages", &self.messages)
          .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionBody<'a>
{   pub model: &'a str
  , pub messages: &'a [ChatMessage]
}

// ===== Builders =====

fn missing_fields(fields: &[(&'static str, &str)]) -> Result<()>
{   let missing: Vec<&str> = fields
      .iter()
      .filter(|(_, value)| value.is_empty())
      .map(|(name, _)| *name)
      .collect();

    if missing.is_empty()
    {   return Ok(());
    }

    let names = missing.join(", ");
    error!("Missing required arguments: {}", names);
    Err(Error::Validation(names))
}

/// Build a moderation request; every argument is required
pub fn build_moderations_request(
  text: &str
, model: &str
, api_key: &str
) -> Result<ModerationRequest>
{   missing_fields(&[
      ("text", text)
    , ("model", model)
    , ("api_key", api_key)
    ])?;

    Ok(ModerationRequest
    {   api_key: api_key.to_string()
      , model: model.to_string()
      , input: text.to_string()
    })
}

/// Build a chat completion request.
///
/// An empty `user_message` starts a conversation and yields only
/// the system instruction. Otherwise the request carries the
/// system instruction, the history and the new message, in that
/// order.
pub fn build_completions_request(
  model: &str
, system_prompt: &crate::SystemPrompt
, user_message: &str
, api_key: &str
) -> Result<CompletionRequest>
{   missing_fields(&[
      ("model", model)
    , ("api_key", api_key)
    ])?;

    let system = ChatMessage::system(
      system_prompt.system_instruction()
    );

    let messages = if user_message.is_empty()
    {   vec![system]
    } else
    {   vec![
          system
        , ChatMessage::user(
            format!("History: {}", system_prompt.history)
          )
        , ChatMessage::user(
            format!("New Message: {}", user_message)
          )
        ]
    };

    Ok(CompletionRequest
    {   api_key: api_key.to_string()
      , model: model.to_string()
      , messages
    })
}
