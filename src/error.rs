//! Error type for gateway operations

/// Every stage of the moderation and completion pipelines
/// fails with its own variant, so callers can tell where
/// a call stopped.
#[derive(Debug, thiserror::Error)]
pub enum Error
{   /// A required argument was empty
    #[error("one or more argument values are missing: {0}")]
    Validation(String)
  , /// Request body could not be encoded
    #[error("error while encoding request body: {0}")]
    Serialize(#[source] serde_json::Error)
  , /// HTTP request could not be constructed
    #[error("error while creating request: {0}")]
    RequestBuild(#[source] reqwest::Error)
  , /// Request never produced a response
    #[error("error while making a request: {0}")]
    Network(#[source] reqwest::Error)
  , /// Response body could not be read
    #[error("error while reading response body: {0}")]
    ResponseRead(#[source] reqwest::Error)
  , /// Provider answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api
    {   status: u16
      , message: String
    }
  , /// Response body did not match the expected shape
    #[error("error while decoding response body: {0}")]
    Deserialize(#[source] serde_json::Error)
  , /// Moderation response carried no result entries
    #[error("no results returned from moderations api")]
    EmptyResults
  , /// Completion response carried no choices
    #[error("no choices returned from chat completions api")]
    NoChoices
  , /// Model reply text was not a valid `ModelResponse`
    #[error("error while decoding model reply: {0}")]
    ModelReplyDecode(#[source] serde_json::Error)
  , /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String)
}

pub type Result<T> = std::result::Result<T, Error>;
