//! Configuration for the provider endpoint

use serde::{Deserialize, Serialize};
use log::debug;
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str
  = "https://api.openai.com/v1";

/// Overrides `api_base` in `GatewayConfig::from_env`
pub const API_BASE_ENV: &str = "LANGUAGE_GATEWAY_API_BASE";

/// Provider configuration
///
/// Credentials are not part of the config; callers hand
/// an API key to every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig
{   /// Provider name
    #[serde(default = "default_name")]
    pub name: String
  , /// API base URL, without the endpoint path
    #[serde(default = "default_api_base")]
    pub api_base: String
}

fn default_name() -> String
{   "openai".to_string()
}

fn default_api_base() -> String
{   DEFAULT_API_BASE.to_string()
}

impl Default for GatewayConfig
{   fn default() -> Self
    {   GatewayConfig
        {   name: default_name()
          , api_base: default_api_base()
        }
    }
}

impl GatewayConfig
{   /// Config pointing at a custom base URL
    pub fn with_api_base(api_base: impl Into<String>)
      -> Result<Self>
    {   GatewayConfig
        {   api_base: api_base.into()
          , ..GatewayConfig::default()
        }.validated()
    }

    /// Parse config from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self>
    {   let config: GatewayConfig
          = serde_json::from_str(json).map_err(|e| {
            Error::InvalidConfiguration(e.to_string())
          })?;
        config.validated()
    }

    /// Load config from a JSON file
    pub fn from_json_file(
      path: impl AsRef<std::path::Path>
    ) -> Result<Self>
    {   let path = path.as_ref();
        debug!("Loading gateway config from {}", path.display());
        let json = std::fs::read_to_string(path)
          .map_err(|e| {
            Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;
        Self::from_json_str(&json)
    }

    /// Default config, with `api_base` taken from
    /// `LANGUAGE_GATEWAY_API_BASE` when set
    pub fn from_env() -> Result<Self>
    {   match std::env::var(API_BASE_ENV)
        {   Ok(api_base) => {
              debug!("Using {} from environment", API_BASE_ENV);
              Self::with_api_base(api_base)
            }
          , Err(_) => Ok(GatewayConfig::default())
        }
    }

    fn validated(mut self) -> Result<Self>
    {   let trimmed = self.api_base.trim().trim_end_matches('/');
        if trimmed.is_empty()
        {   return Err(Error::InvalidConfiguration(
              "api_base must not be empty".to_string()
            ));
        }
        reqwest::Url::parse(trimmed).map_err(|e| {
          Error::InvalidConfiguration(
            format!("api_base {:?} is not a valid URL: {}", trimmed, e)
          )
        })?;
        self.api_base = trimmed.to_string();
        Ok(self)
    }
}
