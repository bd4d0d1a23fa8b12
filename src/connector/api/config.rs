use std::path::{Path, PathBuf};

use tracing::debug;

use crate::connector::adapter::{
    DEFAULT_BASE_URL, DEFAULT_GATEWAY_URL, DEFAULT_HITS_PER_PAGE, DEFAULT_INDEX_NAME,
    DEFAULT_MODEL,
};
use crate::domain::DomainError;

pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// External services a command depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// The OpenAI text-generation API.
    Generation,
    /// The Algolia transformation index.
    Search,
}

/// Process configuration, read once at startup.
///
/// | Variable                   | Default                   |
/// |----------------------------|---------------------------|
/// | `OPENAI_API_KEY`           | required for generation   |
/// | `OPENAI_BASE_URL`          | `https://api.openai.com`  |
/// | `OPENAI_MODEL`             | `gpt-4o`                  |
/// | `OPENAI_TEMPERATURE`       | `1.0`                     |
/// | `OPENAI_MAX_OUTPUT_TOKENS` | `2048`                    |
/// | `TRANSFORMBOT_PORT`        | `3002`                    |
/// | `ALGOLIA_APP_ID`           | required for search       |
/// | `ALGOLIA_SEARCH_KEY`       | required for search       |
/// | `ALGOLIA_INDEX_NAME`       | `prod_transformations_en` |
/// | `ALGOLIA_HITS_PER_PAGE`    | `5`                       |
/// | `TRANSFORMBOT_GATEWAY_URL` | `http://localhost:3002`   |
///
/// Empty values count as unset.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub port: u16,
    pub algolia_app_id: Option<String>,
    pub algolia_search_key: Option<String>,
    pub index_name: String,
    pub hits_per_page: u32,
    pub gateway_url: String,
    /// Replace both external services with offline stand-ins.
    pub mock: bool,
    /// Records served by the offline index instead of the built-in demo set.
    pub records_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env` (when present) and read the process environment.
    pub fn from_env(mock: bool) -> Result<Self, DomainError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(DomainError::configuration(format!("invalid .env file: {e}"))),
        }
        Self::from_lookup(|key| std::env::var(key).ok(), mock)
    }

    /// Read the variables of a specific env file on top of the process environment.
    pub fn from_env_file(path: impl AsRef<Path>, mock: bool) -> Result<Self, DomainError> {
        let pairs: Vec<(String, String)> = dotenvy::from_path_iter(path.as_ref())
            .map_err(|e| {
                DomainError::configuration(format!("{}: {e}", path.as_ref().display()))
            })?
            .collect::<Result<_, _>>()
            .map_err(|e| {
                DomainError::configuration(format!("{}: {e}", path.as_ref().display()))
            })?;

        Self::from_lookup(
            |key| {
                pairs
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
                    .or_else(|| std::env::var(key).ok())
            },
            mock,
        )
    }

    pub fn from_lookup<F>(lookup: F, mock: bool) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or(
                "OPENAI_TEMPERATURE",
                get("OPENAI_TEMPERATURE"),
                DEFAULT_TEMPERATURE,
            )?,
            max_output_tokens: parse_or(
                "OPENAI_MAX_OUTPUT_TOKENS",
                get("OPENAI_MAX_OUTPUT_TOKENS"),
                DEFAULT_MAX_OUTPUT_TOKENS,
            )?,
            port: parse_or("TRANSFORMBOT_PORT", get("TRANSFORMBOT_PORT"), DEFAULT_PORT)?,
            algolia_app_id: get("ALGOLIA_APP_ID"),
            algolia_search_key: get("ALGOLIA_SEARCH_KEY"),
            index_name: get("ALGOLIA_INDEX_NAME")
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            hits_per_page: parse_or(
                "ALGOLIA_HITS_PER_PAGE",
                get("ALGOLIA_HITS_PER_PAGE"),
                DEFAULT_HITS_PER_PAGE,
            )?,
            gateway_url: get("TRANSFORMBOT_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            mock,
            records_file: None,
        })
    }

    /// Fail unless every listed service can be reached with this configuration.
    pub fn ensure(&self, services: &[Service]) -> Result<(), DomainError> {
        if self.mock {
            return Ok(());
        }

        for service in services {
            match service {
                Service::Generation if self.openai_api_key.is_none() => {
                    return Err(DomainError::configuration("OPENAI_API_KEY is not set"));
                }
                Service::Search if self.algolia_app_id.is_none() => {
                    return Err(DomainError::configuration("ALGOLIA_APP_ID is not set"));
                }
                Service::Search if self.algolia_search_key.is_none() => {
                    return Err(DomainError::configuration("ALGOLIA_SEARCH_KEY is not set"));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, DomainError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            DomainError::configuration(format!("{key} has an invalid value: {value:?}"))
        }),
    }
}
