//! Configuration management for the research assistant.
//!
//! Configuration is read once by the caller and passed explicitly to every
//! component. The binary loads it from environment variables (optionally via a
//! `.env` file):
//! - `LLM_API_KEY` - Required. Model endpoint key. Falls back to `OPENROUTER_API_KEY`, then `GEMINI_API_KEY`.
//! - `LLM_BASE_URL` - Optional. OpenAI-compatible base URL. Defaults to OpenRouter.
//! - `DEFAULT_MODEL` - Optional. Model identifier. Defaults to `google/gemini-2.5-flash`.
//! - `LLM_TEMPERATURE` - Optional. Sampling temperature. Provider default when unset.
//! - `TAVILY_API_KEY` - Optional. Enables the web search tool.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MAX_TOOL_ROUNDS` - Optional. Tool round trips allowed per response cycle. Defaults to `8`.
//! - `CYCLE_TIMEOUT_SECS` - Optional. Deadline for a whole response cycle.
//! - `REPORTS_DIR` - Optional. Directory for saved JSON reports. Defaults to current directory.
//! - `SAVE_REPORTS` - Optional. Whether reports are written to disk. Defaults to `true`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Credentials and endpoints for the model provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer key for the chat completions endpoint
    pub api_key: String,

    /// OpenAI-compatible base URL (without `/chat/completions`)
    pub base_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
}

/// Research assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,

    /// Tavily key; the web search tool is only registered when present
    pub tavily_api_key: Option<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum tool round trips per response cycle
    pub max_tool_rounds: usize,

    /// Optional deadline applied to a whole response cycle
    pub cycle_timeout: Option<Duration>,

    /// Directory where JSON reports are written
    pub reports_dir: PathBuf,

    /// Whether completed reviews and conference lists are saved
    pub save_reports: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no model API key is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("LLM_API_KEY")
            .or_else(|| var("OPENROUTER_API_KEY"))
            .or_else(|| var("GEMINI_API_KEY"))
            .ok_or_else(|| ConfigError::MissingEnvVar("LLM_API_KEY".to_string()))?;

        let base_url = var("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = var("DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = var("LLM_TEMPERATURE")
            .map(|v| {
                v.parse::<f32>()
                    .map_err(|e| ConfigError::InvalidValue("LLM_TEMPERATURE".to_string(), e.to_string()))
            })
            .transpose()?;

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_tool_rounds = var("MAX_TOOL_ROUNDS")
            .map(|v| {
                v.parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue("MAX_TOOL_ROUNDS".to_string(), format!("{}", e)))
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_TOOL_ROUNDS);

        let cycle_timeout = var("CYCLE_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::InvalidValue("CYCLE_TIMEOUT_SECS".to_string(), format!("{}", e)))
            })
            .transpose()?;

        let reports_dir = var("REPORTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let save_reports = var("SAVE_REPORTS")
            .map(|v| parse_bool(&v).map_err(|e| ConfigError::InvalidValue("SAVE_REPORTS".to_string(), e)))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            llm: LlmConfig {
                api_key,
                base_url,
                model,
                temperature,
            },
            tavily_api_key: var("TAVILY_API_KEY"),
            host,
            port,
            max_tool_rounds,
            cycle_timeout,
            reports_dir,
            save_reports,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, reports_dir: PathBuf) -> Self {
        Self {
            llm: LlmConfig {
                api_key,
                base_url: DEFAULT_BASE_URL.to_string(),
                model,
                temperature: None,
            },
            tavily_api_key: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            cycle_timeout: None,
            reports_dir,
            save_reports: false,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}
