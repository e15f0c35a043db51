//! Configuration system (layered: CLI flags > env > config file > defaults).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::BuddyError;
use crate::types::{CompletionSettings, DEFAULT_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SUMMARY_PERIOD: u32 = 3;
pub const DEFAULT_TURN_LIMIT: u32 = 5;
pub const DEFAULT_TONE: &str = "ACME-Shop's friendly expert tone";
pub const DEFAULT_BOT_NAME: &str = "Buddy-Tech";
pub const DEFAULT_PROMPT_PATH: &str = "prompts.md";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration for Buddy.
///
/// Built once at startup and handed to the client and memory by reference.
/// The API key is only ever read from the environment (or set explicitly) and
/// is redacted from `Debug` output.
#[derive(Clone)]
pub struct BuddyConfig {
    pub(crate) api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub summary_period: u32,
    pub turn_limit: u32,
    pub tone: String,
    pub bot_name: String,
    pub prompt_path: PathBuf,
    pub request_timeout: Duration,
}

impl fmt::Debug for BuddyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuddyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("summary_period", &self.summary_period)
            .field("turn_limit", &self.turn_limit)
            .field("tone", &self.tone)
            .field("bot_name", &self.bot_name)
            .field("prompt_path", &self.prompt_path)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for BuddyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            summary_period: DEFAULT_SUMMARY_PERIOD,
            turn_limit: DEFAULT_TURN_LIMIT,
            tone: DEFAULT_TONE.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            prompt_path: PathBuf::from(DEFAULT_PROMPT_PATH),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// On-disk TOML settings. Every key is optional; credentials are not accepted here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub summary_period: Option<u32>,
    pub turn_limit: Option<u32>,
    pub tone: Option<String>,
    pub bot_name: Option<String>,
    pub prompts: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

impl BuddyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `.env`, then the optional TOML file, then environment variables.
    ///
    /// The result is not validated; callers run [`validate`](Self::validate)
    /// once every layer, CLI flags included, has been applied.
    pub fn load(config_file: Option<&Path>) -> Result<Self, BuddyError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();
        if let Some(path) = config_file {
            config.merge_file(read_config_file(path)?);
        }
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay values present in a config file.
    pub fn merge_file(&mut self, file: FileConfig) {
        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.model {
            self.model = v;
        }
        if let Some(v) = file.temperature {
            self.temperature = v;
        }
        if let Some(v) = file.summary_period {
            self.summary_period = v;
        }
        if let Some(v) = file.turn_limit {
            self.turn_limit = v;
        }
        if let Some(v) = file.tone {
            self.tone = v;
        }
        if let Some(v) = file.bot_name {
            self.bot_name = v;
        }
        if let Some(v) = file.prompts {
            self.prompt_path = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<(), BuddyError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), BuddyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = lookup("BUDDY_MODEL") {
            self.model = model;
        }
        if let Some(raw) = lookup("BUDDY_TEMPERATURE") {
            self.temperature = parse_env("BUDDY_TEMPERATURE", &raw)?;
        }
        if let Some(raw) = lookup("BUDDY_SUMMARY_PERIOD") {
            self.summary_period = parse_env("BUDDY_SUMMARY_PERIOD", &raw)?;
        }
        if let Some(raw) = lookup("BUDDY_TURN_LIMIT") {
            self.turn_limit = parse_env("BUDDY_TURN_LIMIT", &raw)?;
        }
        if let Some(path) = lookup("BUDDY_PROMPTS") {
            self.prompt_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("BUDDY_TIMEOUT_SECS") {
            self.request_timeout = Duration::from_secs(parse_env("BUDDY_TIMEOUT_SECS", &raw)?);
        }
        Ok(())
    }

    /// Reject values that would make the chat loop misbehave.
    pub fn validate(&self) -> Result<(), BuddyError> {
        if self.summary_period == 0 {
            return Err(BuddyError::Configuration(
                "summary_period must be at least 1".into(),
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(BuddyError::Configuration(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        if self.model.trim().is_empty() {
            return Err(BuddyError::Configuration("model must not be empty".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(BuddyError::Configuration(
                "request timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into());
    }

    /// Resolve the API key, failing if none was supplied.
    pub fn api_key(&self) -> Result<&str, BuddyError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| BuddyError::Configuration("Missing OPENAI_API_KEY".into()))
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sampling settings for assistant replies.
    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings::builder()
            .model(self.model.clone())
            .temperature(self.temperature)
            .build()
    }
}

/// Parse a TOML config file.
pub fn read_config_file(path: &Path) -> Result<FileConfig, BuddyError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        BuddyError::Configuration(format!("failed to read config {}: {e}", path.display()))
    })?;
    toml::from_str(&raw).map_err(|e| {
        BuddyError::Configuration(format!("invalid config {}: {e}", path.display()))
    })
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, BuddyError> {
    raw.trim()
        .parse()
        .map_err(|_| BuddyError::Configuration(format!("{name} has an invalid value '{raw}'")))
}
