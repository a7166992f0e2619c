//! Configuration for the chat assistant.
//!
//! Configuration lives in `.luxivolt/config.json`. Every field has a default,
//! so a partial (or missing) file is valid.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the configured chat endpoint.
pub const ENDPOINT_ENV: &str = "LUXIVOLT_CHAT_ENDPOINT";

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = ".luxivolt/config.json";

/// Main configuration for the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// URL of the chat backend's POST endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Assistant message every conversation starts with.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Assistant message appended when the backend call fails.
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Preset prompts offered above the input.
    #[serde(default = "default_quick_actions")]
    pub quick_actions: Vec<QuickAction>,

    /// UI tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:8000/chat".into()
}

fn default_greeting() -> String {
    "Selam! Ben Luxivolt'un Teknik Asistanıyım. Kurumsal enerji çözümlerimiz ve mühendislik hizmetlerimiz hakkında size nasıl yardımcı olabilirim?".into()
}

fn default_fallback() -> String {
    "Şu anda teknik bir aksaklık yaşıyorum. Lütfen [İletişim](#iletisim) sayfamızdan bize ulaşın."
        .into()
}

fn default_quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction::new("Trafo Bakımı", "Trafo bakım hizmetleriniz nelerdir?"),
        QuickAction::new("Proje Teklifi", "Yeni bir proje için teklif almak istiyorum."),
        QuickAction::new("İletişim", "Adres ve telefon bilgilerinize ihtiyacım var."),
    ]
}

fn default_tick_rate_ms() -> u64 {
    250
}

/// A preset prompt shown as a pill above the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    /// Short label shown on the pill.
    pub label: String,
    /// Text sent when the pill is triggered.
    pub query: String,
}

impl QuickAction {
    /// Create a new quick action.
    pub fn new(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            query: query.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            greeting: default_greeting(),
            fallback: default_fallback(),
            quick_actions: default_quick_actions(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Apply the endpoint override from [`ENDPOINT_ENV`], if set.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                self.endpoint = endpoint;
            }
        }
        self
    }

    /// Parse and validate the chat endpoint.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::InvalidEndpoint(self.endpoint.clone())),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Endpoint is not an absolute http(s) URL.
    #[error("Invalid chat endpoint: {0}")]
    InvalidEndpoint(String),
}
