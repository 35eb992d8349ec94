// src/config.rs
use std::env;

use crate::error::ConfigError;
use crate::services::transcript::Origin;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";
pub const DEFAULT_WARNING_PREFIX: &str = "⚠️ Error: ";

/// Styling token per origin, written verbatim into the `class` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styles {
    pub user: String,
    pub bot: String,
    pub error: String,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            user: "p-2 bg-gray-200 rounded my-1".to_string(),
            bot: "p-2 bg-red-100 rounded my-1".to_string(),
            error: "p-2 bg-red-200 rounded my-1".to_string(),
        }
    }
}

impl Styles {
    pub fn for_origin(&self, origin: Origin) -> &str {
        match origin {
            Origin::User => self.user.as_str(),
            Origin::Bot => self.bot.as_str(),
            Origin::Error => self.error.as_str(),
        }
    }
}

/// Speaker labels shown before user and bot text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub user: String,
    pub bot: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self { user: "You:".to_string(), bot: "Bot:".to_string() }
    }
}

impl Labels {
    /// Error entries carry the warning prefix in their text, so they have no label.
    pub fn for_origin(&self, origin: Origin) -> Option<&str> {
        match origin {
            Origin::User => Some(self.user.as_str()),
            Origin::Bot => Some(self.bot.as_str()),
            Origin::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub chat_path: String,
    pub warning_prefix: String,
    pub styles: Styles,
    pub labels: Labels,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfigBuilder::new().build_unchecked()
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Reads `CHAT_BASE_URL`, `CHAT_PATH` and `CHAT_WARNING_PREFIX`, after
    /// loading a `.env` file when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = ClientConfigBuilder::new();
        if let Ok(url) = env::var("CHAT_BASE_URL") {
            builder = builder.with_base_url(url);
        }
        if let Ok(path) = env::var("CHAT_PATH") {
            builder = builder.with_chat_path(path);
        }
        if let Ok(prefix) = env::var("CHAT_WARNING_PREFIX") {
            builder = builder.with_warning_prefix(prefix);
        }
        builder.build()
    }

    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.chat_path)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    chat_path: Option<String>,
    warning_prefix: Option<String>,
    styles: Styles,
    labels: Labels,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            chat_path: None,
            warning_prefix: None,
            styles: Styles::default(),
            labels: Labels::default(),
        }
    }

    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[inline]
    pub fn with_chat_path<S: Into<String>>(mut self, path: S) -> Self {
        self.chat_path = Some(path.into());
        self
    }

    #[inline]
    pub fn with_warning_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.warning_prefix = Some(prefix.into());
        self
    }

    #[inline]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    #[inline]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let config = self.build_unchecked();
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(config.base_url));
        }
        if !config.chat_path.starts_with('/') {
            return Err(ConfigError::InvalidPath(config.chat_path));
        }
        Ok(config)
    }

    fn build_unchecked(self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_path: self.chat_path.unwrap_or_else(|| DEFAULT_CHAT_PATH.to_string()),
            warning_prefix: self
                .warning_prefix
                .unwrap_or_else(|| DEFAULT_WARNING_PREFIX.to_string()),
            styles: self.styles,
            labels: self.labels,
        }
    }
}
