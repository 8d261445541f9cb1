use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Library root holding episodes/, markers/, json/ and photos/
    #[serde(default = "default_library_root")]
    pub library_root: String,

    /// Host name, excluded from cast matching and given a random icon variant
    #[serde(default = "default_host")]
    pub host: String,

    /// Franchise series considered for the related-episode scan
    #[serde(default = "default_franchises")]
    pub franchises: Vec<String>,

    /// Base URL of episode pages; the episode number is appended
    #[serde(default = "default_site_base_url")]
    pub site_base_url: String,

    /// Listen-here link appended to SNS posts
    #[serde(default = "default_share_url")]
    pub share_url: String,

    /// Hashtag line appended to SNS posts
    #[serde(default = "default_hashtags")]
    pub hashtags: String,

    /// Provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Provider configuration for the hosted generative APIs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Chat completion model
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    // @field: Image generation size
    #[serde(default = "default_image_size")]
    pub image_size: String,

    // @field: Transcription model
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    // @field: Transcription language
    #[serde(default = "default_transcription_language")]
    pub transcription_language: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            chat_model: default_chat_model(),
            image_size: default_image_size(),
            transcription_model: default_transcription_model(),
            transcription_language: default_transcription_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_root: default_library_root(),
            host: default_host(),
            franchises: default_franchises(),
            site_base_url: default_site_base_url(),
            share_url: default_share_url(),
            hashtags: default_hashtags(),
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if self.library_root.is_empty() {
            return Err(anyhow!("library_root must not be empty"));
        }
        if self.host.is_empty() {
            return Err(anyhow!("host must not be empty"));
        }
        if !self.site_base_url.starts_with("http") {
            return Err(anyhow!(
                "site_base_url must be an http(s) URL: {}",
                self.site_base_url
            ));
        }
        if !matches!(
            self.provider.image_size.as_str(),
            "256x256" | "512x512" | "1024x1024"
        ) {
            return Err(anyhow!(
                "Unsupported image size: {}",
                self.provider.image_size
            ));
        }
        Ok(())
    }

    /// Resolve the API key, falling back to the environment.
    pub fn api_key(&self) -> String {
        if !self.provider.api_key.is_empty() {
            return self.provider.api_key.clone();
        }
        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    }
}

fn default_library_root() -> String {
    "..".to_string()
}

fn default_host() -> String {
    "Gota".to_string()
}

fn default_franchises() -> Vec<String> {
    vec![
        "hwn".to_string(),
        "football".to_string(),
        "weshow".to_string(),
    ]
}

fn default_site_base_url() -> String {
    "https://sports-con.xyz/concast-".to_string()
}

fn default_share_url() -> String {
    "https://linktr.ee/concastx".to_string()
}

fn default_hashtags() -> String {
    "#コンキャスト #concast".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_image_size() -> String {
    "512x512".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_transcription_language() -> String {
    "ja".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}
