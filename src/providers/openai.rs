use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};

use super::Provider;
use crate::errors::ProviderError;

/// OpenAI client for interacting with the OpenAI API
#[derive(Debug)]
pub struct OpenAi {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// The generated choices
    pub choices: Vec<ChatChoice>,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

/// Individual choice in a chat response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

/// Image generation request
#[derive(Debug, Serialize)]
pub struct ImageRequest {
    /// Prompt describing the image
    prompt: String,

    /// Number of images to generate
    n: u32,

    /// Image size, e.g. "512x512"
    size: String,
}

/// Image generation response
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    /// Generated images
    pub data: Vec<ImageData>,
}

/// One generated image
#[derive(Debug, Deserialize)]
pub struct ImageData {
    /// URL the image can be downloaded from
    pub url: String,
}

/// Transcription response (verbose format)
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    /// Full transcript text
    pub text: String,

    /// Timestamped segments
    #[serde(default)]
    pub segments: Vec<TranscriptionSegment>,
}

/// One transcript segment
#[derive(Debug, Deserialize)]
pub struct TranscriptionSegment {
    /// Segment index
    pub id: u64,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Segment text
    pub text: String,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl OpenAi {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, Duration::from_secs(120))
    }

    /// Create a new OpenAI client with a custom request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        if self.endpoint.is_empty() {
            format!("https://api.openai.com{}", path)
        } else {
            format!("{}{}", self.endpoint.trim_end_matches('/'), path)
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            if status.as_u16() == 401 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }
        Ok(response)
    }

    /// Complete a chat request
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url("/v1/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Generate images from a prompt
    pub async fn generate_image(
        &self,
        prompt: impl Into<String>,
        size: impl Into<String>,
    ) -> Result<ImageResponse, ProviderError> {
        let request = ImageRequest {
            prompt: prompt.into(),
            n: 1,
            size: size.into(),
        };
        let response = self
            .client
            .post(self.api_url("/v1/images/generations"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json::<ImageResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Transcribe an audio file with timestamped segments
    pub async fn transcribe(
        &self,
        audio_path: &Path,
        model: &str,
        language: &str,
    ) -> Result<TranscriptionResponse, ProviderError> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let form = multipart::Form::new()
            .text("model", model.to_string())
            .text("language", language.to_string())
            .text("response_format", "verbose_json")
            .part("file", part);

        let response = self
            .client
            .post(self.api_url("/v1/audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json::<TranscriptionResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Download a generated image to raw bytes
    pub async fn download_image(&self, url: &str) -> Result<bytes::Bytes, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let response = Self::check_status(response).await?;
        response
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }
}

#[async_trait]
impl Provider for OpenAi {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.chat(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = ChatRequest::new("gpt-3.5-turbo")
            .add_message("user", "Hello")
            .max_tokens(10);
        self.chat(request).await?;
        Ok(())
    }

    fn extract_text(response: &ChatResponse) -> String {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}
