//! LLM client module for interacting with generative models.
//!
//! This module provides a trait-based abstraction over generative providers,
//! with the OpenAI API as the primary implementation. It covers the two call
//! shapes the pipeline needs: chat completions (optionally with a forced-JSON
//! response format) and single-image generation.

mod error;
mod openai;

pub use error::{classify_http_status, LlmError, LlmErrorKind};
pub use openai::OpenAiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role in a chat conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Response format constraint for chat completions.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Force the model to emit a single JSON object.
    JsonObject,
}

/// Optional parameters for chat completions.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Maximum output tokens to generate.
    pub max_tokens: Option<u64>,
    /// Output format constraint.
    pub response_format: Option<ResponseFormat>,
}

/// Response from a chat completion.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub model: Option<String>,
    pub finish_reason: Option<String>,
}

/// Optional parameters for image generation.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Image dimensions, e.g. `1024x1024`.
    pub size: Option<String>,
    /// Image quality, e.g. `standard` or `hd`.
    pub quality: Option<String>,
}

/// A generated image reference.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// URL of the hosted image.
    pub url: String,
    /// Prompt rewrite applied by the provider, if any.
    pub revised_prompt: Option<String>,
}

/// Trait for generative model clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request.
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError>;

    /// Generate a single image for a prompt.
    async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        options: ImageOptions,
    ) -> Result<GeneratedImage, LlmError>;
}
