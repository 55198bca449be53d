//! OpenAI API client implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::error::LlmError;
use super::{
    ChatMessage, ChatOptions, ChatResponse, GeneratedImage, ImageOptions, LlmClient,
    ResponseFormat,
};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";

/// OpenAI API client for chat completions and image generation.
///
/// Failures are returned as classified [`LlmError`]s; there is no retry. The
/// caller decides whether to fall back.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Execute a single POST request and deserialize the response body.
    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        request: &B,
    ) -> Result<R, LlmError> {
        let response = match self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request = ChatCompletionRequest {
            model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            response_format: options.response_format,
        };

        tracing::debug!("Sending chat completion request: model={}", model);
        let parsed: ChatCompletionResponse = self.post_json(OPENAI_CHAT_URL, &request).await?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::parse_error("No choices in response".to_string()))?;

        Ok(ChatResponse {
            content: choice.message.content,
            model: parsed.model.or_else(|| Some(model.to_string())),
            finish_reason: choice.finish_reason,
        })
    }

    async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        options: ImageOptions,
    ) -> Result<GeneratedImage, LlmError> {
        let request = ImageGenerationRequest {
            model,
            prompt,
            n: 1,
            size: options.size,
            quality: options.quality,
            response_format: "url",
        };

        tracing::debug!("Sending image generation request: model={}", model);
        let parsed: ImageGenerationResponse = self.post_json(OPENAI_IMAGES_URL, &request).await?;

        let datum = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::parse_error("No image data in response".to_string()))?;
        let url = datum
            .url
            .ok_or_else(|| LlmError::parse_error("No image URL in response".to_string()))?;

        Ok(GeneratedImage {
            url,
            revised_prompt: datum.revised_prompt,
        })
    }
}

/// Chat completion request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// Chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Image generation request format.
#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    response_format: &'a str,
}

/// Image generation response format.
#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}
