//! Writer agent: article creation from a research brief.

use crate::agents::types::{WriterRequest, WriterResult};
use crate::agents::{Message, SIMULATION_LABEL};
use crate::config::{Capability, PipelineConfig};
use crate::llm::{ChatMessage, ChatOptions, LlmClient, LlmError};
use crate::simulation;

/// Minimum whitespace-token count for an acceptable article.
const MIN_WORD_COUNT: usize = 100;

/// Create an article for a brief.
///
/// In real mode the configured chat model writes the article; an article that
/// fails the shape check (under [`MIN_WORD_COUNT`] words) counts as a failed
/// call and falls back to the templater. Never fails.
pub async fn process(
    config: &PipelineConfig,
    client: &dyn LlmClient,
    request: &WriterRequest,
) -> Message<WriterResult> {
    let settings = config.get(Capability::Writing);
    tracing::info!(
        title = request.title(),
        model = %settings.model_info(),
        "writer agent creating article"
    );

    if !settings.simulation_mode {
        match call_model(config, client, request).await {
            Ok(result) => {
                tracing::info!(
                    word_count = result.word_count,
                    model = %result.model_used,
                    "article complete"
                );
                let label = result.model_used.clone();
                return Message::new(result, "application/json", label);
            }
            Err(err) => {
                tracing::warn!("writer model call failed ({err}), falling back to simulation");
            }
        }
    }

    let article = simulation::writing_template(request);
    let result = WriterResult::new(
        article,
        request.keywords().to_vec(),
        request.tone(),
        SIMULATION_LABEL,
    );
    tracing::info!(
        word_count = result.word_count,
        model = SIMULATION_LABEL,
        "article complete"
    );
    Message::new(result, "application/json", SIMULATION_LABEL)
}

async fn call_model(
    config: &PipelineConfig,
    client: &dyn LlmClient,
    request: &WriterRequest,
) -> Result<WriterResult, LlmError> {
    let settings = config.get(Capability::Writing);
    let (max_tokens, temperature) = settings.chat_params().unwrap_or((2000, 0.7));

    let messages = [ChatMessage::user(writing_prompt(request))];
    let options = ChatOptions {
        temperature: Some(temperature),
        max_tokens: Some(max_tokens),
        response_format: None,
    };

    let response = client
        .chat_completion(&settings.model, &messages, options)
        .await?;
    let article = response
        .content
        .ok_or_else(|| LlmError::parse_error("chat completion returned no content".to_string()))?;

    let result = WriterResult::new(
        article,
        request.keywords().to_vec(),
        request.tone(),
        settings.model.clone(),
    );
    if result.word_count < MIN_WORD_COUNT {
        return Err(LlmError::parse_error(format!(
            "article has {} words, need at least {MIN_WORD_COUNT}",
            result.word_count
        )));
    }
    Ok(result)
}

fn writing_prompt(request: &WriterRequest) -> String {
    let key_points = serde_json::to_string(request.key_points()).unwrap_or_default();
    format!(
        "Create a professional article based on this research brief:\n\n\
         Title: {}\n\
         Executive Summary: {}\n\
         Key Points: {}\n\
         Writing Style: {}\n\n\
         Create a well-structured HTML article with:\n\
         - Professional introduction\n\
         - Detailed sections covering key points\n\
         - Strategic recommendations\n\
         - Compelling conclusion\n\n\
         Target length: 400-600 words. Use {} writing style.",
        request.title(),
        request.executive_summary(),
        key_points,
        request.tone(),
        request.tone()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_interpolates_brief_fields() {
        let request = WriterRequest::new(
            "Strategic Analysis: Robotics",
            "A short overview.",
            vec!["First".to_string(), "Second".to_string()],
            vec!["robotics".to_string()],
            "casual",
        )
        .unwrap();
        let prompt = writing_prompt(&request);
        assert!(prompt.contains("Title: Strategic Analysis: Robotics"));
        assert!(prompt.contains("A short overview."));
        assert!(prompt.contains("[\"First\",\"Second\"]"));
        assert!(prompt.contains("Use casual writing style."));
    }
}
