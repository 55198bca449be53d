//! Research agent: topic analysis via a chat model with forced-JSON output.

use serde::Deserialize;

use crate::agents::types::{ResearchRequest, ResearchResult};
use crate::agents::{Message, SIMULATION_LABEL};
use crate::config::{Capability, PipelineConfig};
use crate::llm::{ChatMessage, ChatOptions, LlmClient, LlmError, ResponseFormat};
use crate::simulation;

const SYSTEM_PROMPT: &str = "You are a research analysis AI that returns data in JSON format. \
     Always return valid JSON without any other text.";

/// Analyze a topic.
///
/// In real mode the configured chat model is asked for a JSON brief; any
/// transport or schema failure falls back to the templater. Simulation mode
/// goes straight to the templater. Never fails.
pub async fn process(
    config: &PipelineConfig,
    client: &dyn LlmClient,
    request: &ResearchRequest,
) -> Message<ResearchResult> {
    let settings = config.get(Capability::Research);
    tracing::info!(
        topic = request.topic(),
        model = %settings.model_info(),
        "research agent analyzing topic"
    );

    if !settings.simulation_mode {
        match call_model(config, client, request).await {
            Ok(result) => {
                tracing::info!(
                    confidence = result.research_confidence,
                    model = %result.model_used,
                    "research complete"
                );
                let label = result.model_used.clone();
                return Message::new(result, "application/json", label);
            }
            Err(err) => {
                tracing::warn!("research model call failed ({err}), falling back to simulation");
            }
        }
    }

    let result = simulation::research_template(request.topic());
    tracing::info!(
        confidence = result.research_confidence,
        model = SIMULATION_LABEL,
        "research complete"
    );
    Message::new(result, "application/json", SIMULATION_LABEL)
}

/// Wire shape expected back from the model.
#[derive(Debug, Deserialize)]
struct ResearchReply {
    title: String,
    executive_summary: String,
    key_points: Vec<String>,
    keywords: Vec<String>,
    research_confidence: f64,
    methodology: String,
}

async fn call_model(
    config: &PipelineConfig,
    client: &dyn LlmClient,
    request: &ResearchRequest,
) -> Result<ResearchResult, LlmError> {
    let settings = config.get(Capability::Research);
    let (max_tokens, temperature) = settings.chat_params().unwrap_or((1500, 0.3));

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(research_prompt(request)),
    ];
    let options = ChatOptions {
        temperature: Some(temperature),
        max_tokens: Some(max_tokens),
        response_format: Some(ResponseFormat::JsonObject),
    };

    let response = client
        .chat_completion(&settings.model, &messages, options)
        .await?;
    let content = response
        .content
        .ok_or_else(|| LlmError::parse_error("chat completion returned no content".to_string()))?;

    let reply: ResearchReply = serde_json::from_str(&content)
        .map_err(|e| LlmError::parse_error(format!("research reply is not valid JSON: {e}")))?;
    validate_reply(&reply)?;

    Ok(ResearchResult {
        title: reply.title,
        executive_summary: reply.executive_summary,
        key_points: reply.key_points,
        keywords: reply.keywords,
        research_confidence: reply.research_confidence,
        methodology: reply.methodology,
        model_used: settings.model.clone(),
    })
}

fn validate_reply(reply: &ResearchReply) -> Result<(), LlmError> {
    if reply.key_points.len() < 3 {
        return Err(LlmError::parse_error(format!(
            "research reply has {} key points, need at least 3",
            reply.key_points.len()
        )));
    }
    if reply.keywords.is_empty() {
        return Err(LlmError::parse_error(
            "research reply has no keywords".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&reply.research_confidence) {
        return Err(LlmError::parse_error(format!(
            "research confidence {} outside [0, 1]",
            reply.research_confidence
        )));
    }
    Ok(())
}

fn research_prompt(request: &ResearchRequest) -> String {
    format!(
        "Analyze the topic \"{}\" and provide comprehensive research insights.\n\n\
         Return a JSON object with:\n\
         - title: Comprehensive analysis title\n\
         - executive_summary: 2-3 sentence overview\n\
         - key_points: Array of 4-5 key insights\n\
         - keywords: Array of relevant keywords\n\
         - research_confidence: Confidence score (0.0-1.0)\n\
         - methodology: Brief description of analysis approach\n\n\
         Research depth: {} of 3.\n\
         Focus on technological, business, and strategic implications.\n\n\
         IMPORTANT: Return ONLY the JSON object, no other text.",
        request.topic(),
        request.depth()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(key_points: usize, keywords: usize, confidence: f64) -> ResearchReply {
        ResearchReply {
            title: "t".to_string(),
            executive_summary: "s".to_string(),
            key_points: (0..key_points).map(|i| format!("p{i}")).collect(),
            keywords: (0..keywords).map(|i| format!("k{i}")).collect(),
            research_confidence: confidence,
            methodology: "m".to_string(),
        }
    }

    #[test]
    fn reply_shape_is_enforced() {
        assert!(validate_reply(&reply(3, 1, 0.5)).is_ok());
        assert!(validate_reply(&reply(2, 1, 0.5)).is_err());
        assert!(validate_reply(&reply(3, 0, 0.5)).is_err());
        assert!(validate_reply(&reply(3, 1, 1.2)).is_err());
        assert!(validate_reply(&reply(3, 1, -0.1)).is_err());
    }

    #[test]
    fn prompt_names_topic_and_depth() {
        let request = ResearchRequest::new("Electric Vehicles", 2).unwrap();
        let prompt = research_prompt(&request);
        assert!(prompt.contains("\"Electric Vehicles\""));
        assert!(prompt.contains("depth: 2 of 3"));
    }
}
