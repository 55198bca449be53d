//! Orchestrator: the fixed-sequence content production pipeline.
//!
//! research → writer → image → document assembly. Each stage's input depends
//! on the previous stage's output, so the calls are strictly sequential.
//! Stage summaries are logged as a side-channel; the contract is only the
//! returned document.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::agents::types::{
    ImageRequest, ImageResult, ResearchRequest, ResearchResult, ValidationError, WriterRequest,
    WriterResult,
};
use crate::agents::{self, Message};
use crate::config::{Capability, ImageQuality, ImageSize, PipelineConfig};
use crate::llm::LlmClient;

/// File name the final document is written to, in the working directory.
pub const OUTPUT_FILE: &str = "contentflow_output.html";

/// Drives the three capability agents in sequence and assembles the final
/// document.
pub struct Orchestrator {
    config: PipelineConfig,
    client: Arc<dyn LlmClient>,
}

impl Orchestrator {
    pub fn new(config: PipelineConfig, client: Arc<dyn LlmClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for a topic.
    ///
    /// # Errors
    ///
    /// Fails only if `topic` fails request validation. Once the topic
    /// validates, every downstream stage guarantees a fallback, so the run
    /// always produces a document.
    pub async fn run(&self, topic: &str) -> Result<Message<String>, ValidationError> {
        let started = Instant::now();
        tracing::info!(topic, "starting content workflow");
        self.log_model_configuration();

        let research_request = ResearchRequest::new(topic, 1)?;
        let research = agents::research::process(
            &self.config,
            self.client.as_ref(),
            &research_request,
        )
        .await;

        let writer_request = WriterRequest::from_brief(&research.content)?;
        let writer =
            agents::writer::process(&self.config, self.client.as_ref(), &writer_request).await;

        let keywords = writer.content.keywords.clone();
        let (size, quality) = self
            .config
            .get(Capability::Image)
            .image_params()
            .unwrap_or((ImageSize::Square, ImageQuality::Standard));
        let image_request =
            ImageRequest::new(image_prompt(&keywords), "professional", size, quality, keywords)?;
        let image =
            agents::image::process(&self.config, self.client.as_ref(), &image_request).await;

        let html = assemble_document(&research, &writer, &image);
        log_results(&research, &writer, &image);
        tracing::info!(elapsed = ?started.elapsed(), "content workflow complete");

        Ok(Message::new(html, "text/html", "Orchestrator"))
    }

    fn log_model_configuration(&self) {
        for capability in Capability::ALL {
            tracing::info!(
                capability = %capability,
                model = %self.config.get(capability).model_info(),
                "pipeline model configuration"
            );
        }
    }
}

/// Write the final document to [`OUTPUT_FILE`] under `dir`.
pub fn write_document(document: &Message<String>, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(OUTPUT_FILE);
    std::fs::write(&path, &document.content)?;
    Ok(path)
}

fn image_prompt(keywords: &[String]) -> String {
    let subject = keywords
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Professional, modern illustration representing {subject}, suitable for business \
         article header, clean design, high quality"
    )
}

fn log_results(
    research: &Message<ResearchResult>,
    writer: &Message<WriterResult>,
    image: &Message<ImageResult>,
) {
    tracing::info!(
        research_model = %research.model_used,
        writing_model = %writer.model_used,
        image_model = %image.model_used,
        confidence = research.content.research_confidence,
        word_count = writer.content.word_count,
        dimensions = %image.content.dimensions,
        "workflow results"
    );
}

const DOCUMENT_STYLE: &str = r#"body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
    color: #333;
}
.header-image {
    width: 100%;
    max-height: 400px;
    object-fit: cover;
    border-radius: 8px;
    margin: 20px 0;
}
.ai-attribution {
    background: #f8f9fa;
    border-radius: 8px;
    padding: 15px;
    margin: 20px 0;
    font-size: 0.9em;
    color: #666;
}
.content {
    margin-top: 30px;
}
h1 {
    color: #2c3e50;
    margin-bottom: 1em;
}
h2 {
    color: #34495e;
    margin-top: 1.5em;
}
ul {
    padding-left: 1.5em;
}
li {
    margin-bottom: 0.5em;
}
.executive-summary {
    font-size: 1.1em;
    color: #444;
    border-left: 4px solid #3498db;
    padding-left: 1em;
    margin: 1.5em 0;
}
.key-points {
    background: #f7f9fc;
    padding: 1.5em;
    border-radius: 8px;
    margin: 1.5em 0;
}
.methodology {
    font-style: italic;
    color: #666;
    margin-top: 2em;
    padding-top: 1em;
    border-top: 1px solid #eee;
}"#;

/// Render the final document. Pure string templating: given well-formed
/// stage results this has no failure modes.
pub fn assemble_document(
    research: &Message<ResearchResult>,
    writer: &Message<WriterResult>,
    image: &Message<ImageResult>,
) -> String {
    let brief = &research.content;
    let key_points_html = brief
        .key_points
        .iter()
        .map(|point| format!("                <li>{point}</li>\n"))
        .collect::<String>();
    let confidence_pct = brief.research_confidence * 100.0;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{style}
    </style>
</head>
<body>
    <img src="{image_url}"
         alt="{alt_text}"
         class="header-image">

    <div class="ai-attribution">
        <h4>AI Model Attribution</h4>
        <p>This content was generated using multiple AI models:</p>
        <ul>
            <li>Research Analysis: {research_model}</li>
            <li>Content Generation: {writing_model}</li>
            <li>Image Creation: {image_model}</li>
        </ul>
        <p>Content Quality Score: {confidence_pct:.1}%</p>
    </div>

    <div class="content">
        <h1>{title}</h1>

        <div class="executive-summary">
            <p>{executive_summary}</p>
        </div>

        <div class="key-points">
            <h2>Key Insights</h2>
            <ul>
{key_points_html}            </ul>
        </div>

{article_text}

        <div class="methodology">
            <p><strong>Research Methodology:</strong> {methodology}</p>
        </div>
    </div>

    <footer class="ai-attribution">
        <p><strong>Generated:</strong> {generated_at}</p>
        <p><strong>Keywords:</strong> {keywords}</p>
    </footer>
</body>
</html>
"#,
        title = brief.title,
        style = DOCUMENT_STYLE,
        image_url = image.content.image_url,
        alt_text = image.content.alt_text,
        research_model = research.model_used,
        writing_model = writer.model_used,
        image_model = image.model_used,
        confidence_pct = confidence_pct,
        executive_summary = brief.executive_summary,
        key_points_html = key_points_html,
        article_text = writer.content.article_text,
        methodology = brief.methodology,
        generated_at = research.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        keywords = brief.keywords.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SIMULATION_LABEL;
    use crate::config::Provider;
    use crate::llm::{
        ChatMessage, ChatOptions, ChatResponse, GeneratedImage, ImageOptions, LlmError,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Client whose every call fails, to exercise the fallback path.
    struct FailingClient;

    #[async_trait]
    impl LlmClient for FailingClient {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _options: ChatOptions,
        ) -> Result<ChatResponse, LlmError> {
            Err(LlmError::network_error("connection refused".to_string()))
        }

        async fn generate_image(
            &self,
            _model: &str,
            _prompt: &str,
            _options: ImageOptions,
        ) -> Result<GeneratedImage, LlmError> {
            Err(LlmError::network_error("connection refused".to_string()))
        }
    }

    fn simulation_orchestrator() -> Orchestrator {
        Orchestrator::new(PipelineConfig::default(), Arc::new(FailingClient))
    }

    #[tokio::test]
    async fn simulation_run_produces_labeled_document() {
        let document = simulation_orchestrator()
            .run("Electric Vehicles")
            .await
            .unwrap();
        assert_eq!(document.media_type, "text/html");
        assert!(document.content.contains("Electric Vehicles"));
        // All three attribution entries carry the simulation label.
        assert!(document.content.matches(SIMULATION_LABEL).count() >= 3);
        assert!(document
            .content
            .contains("<strong>Keywords:</strong> electric vehicles"));
    }

    #[tokio::test]
    async fn blank_topic_fails_validation() {
        let err = simulation_orchestrator().run("   ").await.unwrap_err();
        assert_eq!(err.field, "topic");
    }

    #[tokio::test]
    async fn real_mode_with_failing_api_still_completes() {
        let mut credentials = HashMap::new();
        credentials.insert(
            Provider::OpenAi,
            "sk-0123456789abcdef0123456789".to_string(),
        );
        let mut config = PipelineConfig::with_credentials(credentials);
        config.enable_real_mode(Provider::OpenAi).unwrap();

        let orchestrator = Orchestrator::new(config, Arc::new(FailingClient));
        let document = orchestrator.run("Electric Vehicles").await.unwrap();
        // Every stage fell back, so the document is fully simulation-labeled.
        assert!(document.content.matches(SIMULATION_LABEL).count() >= 3);
    }

    #[tokio::test]
    async fn run_is_deterministic_in_simulation_mode() {
        let orchestrator = simulation_orchestrator();
        let first = orchestrator.run("Quantum Computing").await.unwrap();
        let second = orchestrator.run("Quantum Computing").await.unwrap();
        // Identical apart from the generated-at footer.
        let strip = |html: &str| {
            html.lines()
                .filter(|line| !line.contains("Generated:"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_eq!(strip(&first.content), strip(&second.content));
    }

    #[tokio::test]
    async fn write_document_uses_fixed_file_name() {
        let document = simulation_orchestrator().run("Robotics").await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&document, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), OUTPUT_FILE);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, document.content);
    }

    #[test]
    fn image_prompt_names_leading_keywords() {
        let prompt = image_prompt(&[
            "ai".to_string(),
            "growth".to_string(),
            "innovation".to_string(),
            "ignored".to_string(),
        ]);
        assert!(prompt.contains("ai, growth, innovation"));
        assert!(!prompt.contains("ignored"));
    }
}
