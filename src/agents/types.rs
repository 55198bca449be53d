//! Request and result types for the capability agents.
//!
//! Requests are validated at construction: a value of one of these types is
//! valid by definition, so the process functions never re-check shape.
//! Results are plain data, never mutated after creation.

use serde::Serialize;
use thiserror::Error;

use crate::config::{Capability, ImageQuality, ImageSize};

/// A request failed its shape check. Fatal to the call that built it.
#[derive(Debug, Clone, Error)]
#[error("invalid {capability} request: field '{field}': {reason}")]
pub struct ValidationError {
    pub capability: Capability,
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(capability: Capability, field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            capability,
            field,
            reason: reason.into(),
        }
    }
}

/// A topic analysis request.
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    topic: String,
    depth: u8,
}

impl ResearchRequest {
    /// # Errors
    ///
    /// Fails if `topic` is empty after trimming or `depth` is outside 1-3.
    pub fn new(topic: impl Into<String>, depth: u8) -> Result<Self, ValidationError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ValidationError::new(
                Capability::Research,
                "topic",
                "must not be empty",
            ));
        }
        if !(1..=3).contains(&depth) {
            return Err(ValidationError::new(
                Capability::Research,
                "depth",
                format!("must be between 1 and 3, got {depth}"),
            ));
        }
        Ok(Self { topic, depth })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

/// An article creation request, usually built from a research brief.
#[derive(Debug, Clone)]
pub struct WriterRequest {
    title: String,
    executive_summary: String,
    key_points: Vec<String>,
    keywords: Vec<String>,
    tone: String,
}

impl WriterRequest {
    /// # Errors
    ///
    /// Fails if `title` or `executive_summary` is empty after trimming, or if
    /// `key_points` is empty. An empty `tone` falls back to `professional`.
    pub fn new(
        title: impl Into<String>,
        executive_summary: impl Into<String>,
        key_points: Vec<String>,
        keywords: Vec<String>,
        tone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::new(
                Capability::Writing,
                "title",
                "must not be empty",
            ));
        }
        let executive_summary = executive_summary.into().trim().to_string();
        if executive_summary.is_empty() {
            return Err(ValidationError::new(
                Capability::Writing,
                "executive_summary",
                "must not be empty",
            ));
        }
        if key_points.is_empty() {
            return Err(ValidationError::new(
                Capability::Writing,
                "key_points",
                "must contain at least one entry",
            ));
        }
        let tone = tone.into().trim().to_string();
        let tone = if tone.is_empty() {
            "professional".to_string()
        } else {
            tone
        };
        Ok(Self {
            title,
            executive_summary,
            key_points,
            keywords,
            tone,
        })
    }

    /// Build a writer request from a completed research brief.
    pub fn from_brief(brief: &ResearchResult) -> Result<Self, ValidationError> {
        Self::new(
            brief.title.clone(),
            brief.executive_summary.clone(),
            brief.key_points.clone(),
            brief.keywords.clone(),
            "professional",
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn executive_summary(&self) -> &str {
        &self.executive_summary
    }

    pub fn key_points(&self) -> &[String] {
        &self.key_points
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }
}

/// An image generation request.
///
/// `keywords` drive the deterministic placeholder identifier on the
/// simulation path; the prompt drives the real model.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    prompt: String,
    style: String,
    size: ImageSize,
    quality: ImageQuality,
    keywords: Vec<String>,
}

impl ImageRequest {
    /// # Errors
    ///
    /// Fails if `prompt` is empty after trimming. An empty `style` falls back
    /// to `professional`.
    pub fn new(
        prompt: impl Into<String>,
        style: impl Into<String>,
        size: ImageSize,
        quality: ImageQuality,
        keywords: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(ValidationError::new(
                Capability::Image,
                "prompt",
                "must not be empty",
            ));
        }
        let style = style.into().trim().to_string();
        let style = if style.is_empty() {
            "professional".to_string()
        } else {
            style
        };
        Ok(Self {
            prompt,
            style,
            size,
            quality,
            keywords,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn quality(&self) -> ImageQuality {
        self.quality
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Result of a research run.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchResult {
    pub title: String,
    pub executive_summary: String,
    pub key_points: Vec<String>,
    pub keywords: Vec<String>,
    /// Confidence score in [0, 1].
    pub research_confidence: f64,
    pub methodology: String,
    /// Model identifier or the simulation label.
    pub model_used: String,
}

/// Result of an article creation run.
#[derive(Debug, Clone, Serialize)]
pub struct WriterResult {
    /// Article body as HTML.
    pub article_text: String,
    pub keywords: Vec<String>,
    /// Whitespace-token count of `article_text`.
    pub word_count: usize,
    pub writing_style: String,
    pub model_used: String,
}

impl WriterResult {
    /// Build a result, deriving `word_count` from the article text.
    pub fn new(
        article_text: impl Into<String>,
        keywords: Vec<String>,
        writing_style: impl Into<String>,
        model_used: impl Into<String>,
    ) -> Self {
        let article_text = article_text.into();
        let word_count = article_text.split_whitespace().count();
        Self {
            article_text,
            keywords,
            word_count,
            writing_style: writing_style.into(),
            model_used: model_used.into(),
        }
    }
}

/// Result of an image generation run.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResult {
    pub image_url: String,
    pub alt_text: String,
    pub prompt_used: String,
    pub style_used: String,
    /// Dimensions as `WIDTHxHEIGHT`.
    pub dimensions: String,
    /// Payload format label, e.g. `PNG` or `JPEG`.
    pub format: String,
    pub generation_method: String,
    pub model_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_request_rejects_blank_topic() {
        let err = ResearchRequest::new("   ", 1).unwrap_err();
        assert_eq!(err.field, "topic");
        assert_eq!(err.capability, Capability::Research);
    }

    #[test]
    fn research_request_rejects_out_of_range_depth() {
        let err = ResearchRequest::new("Robotics", 0).unwrap_err();
        assert_eq!(err.field, "depth");
        let err = ResearchRequest::new("Robotics", 4).unwrap_err();
        assert_eq!(err.field, "depth");
        assert!(ResearchRequest::new("Robotics", 3).is_ok());
    }

    #[test]
    fn research_request_trims_topic() {
        let request = ResearchRequest::new("  Robotics  ", 2).unwrap();
        assert_eq!(request.topic(), "Robotics");
        assert_eq!(request.depth(), 2);
    }

    #[test]
    fn writer_request_names_offending_field() {
        let err = WriterRequest::new("", "summary", vec!["p".into()], vec![], "").unwrap_err();
        assert_eq!(err.field, "title");

        let err = WriterRequest::new("Title", "  ", vec!["p".into()], vec![], "").unwrap_err();
        assert_eq!(err.field, "executive_summary");

        let err = WriterRequest::new("Title", "summary", vec![], vec![], "").unwrap_err();
        assert_eq!(err.field, "key_points");
    }

    #[test]
    fn writer_request_defaults_tone() {
        let request =
            WriterRequest::new("Title", "Summary", vec!["point".into()], vec![], "  ").unwrap();
        assert_eq!(request.tone(), "professional");
    }

    #[test]
    fn image_request_rejects_blank_prompt() {
        let err = ImageRequest::new(
            "",
            "modern",
            ImageSize::Square,
            ImageQuality::Standard,
            vec![],
        )
        .unwrap_err();
        assert_eq!(err.field, "prompt");
        assert_eq!(err.capability, Capability::Image);
    }

    #[test]
    fn writer_result_counts_whitespace_tokens() {
        let result = WriterResult::new("one two  three\nfour", vec![], "professional", "m");
        assert_eq!(result.word_count, 4);
    }
}
