//! Capability agents.
//!
//! One process function per capability, all with the same shape:
//! take the configuration table and an LLM client, try the real model when
//! the capability is in real mode, and fall back to the deterministic
//! templater on any external failure. A failed external call is never fatal
//! to the pipeline.
//!
//! There is no agent hierarchy and no dynamic dispatch: the call sites are
//! fixed in the orchestrator, so each capability is a free function over the
//! shared [`PipelineConfig`](crate::config::PipelineConfig) table.

pub mod image;
pub mod research;
pub mod types;
pub mod writer;

pub use types::{
    ImageRequest, ImageResult, ResearchRequest, ResearchResult, ValidationError, WriterRequest,
    WriterResult,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Label applied to results produced by the templater, both when simulation
/// mode is on and when a real call failed and fell back.
pub const SIMULATION_LABEL: &str = "Enhanced Simulation";

/// Generic wrapper passing a result between pipeline stages.
///
/// Carries no identity beyond its contents and is never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Message<T> {
    pub content: T,
    /// MIME type label for the content.
    pub media_type: String,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
    /// Model identifier or the simulation label.
    pub model_used: String,
}

impl<T> Message<T> {
    pub fn new(content: T, media_type: impl Into<String>, model_used: impl Into<String>) -> Self {
        Self {
            content,
            media_type: media_type.into(),
            timestamp: Utc::now(),
            model_used: model_used.into(),
        }
    }
}
