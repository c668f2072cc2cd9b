// src/core/types.rs — Core workflow domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::errors::SkyrunError;

/// The aspect the coordinator scores runs by. The evaluator must always
/// include it when requested.
pub const QUALITY_ASPECT: &str = "quality";

/// Aspect set used when a request does not override it.
pub fn default_aspects() -> Vec<String> {
    vec![
        QUALITY_ASPECT.into(),
        "relevance".into(),
        "creativity".into(),
    ]
}

/// Knobs passed through to the generation collaborator.
///
/// `extra` holds provider-specific fields the coordinator does not interpret;
/// they are flattened into the wire request as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub temperature: f32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 200,
            temperature: 0.7,
            extra: serde_json::Map::new(),
        }
    }
}

/// One workflow run's input. Immutable for the lifetime of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub prompt: String,
    pub max_iterations: u32,
    pub min_quality_score: f32,
    /// Override of the default `quality, relevance, creativity` aspect set.
    pub aspects: Option<Vec<String>>,
    pub params: GenerationParams,
}

impl WorkflowRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_iterations: 3,
            min_quality_score: 0.7,
            aspects: None,
            params: GenerationParams::default(),
        }
    }

    /// Checked before any collaborator call. An empty prompt is accepted;
    /// collaborators tolerate it and rejecting it is the caller's business.
    pub fn validate(&self) -> Result<(), SkyrunError> {
        if self.max_iterations < 1 {
            return Err(SkyrunError::InvalidRequest(
                "max_iterations must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_quality_score) {
            return Err(SkyrunError::InvalidRequest(format!(
                "min_quality_score must be in [0, 1], got {}",
                self.min_quality_score
            )));
        }
        Ok(())
    }

    /// Aspects to evaluate, honoring a request override.
    pub fn aspect_set(&self) -> Vec<String> {
        self.aspects.clone().unwrap_or_else(default_aspects)
    }
}

/// Per-aspect evaluation feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub aspect: String,
    pub score: f32,
    pub comment: String,
}

/// One loop pass. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 0-based, always < the request's `max_iterations`.
    pub index: u32,
    pub prompt_used: String,
    pub content: String,
    /// Ordered as the evaluator returned them; aspect names are unique.
    pub feedback: Vec<FeedbackItem>,
    /// Score of the `quality` aspect.
    pub quality_score: f32,
    pub created_at: DateTime<Utc>,
}

/// Summary of a completed run, appended to the shared history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowHistoryEntry {
    pub completed_at: DateTime<Utc>,
    pub iterations_run: u32,
    pub best_score: f32,
    pub final_prompt: String,
}

/// Final result returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub best: Option<IterationRecord>,
    pub total_iterations: u32,
    pub best_score: f32,
    pub threshold_met: bool,
}
