// src/agents/mod.rs — Collaborator capability traits

pub mod creative;
pub mod reviewer;

use async_trait::async_trait;

use crate::core::types::{FeedbackItem, GenerationParams};
use crate::infra::errors::SkyrunError;

/// Output of one generation call.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub content: String,
    /// Model that produced the content, for logging and response metadata.
    pub model: String,
}

/// Content generation capability.
///
/// Safe to call repeatedly with the same prompt; outputs may differ per call.
/// Failures are opaque to the coordinator beyond failed vs succeeded.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerationOutput, SkyrunError>;
}

/// Content evaluation capability.
///
/// Returns one `FeedbackItem` per requested aspect, scores in [0, 1], in the
/// order the aspects were requested. When `quality` is among the requested
/// aspects the result must include it; the coordinator scores runs by it.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(
        &self,
        content: &str,
        aspects: &[String],
    ) -> Result<Vec<FeedbackItem>, SkyrunError>;
}
