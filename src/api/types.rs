// src/api/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{FeedbackItem, IterationRecord};
use crate::registry::{TxAction, TxStatus};

/// Request body for running a content workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_iterations: Option<u32>,
    #[serde(default)]
    pub min_quality_score: Option<f32>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub aspects: Option<Vec<String>>,
    /// Extra generation knobs forwarded to the generator untouched.
    #[serde(default)]
    pub generation_params: serde_json::Map<String, serde_json::Value>,
}

/// Response for a completed workflow run.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
    pub feedback: Vec<FeedbackItem>,
    pub iteration_index: u32,
    pub prompt_used: String,
    pub total_iterations: u32,
    pub best_score: f32,
    pub threshold_met: bool,
    pub timestamp: DateTime<Utc>,
}

impl GenerateResponse {
    pub fn from_run(best: IterationRecord, total_iterations: u32, threshold_met: bool) -> Self {
        Self {
            content: best.content,
            feedback: best.feedback,
            iteration_index: best.index,
            prompt_used: best.prompt_used,
            total_iterations,
            best_score: best.quality_score,
            threshold_met,
            timestamp: best.created_at,
        }
    }
}

/// Request body for a one-shot review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub content: String,
    #[serde(default)]
    pub aspects: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub feedback: Vec<FeedbackItem>,
    pub overall_score: f32,
    pub timestamp: DateTime<Utc>,
}

/// Request body for registering content ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub content: String,
    pub owner: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Request body for transferring content ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub content_hash: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub tx_id: String,
    pub action: TxAction,
    pub content_hash: String,
    pub status: TxStatus,
    pub timestamp: DateTime<Utc>,
}

/// Error response body. `best` carries the best-so-far iteration when a
/// workflow aborts after at least one successful pass.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<IterationRecord>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            best: None,
        }
    }
}
