// src/infra/errors.rs — Error types for skyrun

use thiserror::Error;

use crate::core::types::IterationRecord;

#[derive(Error, Debug)]
pub enum SkyrunError {
    // Rejected before any collaborator call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Collaborator failures (opaque to the coordinator beyond failed/succeeded)
    #[error("Generation failed: {message}")]
    Generation { message: String },

    #[error("Evaluation failed: {message}")]
    Evaluation { message: String },

    // Registry errors
    #[error("Content '{hash}' is not registered")]
    ContentNotFound { hash: String },

    #[error("'{address}' does not own content '{hash}'")]
    NotOwner { hash: String, address: String },

    #[error("Content '{hash}' is already registered")]
    AlreadyRegistered { hash: String },

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A failed workflow run.
///
/// Carries whatever best-so-far record earlier successful iterations
/// established, so callers never lose progress to a late collaborator error.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct WorkflowFailure {
    #[source]
    pub source: SkyrunError,
    pub best: Option<IterationRecord>,
    pub iterations_completed: u32,
}

impl WorkflowFailure {
    pub fn new(source: SkyrunError) -> Self {
        Self {
            source,
            best: None,
            iterations_completed: 0,
        }
    }

    pub fn with_progress(
        source: SkyrunError,
        best: Option<IterationRecord>,
        iterations_completed: u32,
    ) -> Self {
        Self {
            source,
            best,
            iterations_completed,
        }
    }
}
