// src/core/coordinator.rs — The generate→evaluate→refine loop

use std::sync::Arc;

use chrono::Utc;

use crate::agents::{Evaluator, Generator};
use crate::core::history::{HistoryStore, InMemoryHistory};
use crate::core::refine::refine_prompt;
use crate::core::types::*;
use crate::infra::errors::{SkyrunError, WorkflowFailure};

/// Drives workflow runs against a generator/evaluator pair.
///
/// Runs are independent: each `run` call owns its prompt, iteration counter
/// and best-so-far record. The only state shared between concurrent runs is
/// the history store, which serializes its own appends.
pub struct Coordinator {
    generator: Arc<dyn Generator>,
    evaluator: Arc<dyn Evaluator>,
    history: Arc<dyn HistoryStore>,
}

impl Coordinator {
    pub fn new(generator: Arc<dyn Generator>, evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            generator,
            evaluator,
            history: Arc::new(InMemoryHistory::new()),
        }
    }

    /// Substitute the history store (e.g. an in-memory one in tests, or a
    /// persistent one in a deployment).
    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = history;
        self
    }

    pub fn history(&self) -> Arc<dyn HistoryStore> {
        Arc::clone(&self.history)
    }

    /// Run the full workflow for one request.
    ///
    /// Generates, evaluates, and refines until the quality threshold is met
    /// or `max_iterations` passes have run. The returned result always
    /// carries the best-scoring iteration; on collaborator failure the run
    /// aborts without a history entry and the error carries whatever best
    /// record prior iterations established.
    pub async fn run(&self, request: WorkflowRequest) -> Result<WorkflowResult, WorkflowFailure> {
        if let Err(e) = request.validate() {
            return Err(WorkflowFailure::new(e));
        }

        let run_id = uuid::Uuid::new_v4();
        let aspects = request.aspect_set();
        let mut current_prompt = request.prompt.clone();
        let mut best: Option<IterationRecord> = None;
        let mut completed: u32 = 0;

        tracing::info!(
            %run_id,
            max_iterations = request.max_iterations,
            min_quality_score = request.min_quality_score,
            "Starting workflow run"
        );

        for index in 0..request.max_iterations {
            let output = match self.generator.generate(&current_prompt, &request.params).await {
                Ok(o) => o,
                Err(e) => {
                    tracing::error!(%run_id, iteration = index, "Generation failed: {e}");
                    return Err(WorkflowFailure::with_progress(e, best, completed));
                }
            };

            let feedback = match self.evaluator.evaluate(&output.content, &aspects).await {
                Ok(f) => f,
                Err(e) => {
                    tracing::error!(%run_id, iteration = index, "Evaluation failed: {e}");
                    return Err(WorkflowFailure::with_progress(e, best, completed));
                }
            };

            let quality_score = match feedback
                .iter()
                .find(|f| f.aspect == QUALITY_ASPECT)
                .map(|f| f.score)
            {
                Some(score) => score,
                None => {
                    let e = SkyrunError::Evaluation {
                        message: format!("evaluator omitted the '{QUALITY_ASPECT}' aspect"),
                    };
                    tracing::error!(%run_id, iteration = index, "{e}");
                    return Err(WorkflowFailure::with_progress(e, best, completed));
                }
            };

            let record = IterationRecord {
                index,
                prompt_used: current_prompt.clone(),
                content: output.content,
                feedback,
                quality_score,
                created_at: Utc::now(),
            };
            completed += 1;

            tracing::debug!(
                %run_id,
                iteration = index,
                quality_score,
                model = %output.model,
                "Iteration evaluated"
            );

            let threshold_met = quality_score >= request.min_quality_score;
            let budget_spent = index + 1 == request.max_iterations;

            if !threshold_met && !budget_spent {
                let next_prompt = refine_prompt(&current_prompt, &record.feedback);
                if next_prompt == current_prompt {
                    tracing::debug!(
                        %run_id,
                        iteration = index,
                        "Refinement left the prompt unchanged; relying on generator variance"
                    );
                }
                current_prompt = next_prompt;
            }

            // Strict greater-than: ties keep the earliest record.
            if best
                .as_ref()
                .map_or(true, |b| record.quality_score > b.quality_score)
            {
                best = Some(record);
            }

            if threshold_met || budget_spent {
                break;
            }
        }

        let best_score = best.as_ref().map(|b| b.quality_score).unwrap_or(0.0);
        let threshold_met = best_score >= request.min_quality_score;

        self.history.append(WorkflowHistoryEntry {
            completed_at: Utc::now(),
            iterations_run: completed,
            best_score,
            final_prompt: current_prompt,
        });

        tracing::info!(
            %run_id,
            iterations = completed,
            best_score,
            threshold_met,
            "Workflow run complete"
        );

        Ok(WorkflowResult {
            best,
            total_iterations: completed,
            best_score,
            threshold_met,
        })
    }
}
