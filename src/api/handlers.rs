// src/api/handlers.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::{types::*, ApiState};
use crate::core::types::{GenerationParams, WorkflowHistoryEntry, WorkflowRequest};
use crate::infra::errors::SkyrunError;
use crate::registry::content_hash;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn registry_error(e: SkyrunError) -> ApiError {
    let status = match e {
        SkyrunError::ContentNotFound { .. } => StatusCode::NOT_FOUND,
        SkyrunError::NotOwner { .. } | SkyrunError::AlreadyRegistered { .. } => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

/// POST /api/v1/content/generate — Run the full workflow for a prompt.
pub async fn generate_content(
    State(state): State<ApiState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let defaults = &state.workflow_defaults;
    let request = WorkflowRequest {
        prompt: body.prompt,
        max_iterations: body.max_iterations.unwrap_or(defaults.max_iterations),
        min_quality_score: body
            .min_quality_score
            .unwrap_or(defaults.min_quality_score),
        aspects: body.aspects,
        params: GenerationParams {
            max_length: body.max_length.unwrap_or(defaults.max_length),
            temperature: body.temperature.unwrap_or(defaults.temperature),
            extra: body.generation_params,
        },
    };

    match state.coordinator.run(request).await {
        Ok(result) => {
            let total_iterations = result.total_iterations;
            let threshold_met = result.threshold_met;
            let best = result.best.ok_or_else(|| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Run produced no iterations")),
                )
            })?;
            Ok(Json(GenerateResponse::from_run(
                best,
                total_iterations,
                threshold_met,
            )))
        }
        Err(failure) => {
            let status = match failure.source {
                SkyrunError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: failure.source.to_string(),
                    best: failure.best,
                }),
            ))
        }
    }
}

/// POST /api/v1/content/review — One-shot evaluation of caller content.
pub async fn review_content(
    State(state): State<ApiState>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let aspects = body
        .aspects
        .unwrap_or_else(crate::core::types::default_aspects);

    let feedback = state
        .evaluator
        .evaluate(&body.content, &aspects)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.to_string())),
            )
        })?;

    let overall_score = if feedback.is_empty() {
        0.0
    } else {
        feedback.iter().map(|f| f.score).sum::<f32>() / feedback.len() as f32
    };

    Ok(Json(ReviewResponse {
        feedback,
        overall_score,
        timestamp: chrono::Utc::now(),
    }))
}

/// POST /api/v1/content/register — Record content ownership.
pub async fn register_content(
    State(state): State<ApiState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let hash = content_hash(&body.content);
    let tx = state
        .registry
        .register(&hash, &body.owner, body.metadata)
        .map_err(registry_error)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            tx_id: tx.tx_id,
            action: tx.action,
            content_hash: tx.content_hash,
            status: tx.status,
            timestamp: tx.timestamp,
        }),
    ))
}

/// POST /api/v1/content/transfer — Transfer content ownership.
pub async fn transfer_content(
    State(state): State<ApiState>,
    Json(body): Json<TransferRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let tx = state
        .registry
        .transfer_ownership(&body.content_hash, &body.from, &body.to)
        .map_err(registry_error)?;

    Ok(Json(TransactionResponse {
        tx_id: tx.tx_id,
        action: tx.action,
        content_hash: tx.content_hash,
        status: tx.status,
        timestamp: tx.timestamp,
    }))
}

/// GET /api/v1/history — Completed workflow runs, oldest first.
pub async fn get_history(State(state): State<ApiState>) -> Json<Vec<WorkflowHistoryEntry>> {
    Json(state.coordinator.history().entries())
}

/// GET /api/v1/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
