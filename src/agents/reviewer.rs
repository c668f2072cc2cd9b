// src/agents/reviewer.rs — HTTP judge adapter

use async_trait::async_trait;

use super::Evaluator;
use crate::core::types::FeedbackItem;
use crate::infra::errors::SkyrunError;

/// Judge responses that omit an aspect get this score, flagged in the
/// item's comment so the gap is visible to callers.
const FALLBACK_SCORE: f32 = 0.75;

/// Evaluator backed by a judge model behind an OpenAI-compatible endpoint.
///
/// Prompts the model to score each requested aspect on one line and parses
/// the `aspect: score` lines back out.
pub struct ReviewerAgent {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ReviewerAgent {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    fn judge_prompt(content: &str, aspects: &[String]) -> String {
        format!(
            "You are a content reviewer. Score the content below on each aspect \
             from 0.0 to 1.0.\n\n\
             ## Aspects\n{}\n\n\
             ## Content\n{}\n\n\
             Respond with exactly one line per aspect:\n\
             aspect_name: score",
            aspects.join(", "),
            content
        )
    }

    async fn complete(&self, prompt: String) -> Result<String, SkyrunError> {
        let url = format!("{}/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "max_tokens": 256,
            "temperature": 0.0,
        });

        let mut request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body);

        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| SkyrunError::Evaluation {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkyrunError::Evaluation {
                message: format!("HTTP {status}: {body}"),
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| SkyrunError::Evaluation {
                message: format!("invalid response body: {e}"),
            })?;

        body["choices"][0]["text"]
            .as_str()
            .or_else(|| body["choices"][0]["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| SkyrunError::Evaluation {
                message: "judge response contained no text".into(),
            })
    }
}

/// Parse a line like "quality: 0.85" or "- quality: 0.85".
/// Out-of-range scores are rejected.
fn parse_score_line(line: &str) -> Option<(String, f32)> {
    let line = line.trim_start_matches('-').trim();
    let (name, score_str) = line.split_once(':')?;
    let score: f32 = score_str.trim().parse().ok()?;

    if !(0.0..=1.0).contains(&score) {
        return None;
    }

    Some((name.trim().to_lowercase(), score))
}

/// Human-readable comment for a scored aspect.
fn comment_for(aspect: &str, score: f32) -> String {
    if score >= 0.8 {
        format!("Excellent {aspect}!")
    } else if score >= 0.6 {
        format!("Good {aspect}, with room for improvement.")
    } else if score >= 0.4 {
        format!("Average {aspect}, needs significant improvement.")
    } else {
        format!("Poor {aspect}, requires major revision.")
    }
}

/// Assemble feedback in requested-aspect order, one item per aspect.
fn feedback_from_response(response: &str, aspects: &[String]) -> Vec<FeedbackItem> {
    let parsed: Vec<(String, f32)> = response.lines().filter_map(parse_score_line).collect();

    aspects
        .iter()
        .map(|aspect| {
            match parsed
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(aspect))
            {
                Some((_, score)) => FeedbackItem {
                    aspect: aspect.clone(),
                    score: *score,
                    comment: comment_for(aspect, *score),
                },
                None => FeedbackItem {
                    aspect: aspect.clone(),
                    score: FALLBACK_SCORE,
                    comment: format!("No {aspect} score in judge response; using default."),
                },
            }
        })
        .collect()
}

#[async_trait]
impl Evaluator for ReviewerAgent {
    async fn evaluate(
        &self,
        content: &str,
        aspects: &[String],
    ) -> Result<Vec<FeedbackItem>, SkyrunError> {
        let response = self.complete(Self::judge_prompt(content, aspects)).await?;
        Ok(feedback_from_response(&response, aspects))
    }
}
