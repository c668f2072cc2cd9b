// src/agents/creative.rs — HTTP text-generation adapter

use async_trait::async_trait;

use super::{GenerationOutput, Generator};
use crate::core::types::GenerationParams;
use crate::infra::errors::SkyrunError;

/// Generator backed by an OpenAI-compatible completions endpoint.
pub struct CreativeAgent {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl CreativeAgent {
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

    fn build_request_body(&self, prompt: &str, params: &GenerationParams) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "max_tokens": params.max_length,
            "temperature": params.temperature,
        });

        // Opaque pass-through knobs; the coordinator never interprets these.
        for (key, value) in &params.extra {
            body[key] = value.clone();
        }

        body
    }
}

/// Extract generated text from an OpenAI-compatible completions response.
fn parse_completion(body: &serde_json::Value) -> Option<String> {
    body["choices"][0]["text"]
        .as_str()
        .or_else(|| body["choices"][0]["message"]["content"].as_str())
        .map(str::to_string)
}

#[async_trait]
impl Generator for CreativeAgent {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerationOutput, SkyrunError> {
        let url = format!("{}/completions", self.base_url);
        let mut request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&self.build_request_body(prompt, params));

        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| SkyrunError::Generation {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkyrunError::Generation {
                message: format!("HTTP {status}: {body}"),
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| SkyrunError::Generation {
                message: format!("invalid response body: {e}"),
            })?;

        let content = parse_completion(&body).ok_or_else(|| SkyrunError::Generation {
            message: "response contained no generated text".into(),
        })?;

        Ok(GenerationOutput {
            content,
            model: self.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_body() {
        let agent = CreativeAgent::new("http://localhost:8080/v1", "gpt2");
        let body = agent.build_request_body("Write a haiku", &GenerationParams::default());

        assert_eq!(body["model"], "gpt2");
        assert_eq!(body["prompt"], "Write a haiku");
        assert_eq!(body["max_tokens"], 200);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_build_request_body_passes_extra_through() {
        let agent = CreativeAgent::new("http://localhost:8080/v1", "gpt2");
        let mut params = GenerationParams::default();
        params
            .extra
            .insert("top_p".into(), serde_json::json!(0.95));
        params
            .extra
            .insert("stop".into(), serde_json::json!(["\n\n"]));

        let body = agent.build_request_body("p", &params);
        assert_eq!(body["top_p"], serde_json::json!(0.95));
        assert_eq!(body["stop"], serde_json::json!(["\n\n"]));
    }

    #[test]
    fn test_parse_completion_text() {
        let body = serde_json::json!({"choices": [{"text": "a generated line"}]});
        assert_eq!(parse_completion(&body).as_deref(), Some("a generated line"));
    }

    #[test]
    fn test_parse_completion_chat_shape() {
        let body = serde_json::json!({"choices": [{"message": {"content": "chat text"}}]});
        assert_eq!(parse_completion(&body).as_deref(), Some("chat text"));
    }

    #[test]
    fn test_parse_completion_empty() {
        assert!(parse_completion(&serde_json::json!({})).is_none());
        assert!(parse_completion(&serde_json::json!({"choices": []})).is_none());
    }
}
