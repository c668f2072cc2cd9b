// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::errors::SkyrunError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Base URL of the OpenAI-compatible endpoint serving the creative model.
    pub generator_url: String,
    pub generator_model: String,
    /// Base URL of the endpoint serving the judge model.
    pub evaluator_url: String,
    pub evaluator_model: String,
    /// Environment variable holding the API key for both endpoints.
    pub api_key_env: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            generator_url: "http://localhost:8080/v1".into(),
            generator_model: "gpt2".into(),
            evaluator_url: "http://localhost:8080/v1".into(),
            evaluator_model: "bert-base-uncased".into(),
            api_key_env: "SKYRUN_API_KEY".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub max_iterations: u32,
    pub min_quality_score: f32,
    pub max_length: u32,
    pub temperature: f32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            min_quality_score: 0.7,
            max_length: 200,
            temperature: 0.7,
        }
    }
}

impl Config {
    /// Load config from the first location that exists:
    /// `$SKYRUN_CONFIG`, `./skyrun.toml`, then the user config dir.
    /// Missing files fall back to defaults.
    pub fn load() -> Result<Self, SkyrunError> {
        for path in Self::candidate_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self, SkyrunError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| SkyrunError::Config(format!("{}: {}", path.display(), e)))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(p) = std::env::var("SKYRUN_CONFIG") {
            paths.push(PathBuf::from(p));
        }
        paths.push(PathBuf::from("skyrun.toml"));
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("skyrun").join("config.toml"));
        }
        paths
    }

    /// Resolve the collaborator API key from the configured env var, if set.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.models.api_key_env).ok()
    }
}
