//! Configuration management

use crate::error::{RagError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Generation and knowledge base service configuration
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Connection settings for the hosted generation and retrieval services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Region used to derive default endpoints
    #[serde(default = "default_region")]
    pub region: String,

    /// Base URL of the model invocation service (derived from region if not specified)
    #[serde(default = "default_runtime_url")]
    pub runtime_url: Option<String>,

    /// Base URL of the knowledge base retrieval service (derived from region if not specified)
    #[serde(default = "default_agent_runtime_url")]
    pub agent_runtime_url: Option<String>,

    /// Model identifier used for classification and answer generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token (optional, for authenticated services)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Configuration pointing both services at the same base URL
    pub fn with_base_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            region: default_region(),
            runtime_url: Some(url.clone()),
            agent_runtime_url: Some(url),
            model: crate::DEFAULT_MODEL_ID.to_string(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }

    /// Get the model invocation URL (falls back to the regional endpoint)
    pub fn runtime_url(&self) -> String {
        match self.runtime_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }

    /// Get the retrieval URL (falls back to the regional endpoint)
    pub fn agent_runtime_url(&self) -> String {
        match self.agent_runtime_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-agent-runtime.{}.amazonaws.com", self.region),
        }
    }

    /// Reject settings no request could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(RagError::Config("service.model must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(RagError::Config(
                "service.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            runtime_url: default_runtime_url(),
            agent_runtime_url: default_agent_runtime_url(),
            model: default_model(),
            api_key: default_api_key(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_region() -> String {
    std::env::var("HEAVYRAG_REGION").unwrap_or_else(|_| "us-west-2".to_string())
}

fn default_runtime_url() -> Option<String> {
    std::env::var("HEAVYRAG_RUNTIME_URL").ok()
}

fn default_agent_runtime_url() -> Option<String> {
    std::env::var("HEAVYRAG_AGENT_RUNTIME_URL").ok()
}

fn default_api_key() -> Option<String> {
    std::env::var("HEAVYRAG_API_KEY")
        .or_else(|_| std::env::var("AWS_BEARER_TOKEN_BEDROCK"))
        .ok()
}

fn default_model() -> String {
    std::env::var("HEAVYRAG_MODEL").unwrap_or_else(|_| crate::DEFAULT_MODEL_ID.to_string())
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from a specific path, using defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            config.service.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config path (`HEAVYRAG_CONFIG` overrides it)
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("HEAVYRAG_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}
