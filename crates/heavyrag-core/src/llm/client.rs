//! HTTP client for the hosted model invocation service

use super::{GenerationConfig, TextGenerator};
use crate::config::ServiceConfig;
use crate::error::{RagError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// API metrics for monitoring
#[derive(Debug, Default)]
pub struct APIMetrics {
    pub total_requests: AtomicU64,
    pub total_errors: AtomicU64,
    pub total_latency_ms: AtomicU64,
}

/// Snapshot of API metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
}

/// Titan-style text generation client
pub struct BedrockClient {
    http_client: reqwest::Client,
    config: ServiceConfig,
    metrics: Arc<APIMetrics>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokeRequest<'a> {
    input_text: &'a str,
    text_generation_config: TextGenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextGenerationConfig {
    max_token_count: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    results: Vec<InvokeResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokeResult {
    #[serde(default)]
    output_text: String,
}

impl BedrockClient {
    /// Create new client from configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(RagError::Http)?;

        Ok(Self {
            http_client,
            config,
            metrics: Arc::new(APIMetrics::default()),
        })
    }

    /// Get current API metrics
    ///
    /// Latency is only recorded for successful calls, so the average is taken
    /// over those.
    pub fn metrics(&self) -> MetricsSnapshot {
        let total = self.metrics.total_requests.load(Ordering::Relaxed);
        let errors = self.metrics.total_errors.load(Ordering::Relaxed);
        let succeeded = total.saturating_sub(errors);

        MetricsSnapshot {
            total_requests: total,
            total_errors: errors,
            avg_latency_ms: if succeeded > 0 {
                self.metrics.total_latency_ms.load(Ordering::Relaxed) as f64 / succeeded as f64
            } else {
                0.0
            },
        }
    }

    fn record_error(&self) {
        self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl TextGenerator for BedrockClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let start = Instant::now();
        self.metrics.total_requests.fetch_add(1, Ordering::Relaxed);

        let request = InvokeRequest {
            input_text: prompt,
            text_generation_config: TextGenerationConfig {
                max_token_count: config.max_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
            },
        };

        let url = format!(
            "{}/model/{}/invoke",
            self.config.runtime_url(),
            self.config.model
        );

        let mut req = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .json(&request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(|e| {
            self.record_error();
            RagError::Http(e)
        })?;

        if !response.status().is_success() {
            self.record_error();
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Service { status, body });
        }

        let invoke_response: InvokeResponse = response.json().await.map_err(|e| {
            self.record_error();
            RagError::Http(e)
        })?;

        let text = invoke_response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| {
                self.record_error();
                RagError::EmptyResponse(self.config.model.clone())
            })?
            .output_text;

        let elapsed = start.elapsed().as_millis() as u64;
        self.metrics
            .total_latency_ms
            .fetch_add(elapsed, Ordering::Relaxed);
        tracing::debug!("Generation took {}ms ({} chars)", elapsed, text.len());

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
