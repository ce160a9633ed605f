//! HTTP-based embedding provider that calls a sentence-encoder service

use crate::EmbeddingProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Request to the encoder service
#[derive(Debug, Serialize)]
struct EncodeRequest<'a> {
    texts: &'a [String],
    model: &'a str,
}

/// Response from the encoder service
#[derive(Debug, Deserialize)]
struct EncodeResponse {
    embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    dimension: Option<usize>,
}

/// Embedding provider backed by a remote model server.
///
/// The model is loaded once by the service; this client only ships text.
pub struct HttpEmbeddingProvider {
    service_url: String,
    model: String,
    client: reqwest::Client,
}

impl HttpEmbeddingProvider {
    pub fn new(service_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    fn encode_url(&self) -> String {
        format!("{}/encode", self.service_url)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.service_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let request = EncodeRequest {
            texts,
            model: &self.model,
        };

        let response = self
            .client
            .post(self.encode_url())
            .json(&request)
            .send()
            .await
            .context("Failed to call embedding service")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Embedding service error ({}): {}", status, error_text);
        }

        let encoded: EncodeResponse = response
            .json()
            .await
            .context("Failed to parse embedding service response")?;

        if encoded.embeddings.len() != texts.len() {
            anyhow::bail!(
                "Embedding service returned {} vectors for {} texts",
                encoded.embeddings.len(),
                texts.len()
            );
        }

        tracing::debug!(
            "Encoded {} texts (dim {:?}) in {:.1}ms",
            texts.len(),
            encoded.dimension,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(encoded.embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_url_strips_trailing_slash() {
        let provider = HttpEmbeddingProvider::new("http://127.0.0.1:8083/", "paraphrase-MiniLM-L6-v2");
        assert_eq!(provider.encode_url(), "http://127.0.0.1:8083/encode");
    }

    #[test]
    fn test_request_shape() {
        let texts = vec!["Data Science".to_string()];
        let req = EncodeRequest {
            texts: &texts,
            model: "paraphrase-MiniLM-L6-v2",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["texts"][0], "Data Science");
        assert_eq!(json["model"], "paraphrase-MiniLM-L6-v2");
    }

    #[test]
    fn test_response_without_dimension() {
        let resp: EncodeResponse = serde_json::from_str(r#"{"embeddings": [[0.1, 0.2]]}"#).unwrap();
        assert_eq!(resp.embeddings.len(), 1);
        assert!(resp.dimension.is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        // Unroutable address: would fail if a request were made
        let provider = HttpEmbeddingProvider::new("http://127.0.0.1:1", "m");
        assert!(provider.encode(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires running embedding service
    async fn test_http_provider_integration() {
        let provider = HttpEmbeddingProvider::new("http://127.0.0.1:8083", "paraphrase-MiniLM-L6-v2");
        assert!(provider.health_check().await.unwrap());
        let out = provider.encode(&["Civil Engineering".to_string()]).await.unwrap();
        assert_eq!(out.len(), 1);
    }
}
