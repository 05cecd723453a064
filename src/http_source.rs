//! HTTP client for the text-extraction service

use crate::sources::TextSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Text source backed by an extraction service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExtractSource {
    base_url: String,
    client: reqwest::Client,
}

/// Response from the extraction service
#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub document: String,
    pub text: String,
    #[serde(default)]
    pub page_count: usize,
    #[serde(default)]
    pub char_count: usize,
}

impl HttpExtractSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the extracted text for a document reference.
    pub async fn extract(&self, document: &str) -> Result<ExtractResponse> {
        let url = format!(
            "{}/extract?document={}",
            self.base_url,
            urlencoding::encode(document)
        );

        debug!("Fetching extracted text from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call extraction service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Extraction service error {}: {}", status, body);
        }

        let extracted: ExtractResponse = response
            .json()
            .await
            .context("Failed to parse extraction service response")?;

        debug!(
            "Extracted {} chars across {} pages from '{}'",
            extracted.char_count, extracted.page_count, extracted.document
        );

        Ok(extracted)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl TextSource for HttpExtractSource {
    fn name(&self) -> &'static str {
        "http_extract"
    }

    async fn fetch_text(&self, document: &str) -> Result<String> {
        let extracted = self.extract(document).await?;
        if extracted.text.trim().is_empty() {
            anyhow::bail!("Extraction service returned no text for '{}'", document);
        }
        Ok(extracted.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires running extraction service
    async fn test_extract_source_integration() {
        let source = HttpExtractSource::new("http://127.0.0.1:8091");

        let health = source.health_check().await;
        assert!(health.is_ok());
    }
}
