//! Pluggable sources of extracted report text

use anyhow::Result;
use async_trait::async_trait;

/// A provider that turns a document reference into raw report text.
/// Document extraction (PDF or otherwise) happens behind this seam; the
/// triage core only ever sees the text.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_text(&self, document: &str) -> Result<String>;
}

/// Canned text source for testing
pub struct MockTextSource {
    text: String,
}

impl MockTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextSource for MockTextSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_text(&self, _document: &str) -> Result<String> {
        Ok(self.text.clone())
    }
}
