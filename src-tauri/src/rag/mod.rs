pub mod http;

use crate::history::Turn;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata the backend attaches to each retrieved document. Only the
/// origin identifier matters to this front-end.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocumentMetadata {
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceDocument {
    #[serde(default)]
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

/// Result shape this front-end depends on. A response missing either
/// field is a contract violation, not something we paper over.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratedResponse {
    pub answer: String,
    pub source_documents: Vec<SourceDocument>,
}

/// Retrieval/generation backend seam — dispatches one query plus the
/// conversation so far, oldest turn first. Retrieval strategy, ranking
/// and prompt construction all live behind this trait.
#[async_trait]
pub trait Generate: Send + Sync {
    async fn generate(
        &self,
        query: &str,
        chat_history: &[Turn],
    ) -> Result<GeneratedResponse, RagError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Backend contract violation: {0}")]
    Contract(String),
}

impl Serialize for RagError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
