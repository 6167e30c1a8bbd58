use super::{Generate, GeneratedResponse, RagError};
use crate::history::Turn;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct HttpRagConfig {
    pub base_url: String,
    pub api_key: String,
}

/// HTTP client for a retrieval-augmented generation backend exposing a
/// single `/query` endpoint.
pub struct HttpRag {
    client: Client,
    config: HttpRagConfig,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    chat_history: Vec<(&'a str, &'a str)>,
}

impl HttpRag {
    pub fn new(config: HttpRagConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Generate for HttpRag {
    async fn generate(
        &self,
        query: &str,
        chat_history: &[Turn],
    ) -> Result<GeneratedResponse, RagError> {
        let body = QueryRequest {
            query,
            chat_history: chat_history
                .iter()
                .map(|t| (t.user_query.as_str(), t.bot_response.as_str()))
                .collect(),
        };

        let mut req = self
            .client
            .post(format!("{}/query", self.config.base_url))
            .header("Content-Type", "application/json")
            .json(&body);

        if !self.config.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(RagError::Api {
                status,
                message: text,
            });
        }

        // Deserialize by hand so a missing `answer` or `source_documents`
        // surfaces as a contract violation rather than a generic decode error.
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| RagError::Contract(e.to_string()))
    }
}
