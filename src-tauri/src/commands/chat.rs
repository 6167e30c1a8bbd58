use crate::citations::format_sources;
use crate::commands::settings::BackendSettings;
use crate::history::{SessionHistory, Turn};
use crate::rag::http::{HttpRag, HttpRagConfig};
use crate::rag::{Generate, RagError};
use serde::{Deserialize, Serialize};
use tauri::State;

/// What the frontend renders for one completed turn.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TurnView {
    pub answer: String,
    /// Empty string when the answer carried no sources; the frontend
    /// suppresses the "Show sources" control in that case.
    pub sources_html: String,
}

/// One full prompt → answer cycle against the given backend.
///
/// History is only touched after the backend call succeeds, so a failed
/// turn leaves the log exactly as it was before the attempt.
pub async fn run_turn(
    generator: &impl Generate,
    history: &SessionHistory,
    query: &str,
) -> Result<TurnView, RagError> {
    let context = history.all();
    let response = generator.generate(query, &context).await?;

    let sources = response
        .source_documents
        .iter()
        .map(|doc| doc.metadata.source.clone());
    let block = format_sources(sources);

    history.append(query, &response.answer);

    Ok(TurnView {
        answer: response.answer,
        sources_html: block.to_html(),
    })
}

#[tauri::command]
pub async fn submit_prompt(
    history: State<'_, SessionHistory>,
    settings: State<'_, BackendSettings>,
    query: String,
) -> Result<TurnView, String> {
    let config = settings.current();
    let backend = HttpRag::new(HttpRagConfig {
        base_url: config.base_url,
        api_key: config.api_key,
    });

    tracing::info!(turn = history.len() + 1, "submitting prompt");
    run_turn(&backend, &history, &query).await.map_err(|e| {
        tracing::error!(error = %e, "backend call failed");
        e.to_string()
    })
}

#[tauri::command]
pub fn get_history(history: State<'_, SessionHistory>) -> Result<Vec<Turn>, String> {
    Ok(history.all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::{DocumentMetadata, GeneratedResponse, SourceDocument};
    use async_trait::async_trait;

    /// Canned backend: answers with a fixed string and source list.
    struct MockRag {
        answer: String,
        sources: Vec<String>,
    }

    impl MockRag {
        fn new(answer: &str, sources: &[&str]) -> Self {
            Self {
                answer: answer.to_string(),
                sources: sources.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl Generate for MockRag {
        async fn generate(
            &self,
            _query: &str,
            _chat_history: &[Turn],
        ) -> Result<GeneratedResponse, RagError> {
            Ok(GeneratedResponse {
                answer: self.answer.clone(),
                source_documents: self
                    .sources
                    .iter()
                    .map(|s| SourceDocument {
                        page_content: String::new(),
                        metadata: DocumentMetadata { source: s.clone() },
                    })
                    .collect(),
            })
        }
    }

    /// Backend that always fails, for the untouched-history property.
    struct FailingRag;

    #[async_trait]
    impl Generate for FailingRag {
        async fn generate(
            &self,
            _query: &str,
            _chat_history: &[Turn],
        ) -> Result<GeneratedResponse, RagError> {
            Err(RagError::Api {
                status: 500,
                message: "backend down".into(),
            })
        }
    }

    /// Backend that records the history it was handed.
    struct EchoContextRag;

    #[async_trait]
    impl Generate for EchoContextRag {
        async fn generate(
            &self,
            query: &str,
            chat_history: &[Turn],
        ) -> Result<GeneratedResponse, RagError> {
            Ok(GeneratedResponse {
                answer: format!("{} (seen {} prior turns)", query, chat_history.len()),
                source_documents: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_successful_turns_grow_history_in_order() {
        let history = SessionHistory::new();
        let backend = MockRag::new("an answer", &[]);

        for i in 0..3 {
            run_turn(&backend, &history, &format!("q{}", i)).await.unwrap();
        }

        let turns = history.all();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].user_query, "q0");
        assert_eq!(turns[2].user_query, "q2");
        for turn in &turns {
            assert_eq!(turn.bot_response, "an answer");
        }
    }

    #[tokio::test]
    async fn test_failed_turn_leaves_history_untouched() {
        let history = SessionHistory::new();
        let good = MockRag::new("ok", &[]);
        run_turn(&good, &history, "q1").await.unwrap();
        let before = history.all();

        let err = run_turn(&FailingRag, &history, "q2").await.unwrap_err();
        assert!(matches!(err, RagError::Api { status: 500, .. }));
        assert_eq!(history.all(), before);
    }

    #[tokio::test]
    async fn test_sources_deduped_and_sorted_in_view() {
        let history = SessionHistory::new();
        let backend = MockRag::new("ans", &["https://b.com", "https://a.com", "https://a.com"]);

        let view = run_turn(&backend, &history, "q").await.unwrap();
        let a_pos = view.sources_html.find("1. <a href='https://a.com'").unwrap();
        let b_pos = view.sources_html.find("2. <a href='https://b.com'").unwrap();
        assert!(a_pos < b_pos);
        // Deduped: https://a.com appears once as a link target.
        assert_eq!(view.sources_html.matches("href='https://a.com'").count(), 1);
    }

    #[tokio::test]
    async fn test_empty_sources_yield_no_html() {
        let history = SessionHistory::new();
        let backend = MockRag::new("ans", &[]);

        let view = run_turn(&backend, &history, "q").await.unwrap();
        assert_eq!(view.sources_html, "");
    }

    #[tokio::test]
    async fn test_backend_sees_prior_turns_oldest_first() {
        let history = SessionHistory::new();

        let first = run_turn(&EchoContextRag, &history, "one").await.unwrap();
        assert_eq!(first.answer, "one (seen 0 prior turns)");

        let second = run_turn(&EchoContextRag, &history, "two").await.unwrap();
        assert_eq!(second.answer, "two (seen 1 prior turns)");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_forwarded_unvalidated() {
        let history = SessionHistory::new();
        let backend = MockRag::new("still answers", &[]);

        let view = run_turn(&backend, &history, "").await.unwrap();
        assert_eq!(view.answer, "still answers");
        assert_eq!(history.all()[0].user_query, "");
    }
}
