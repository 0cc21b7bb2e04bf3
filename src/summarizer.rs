use anyhow::Result;
use serde_json::Value;
use tracing::{error, info};

use crate::llm;
use crate::news::NewsEvent;
use crate::prompt;
use crate::store::{JsonStore, TopicRecord};
use crate::{LLMParams, TARGET_LLM_REQUEST};

const SUMMARY_MAX_TOKENS: u16 = 500;

/// Flattens the events into a numbered plain-text document, one block per
/// event, blocks separated by blank lines.
pub fn compile_events(events: &[Value]) -> String {
    events
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let event: NewsEvent = serde_json::from_value(raw.clone()).unwrap_or_default();
            let title = event
                .title
                .as_ref()
                .and_then(|title| title.english())
                .unwrap_or("(untitled event)")
                .to_string();
            let summary = event
                .summary
                .as_ref()
                .and_then(|summary| summary.english())
                .unwrap_or("(no summary available)")
                .to_string();
            format!("Event #{}: {}\n{}", index + 1, title, summary)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Asks the model for a condensed English summary of the events. Errors are
/// logged and re-thrown; the caller reports the failure to the user.
pub async fn summarize(params: &LLMParams, topic: &str, events: &[Value]) -> Result<String> {
    let compiled = compile_events(events);
    let user = prompt::topic_summary_prompt(topic, &compiled);

    llm::chat_response(params, prompt::SUMMARY_SYSTEM, &user, SUMMARY_MAX_TOKENS)
        .await
        .map_err(|err| {
            error!(target: TARGET_LLM_REQUEST, "Failed to summarize topic '{}': {}", topic, err);
            err
        })
}

/// Summarizes and persists in one operation. The record is only appended
/// after a successful summary; on failure nothing is saved.
pub async fn save_topic_summary(
    params: &LLMParams,
    store: &JsonStore<TopicRecord>,
    topic: &str,
    events: Vec<Value>,
) -> Result<TopicRecord> {
    let summary = summarize(params, topic, &events).await?;

    let record = TopicRecord::new(topic.to_string(), events, Some(summary));
    store.append(record.clone());
    info!("Saved summarized topic '{}' as {}", topic, record.id);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LLMClient, LLMParams};
    use ollama_rs::Ollama;
    use serde_json::json;
    use tempfile::TempDir;

    fn events() -> Vec<Value> {
        vec![
            json!({"title": {"eng": "Breakthrough announced"}, "summary": "Details of the breakthrough."}),
            json!({"title": "Follow-up event", "summary": {"nld": "alleen Nederlands"}}),
            json!({"uri": "evt-3"}),
        ]
    }

    #[test]
    fn compile_events_numbers_each_block() {
        let compiled = compile_events(&events());
        assert!(compiled.contains("Event #1: Breakthrough announced\nDetails of the breakthrough."));
        assert!(compiled.contains("Event #2: Follow-up event\n(no summary available)"));
        assert!(compiled.contains("Event #3: (untitled event)\n(no summary available)"));
        assert_eq!(compiled.matches("\n\n").count(), 2);
    }

    #[test]
    fn compile_events_on_empty_input_is_empty() {
        assert_eq!(compile_events(&[]), "");
    }

    #[tokio::test]
    async fn failed_summarization_persists_nothing() {
        // Port 1 is never listening; the generation call fails immediately.
        let params = LLMParams {
            llm_client: LLMClient::Ollama(Ollama::new("http://127.0.0.1".to_string(), 1)),
            model: "llama2".to_string(),
            temperature: 0.7,
        };

        let dir = TempDir::new().unwrap();
        let store: JsonStore<TopicRecord> = JsonStore::new(dir.path().join("topics.json"));

        let result = save_topic_summary(&params, &store, "quantum computing", events()).await;
        assert!(result.is_err());
        assert!(store.load_all().is_empty());
        assert!(!store.path().exists());
    }
}
