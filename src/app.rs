use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::generator::{self, GenerationForm, GenerationRequest};
use crate::news::NewsClient;
use crate::store::{Framework, HistoryItem, JsonStore, Profile, SavedPrompt, TopicRecord};
use crate::summarizer;
use crate::LLMParams;

/// Everything the request-dispatch surface needs: the LLM parameters, the
/// news client, and one store per collection. Constructed once at process
/// start and shared by reference with every handler.
pub struct AppContext {
    llm: LLMParams,
    news: Option<NewsClient>,
    pub profiles: JsonStore<Profile>,
    pub history: JsonStore<HistoryItem>,
    pub frameworks: JsonStore<Framework>,
    pub prompts: JsonStore<SavedPrompt>,
    pub topics: JsonStore<TopicRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct NewPromptForm {
    title: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveTopicForm {
    topic: String,
    #[serde(default)]
    events: Vec<Value>,
}

impl AppContext {
    pub fn new(llm: LLMParams, news: Option<NewsClient>, data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        Ok(AppContext {
            llm,
            news,
            profiles: JsonStore::new(data_dir.join("profiles.json")),
            history: JsonStore::new(data_dir.join("history.json")),
            frameworks: JsonStore::new(data_dir.join("frameworks.json")),
            prompts: JsonStore::new(data_dir.join("prompts.json")),
            topics: JsonStore::new(data_dir.join("topics.json")),
        })
    }

    fn news(&self) -> Result<&NewsClient> {
        self.news
            .as_ref()
            .context("News API is not configured (NEWS_API_KEY is missing)")
    }

    /// Generates a post for the form, records it in the history
    /// (newest-first), and returns the new history item.
    pub async fn generate_post(&self, form: GenerationForm) -> Result<HistoryItem> {
        let request = GenerationRequest::from_form(form)?;
        let text = generator::generate_post(&self.llm, &request).await?;

        let item = HistoryItem::new(text, request.platform, request.topic.clone());
        self.history.prepend(item.clone());
        info!("Generated {} post {} about '{}'", item.platform, item.id, item.topic);
        Ok(item)
    }

    /// Dispatches a named operation with a JSON payload and returns its JSON
    /// result, mirroring the contract the desktop shell consumes. Unknown
    /// operations are a reported error.
    pub async fn dispatch(&self, operation: &str, payload: Value) -> Result<Value> {
        match operation {
            "generate-post" => {
                let form: GenerationForm = serde_json::from_value(payload)?;
                Ok(serde_json::to_value(self.generate_post(form).await?)?)
            }

            "get-history" => Ok(serde_json::to_value(self.history.load_all())?),
            "get-history-item" => {
                let id = string_arg(&payload, "id")?;
                option_to_value(self.history.find_by_id(&id))
            }
            "delete-history-item" => {
                let id = string_arg(&payload, "id")?;
                Ok(serde_json::to_value(self.history.delete_by_id(&id))?)
            }

            "get-profiles" => Ok(serde_json::to_value(self.profiles.load_all())?),
            "add-profile" => {
                let profile: Profile = serde_json::from_value(payload)?;
                Ok(serde_json::to_value(self.profiles.append(profile))?)
            }
            "get-profile-detail" => {
                let name = string_arg(&payload, "name")?;
                let detail = self
                    .profiles
                    .load_all()
                    .into_iter()
                    .find(|profile| profile.name == name);
                option_to_value(detail)
            }

            "get-frameworks" => Ok(serde_json::to_value(self.frameworks.load_all())?),
            "add-framework" => {
                let mut preset: Framework = serde_json::from_value(payload)?;
                preset.ensure_id();
                Ok(serde_json::to_value(self.frameworks.append(preset))?)
            }
            "delete-framework" => {
                let id = string_arg(&payload, "id")?;
                Ok(serde_json::to_value(self.frameworks.delete_by_id(&id))?)
            }

            "get-prompts" => Ok(serde_json::to_value(self.prompts.load_all())?),
            "add-prompt" => {
                let form: NewPromptForm = if payload.is_null() {
                    NewPromptForm::default()
                } else {
                    serde_json::from_value(payload)?
                };
                let prompt = SavedPrompt::new(form.title, form.text);
                self.prompts.append(prompt.clone());
                Ok(serde_json::to_value(prompt)?)
            }
            "toggle-favorite-prompt" => {
                let id = string_arg(&payload, "id")?;
                option_to_value(self.prompts.toggle_favorite(&id))
            }
            "delete-prompt" => {
                let id = string_arg(&payload, "id")?;
                Ok(serde_json::to_value(self.prompts.delete_by_id(&id))?)
            }

            "get-trending-topics" => Ok(Value::Array(self.news()?.trending_concepts().await?)),
            "get-topic-events" => {
                let topic = string_arg(&payload, "topic")?;
                Ok(Value::Array(self.news()?.concept_events(&topic).await?))
            }
            "save-topic-summary" => {
                let form: SaveTopicForm = serde_json::from_value(payload)?;
                let record = summarizer::save_topic_summary(
                    &self.llm,
                    &self.topics,
                    &form.topic,
                    form.events,
                )
                .await?;
                Ok(serde_json::to_value(record)?)
            }
            "get-saved-topics" => Ok(serde_json::to_value(self.topics.load_all())?),

            other => bail!("unknown operation: '{other}'"),
        }
    }
}

/// Id-style arguments arrive either as a bare string or wrapped in an
/// object; the shell sends both shapes.
fn string_arg(payload: &Value, key: &str) -> Result<String> {
    payload
        .as_str()
        .or_else(|| payload.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .with_context(|| format!("payload is missing '{key}'"))
}

fn option_to_value<T: serde::Serialize>(value: Option<T>) -> Result<Value> {
    Ok(match value {
        Some(value) => serde_json::to_value(value)?,
        None => Value::Null,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LLMClient, LLMParams};
    use ollama_rs::Ollama;
    use serde_json::json;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        // Unreachable backend; only the store-backed operations run in tests.
        let params = LLMParams {
            llm_client: LLMClient::Ollama(Ollama::new("http://127.0.0.1".to_string(), 1)),
            model: "llama2".to_string(),
            temperature: 0.7,
        };
        AppContext::new(params, None, dir.path()).unwrap()
    }

    #[tokio::test]
    async fn unknown_operation_is_a_reported_error() {
        let dir = TempDir::new().unwrap();
        let err = context(&dir)
            .dispatch("reticulate-splines", Value::Null)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reticulate-splines"));
    }

    #[tokio::test]
    async fn add_framework_assigns_an_id_and_returns_the_collection() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let result = ctx
            .dispatch(
                "add-framework",
                json!({"topic": "remote work", "platform": "LinkedIn"}),
            )
            .await
            .unwrap();

        let frameworks = result.as_array().unwrap();
        assert_eq!(frameworks.len(), 1);
        let id = frameworks[0].get("id").unwrap().as_str().unwrap();
        assert!(id.starts_with("fw-"));
    }

    #[tokio::test]
    async fn deleting_a_never_added_framework_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        ctx.dispatch(
            "add-framework",
            json!({"id": "fw-1", "topic": "ai", "platform": "Twitter"}),
        )
        .await
        .unwrap();

        let result = ctx
            .dispatch("delete-framework", json!("fw-123"))
            .await
            .unwrap();
        assert_eq!(result.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn profile_detail_is_null_for_unknown_names() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        ctx.dispatch(
            "add-profile",
            json!({"name": "Acme", "industry": "Software", "audience": "developers"}),
        )
        .await
        .unwrap();

        let found = ctx
            .dispatch("get-profile-detail", json!("Acme"))
            .await
            .unwrap();
        assert_eq!(found.get("industry").unwrap(), "Software");

        let missing = ctx
            .dispatch("get-profile-detail", json!("Globex"))
            .await
            .unwrap();
        assert!(missing.is_null());
    }

    #[tokio::test]
    async fn add_prompt_applies_defaults() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let prompt = ctx.dispatch("add-prompt", Value::Null).await.unwrap();
        assert_eq!(prompt.get("title").unwrap(), "Untitled Prompt");
        assert_eq!(prompt.get("isFavorite").unwrap(), false);
    }

    #[tokio::test]
    async fn news_operations_report_missing_configuration() {
        let dir = TempDir::new().unwrap();
        let err = context(&dir)
            .dispatch("get-trending-topics", Value::Null)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));
    }

    #[tokio::test]
    async fn failed_generation_records_no_history() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let result = ctx
            .dispatch(
                "generate-post",
                json!({"platform": "LinkedIn", "topic": "remote work"}),
            )
            .await;
        assert!(result.is_err());

        let history = ctx.dispatch("get-history", Value::Null).await.unwrap();
        assert!(history.as_array().unwrap().is_empty());
    }
}
