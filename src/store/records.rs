use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Record;
use crate::generator::Platform;

/// A business profile. The name acts as the de-facto key; uniqueness is not
/// enforced.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub audience: String,
}

/// One generated post. Immutable after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub text: String,
    pub timestamp: String,
    pub platform: Platform,
    pub topic: String,
}

impl HistoryItem {
    pub fn new(text: String, platform: Platform, topic: String) -> Self {
        HistoryItem {
            id: format!("hist-{}", Uuid::new_v4()),
            text,
            timestamp: Utc::now().to_rfc3339(),
            platform,
            topic,
        }
    }
}

impl Record for HistoryItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A saved generation-form preset.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    #[serde(default)]
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub extra_description: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub length: String,
    pub platform: Platform,
}

impl Framework {
    /// Presets created without an id get a generated one.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = format!("fw-{}", Uuid::new_v4());
        }
    }
}

impl Record for Framework {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A saved free-text prompt.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: String,
    pub title: String,
    pub text: String,
    pub is_favorite: bool,
    pub created_at: i64,
}

impl SavedPrompt {
    pub fn new(title: Option<String>, text: Option<String>) -> Self {
        SavedPrompt {
            id: format!("prompt-{}", Uuid::new_v4()),
            title: title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| "Untitled Prompt".to_string()),
            text: text.unwrap_or_default(),
            is_favorite: false,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

impl Record for SavedPrompt {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A saved topic search with its events and AI-written summary. The summary
/// is write-once: records are only persisted after summarization succeeds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    pub id: String,
    pub topic: String,
    pub date_searched: String,
    pub events: Vec<Value>,
    pub summary: Option<String>,
}

impl TopicRecord {
    pub fn new(topic: String, events: Vec<Value>, summary: Option<String>) -> Self {
        TopicRecord {
            id: format!("topic-{}", Uuid::new_v4()),
            topic,
            date_searched: Utc::now().to_rfc3339(),
            events,
            summary,
        }
    }
}

impl Record for TopicRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_prompt_defaults_match_the_form_contract() {
        let prompt = SavedPrompt::new(None, None);
        assert_eq!(prompt.title, "Untitled Prompt");
        assert_eq!(prompt.text, "");
        assert!(!prompt.is_favorite);
        assert!(prompt.created_at > 0);
        assert!(prompt.id.starts_with("prompt-"));
    }

    #[test]
    fn ensure_id_only_fills_missing_ids() {
        let mut preset = Framework {
            id: String::new(),
            topic: "ai".to_string(),
            extra_description: String::new(),
            tone: String::new(),
            length: String::new(),
            platform: Platform::Twitter,
        };
        preset.ensure_id();
        assert!(preset.id.starts_with("fw-"));

        let generated = preset.id.clone();
        preset.ensure_id();
        assert_eq!(preset.id, generated);
    }

    #[test]
    fn history_item_serializes_in_camel_case() {
        let item = HistoryItem::new("text".to_string(), Platform::LinkedIn, "ai".to_string());
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("timestamp").is_some());
        assert_eq!(json.get("platform").unwrap(), "LinkedIn");
    }
}
