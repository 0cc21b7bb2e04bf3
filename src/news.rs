use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::TARGET_WEB_REQUEST;

const API_BASE: &str = "https://eventregistry.org/api/v1";
const TRENDING_CONCEPT_COUNT: u32 = 10;
const EVENT_COUNT: u32 = 10;

/// Event titles and summaries arrive either as a plain string or as a
/// per-language map keyed by language code.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    ByLanguage(HashMap<String, String>),
}

impl LocalizedText {
    /// Plain text is used as-is; per-language maps prefer the English entry.
    pub fn english(&self) -> Option<&str> {
        match self {
            LocalizedText::Plain(text) => Some(text),
            LocalizedText::ByLanguage(map) => map.get("eng").map(String::as_str),
        }
    }
}

/// The slice of a news event the summarizer cares about. Events are stored
/// and returned to the shell as opaque JSON; this is the lenient read view.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewsEvent {
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default)]
    pub summary: Option<LocalizedText>,
}

/// Client for the news-aggregation API: trending concepts and
/// events-by-concept, both read-only pass-throughs.
pub struct NewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsClient {
    pub fn new(api_key: String) -> Self {
        NewsClient {
            client: Client::new(),
            api_key,
            base_url: API_BASE.to_string(),
        }
    }

    /// Fetches the top trending concepts, scoped to news sources.
    pub async fn trending_concepts(&self) -> Result<Vec<Value>> {
        let payload = json!({
            "action": "getTrendingConcepts",
            "source": "news",
            "conceptCount": TRENDING_CONCEPT_COUNT,
            "apiKey": self.api_key,
        });

        debug!(target: TARGET_WEB_REQUEST, "Fetching trending concepts");

        let response = self
            .client
            .post(format!("{}/trends", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to fetch trending topics")?;

        if !response.status().is_success() {
            warn!(target: TARGET_WEB_REQUEST, "Trending concepts request returned status {}", response.status());
            bail!("Failed to fetch trending topics");
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to fetch trending topics")?;

        let concepts = body
            .get("trendingConcepts")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        info!(target: TARGET_WEB_REQUEST, "Fetched {} trending concepts", concepts.len());
        Ok(concepts)
    }

    /// Fetches the most recent events for a free-text topic: the topic is
    /// first resolved to a concept URI, then events are queried newest-first
    /// in English.
    pub async fn concept_events(&self, topic: &str) -> Result<Vec<Value>> {
        let concept_uri = self.resolve_concept_uri(topic).await?;

        let payload = json!({
            "action": "getEvents",
            "conceptUri": concept_uri,
            "resultType": "events",
            "eventsSortBy": "date",
            "eventsSortByAsc": false,
            "eventsCount": EVENT_COUNT,
            "lang": "eng",
            "apiKey": self.api_key,
        });

        debug!(target: TARGET_WEB_REQUEST, "Fetching events for concept {}", concept_uri);

        let response = self
            .client
            .post(format!("{}/event/getEvents", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to fetch topic events")?;

        if !response.status().is_success() {
            warn!(target: TARGET_WEB_REQUEST, "Events request returned status {}", response.status());
            bail!("Failed to fetch topic events");
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to fetch topic events")?;

        let events = body
            .pointer("/events/results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        info!(target: TARGET_WEB_REQUEST, "Fetched {} events for topic '{}'", events.len(), topic);
        Ok(events)
    }

    async fn resolve_concept_uri(&self, topic: &str) -> Result<String> {
        debug!(target: TARGET_WEB_REQUEST, "Resolving concept URI for '{}'", topic);

        let response = self
            .client
            .get(format!("{}/suggestConceptsFast", self.base_url))
            .query(&[
                ("prefix", topic),
                ("lang", "eng"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to fetch topic events")?;

        if !response.status().is_success() {
            warn!(target: TARGET_WEB_REQUEST, "Concept suggestion request returned status {}", response.status());
            bail!("Failed to fetch topic events");
        }

        let suggestions: Vec<Value> = response
            .json()
            .await
            .context("Failed to fetch topic events")?;

        suggestions
            .first()
            .and_then(|concept| concept.get("uri"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .with_context(|| format!("No matching news concept found for '{topic}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_summary_is_used_as_is() {
        let text = LocalizedText::Plain("a plain summary".to_string());
        assert_eq!(text.english(), Some("a plain summary"));
    }

    #[test]
    fn language_map_prefers_the_english_entry() {
        let event: NewsEvent = serde_json::from_value(json!({
            "title": {"eng": "English title", "nld": "Nederlandse titel"},
            "summary": {"nld": "alleen Nederlands"},
        }))
        .unwrap();
        assert_eq!(event.title.unwrap().english(), Some("English title"));
        assert_eq!(event.summary.unwrap().english(), None);
    }

    #[test]
    fn both_summary_shapes_deserialize() {
        let plain: NewsEvent = serde_json::from_value(json!({
            "title": "a title",
            "summary": "a summary",
        }))
        .unwrap();
        assert_eq!(plain.summary.unwrap().english(), Some("a summary"));

        let missing: NewsEvent = serde_json::from_value(json!({"uri": "evt-1"})).unwrap();
        assert!(missing.title.is_none());
        assert!(missing.summary.is_none());
    }
}
