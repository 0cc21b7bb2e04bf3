use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::news::NewsClient;
use crate::{LLMClient, LLMParams};

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Builds the LLM parameters from the environment. OPENAI_API_KEY selects
/// the hosted backend; otherwise a local Ollama instance is assumed.
pub fn llm_params_from_env() -> LLMParams {
    let temperature: f32 = env::var("LLM_TEMPERATURE")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TEMPERATURE);

    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        let model = env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        info!("Using OpenAI backend with model {}", model);
        let config = OpenAIConfig::new().with_api_key(api_key);
        LLMParams {
            llm_client: LLMClient::OpenAI(OpenAIClient::with_config(config)),
            model,
            temperature,
        }
    } else {
        let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost".to_string());
        let port: u16 = env::var("OLLAMA_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(11434);
        let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama2".to_string());
        info!("Using Ollama backend at {}:{} with model {}", host, port, model);
        LLMParams {
            llm_client: LLMClient::Ollama(Ollama::new(host, port)),
            model,
            temperature,
        }
    }
}

/// News operations are disabled when no API key is configured; callers get a
/// reported error instead of a silent empty result.
pub fn news_client_from_env() -> Option<NewsClient> {
    match env::var("NEWS_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Some(NewsClient::new(key)),
        _ => {
            warn!("NEWS_API_KEY environment variable not set. News operations are disabled.");
            None
        }
    }
}

/// Directory holding the JSON store files.
pub fn data_dir() -> PathBuf {
    env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}
