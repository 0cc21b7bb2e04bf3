use anyhow::{anyhow, Result};
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, CreateCompletionRequestArgs,
};
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use tracing::{debug, error};

use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST};

/// Sends a two-message (system + user) conversation and returns the trimmed
/// response text. Exactly one outbound call: errors propagate to the caller,
/// who is responsible for surfacing them.
pub async fn chat_response(
    params: &LLMParams,
    system: &str,
    user: &str,
    max_tokens: u16,
) -> Result<String> {
    match &params.llm_client {
        LLMClient::Ollama(ollama) => {
            // Ollama is driven through plain generation; the system text is
            // folded into the prompt.
            let prompt = format!("{system}\n\n{user}");
            ollama_generate(ollama, params, &prompt, max_tokens).await
        }
        LLMClient::OpenAI(client) => {
            let request = CreateChatCompletionRequestArgs::default()
                .model(&params.model)
                .messages([
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(system)
                        .build()?
                        .into(),
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(user)
                        .build()?
                        .into(),
                ])
                .max_tokens(u32::from(max_tokens))
                .temperature(params.temperature)
                .build()?;

            debug!(target: TARGET_LLM_REQUEST, "Sending chat request to model {}", params.model);

            let response = client.chat().create(request).await.map_err(|err| {
                error!(target: TARGET_LLM_REQUEST, "Chat request failed: {}", err);
                anyhow!(err)
            })?;

            let text = response
                .choices
                .first()
                .and_then(|choice| choice.message.content.clone())
                .ok_or_else(|| anyhow!("model returned an empty chat response"))?;

            Ok(text.trim().to_string())
        }
    }
}

/// Sends a single instructional prompt and returns the trimmed response text.
pub async fn prompt_response(params: &LLMParams, prompt: &str, max_tokens: u16) -> Result<String> {
    match &params.llm_client {
        LLMClient::Ollama(ollama) => ollama_generate(ollama, params, prompt, max_tokens).await,
        LLMClient::OpenAI(client) => {
            let request = CreateCompletionRequestArgs::default()
                .model(&params.model)
                .prompt(prompt)
                .max_tokens(u32::from(max_tokens))
                .temperature(params.temperature)
                .build()?;

            debug!(target: TARGET_LLM_REQUEST, "Sending completion request to model {}", params.model);

            let response = client.completions().create(request).await.map_err(|err| {
                error!(target: TARGET_LLM_REQUEST, "Completion request failed: {}", err);
                anyhow!(err)
            })?;

            let text = response
                .choices
                .first()
                .map(|choice| choice.text.clone())
                .ok_or_else(|| anyhow!("model returned an empty completion response"))?;

            Ok(text.trim().to_string())
        }
    }
}

async fn ollama_generate(
    ollama: &Ollama,
    params: &LLMParams,
    prompt: &str,
    max_tokens: u16,
) -> Result<String> {
    let mut request = GenerationRequest::new(params.model.clone(), prompt.to_string());
    request.options = Some(
        GenerationOptions::default()
            .temperature(params.temperature)
            .num_predict(i32::from(max_tokens)),
    );

    debug!(target: TARGET_LLM_REQUEST, "Sending generation request to model {}", params.model);

    let response = ollama.generate(request).await.map_err(|err| {
        error!(target: TARGET_LLM_REQUEST, "Generation request failed: {}", err);
        anyhow!("generation request failed: {err}")
    })?;

    Ok(response.response.trim().to_string())
}
