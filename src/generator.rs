use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm;
use crate::prompt;
use crate::{LLMParams, TARGET_LLM_REQUEST};

/// Output token budget per platform.
const LINKEDIN_MAX_TOKENS: u16 = 500;
const TWITTER_MAX_TOKENS: u16 = 100;
const INSTAGRAM_MAX_TOKENS: u16 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    Twitter,
    Instagram,
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "LinkedIn" => Ok(Platform::LinkedIn),
            "Twitter" | "X" | "Twitter/X" => Ok(Platform::Twitter),
            "Instagram" => Ok(Platform::Instagram),
            other => bail!("unsupported platform: '{other}'"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::LinkedIn => write!(f, "LinkedIn"),
            Platform::Twitter => write!(f, "Twitter"),
            Platform::Instagram => write!(f, "Instagram"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Dutch,
    English,
}

impl Language {
    /// Anything other than an explicit "English" reads as Dutch.
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value {
            Some("English") => Language::English,
            _ => Language::Dutch,
        }
    }
}

/// The raw generation form as it arrives from the shell. Every field is
/// optional; normalization happens once, in [`GenerationRequest::from_form`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationForm {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub target_audience: Option<String>,
    pub topic: Option<String>,
    pub extra_description: Option<String>,
    pub tone: Option<String>,
    pub length: Option<String>,
    pub language: Option<String>,
    pub platform: Option<String>,
}

/// A fully-populated generation request. Placeholder defaults match the
/// generation form's Dutch origins.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub company_name: String,
    pub industry: String,
    pub target_audience: String,
    pub topic: String,
    pub extra_description: String,
    pub tone: String,
    pub length: String,
    pub language: Language,
    pub platform: Platform,
}

impl GenerationRequest {
    /// Validates the form once at the boundary: the platform must parse, the
    /// language falls back to Dutch, and every free-form field falls back to
    /// its fixed placeholder.
    pub fn from_form(form: GenerationForm) -> Result<Self> {
        let platform: Platform = form.platform.as_deref().unwrap_or_default().parse()?;

        Ok(GenerationRequest {
            company_name: field_or(form.company_name, "Onbekend Bedrijf"),
            industry: field_or(form.industry, "Algemene Industrie"),
            target_audience: field_or(form.target_audience, "Doelgroep onbekend"),
            topic: field_or(form.topic, "Onderwerp onbekend"),
            extra_description: field_or(form.extra_description, ""),
            tone: field_or(form.tone, "professioneel"),
            length: field_or(form.length, "200"),
            language: Language::from_form_value(form.language.as_deref()),
            platform,
        })
    }
}

fn field_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => fallback.to_string(),
    }
}

/// Renders the per-platform template and requests the post text. One outbound
/// call per invocation; API errors propagate unchanged.
pub async fn generate_post(params: &LLMParams, request: &GenerationRequest) -> Result<String> {
    info!(
        target: TARGET_LLM_REQUEST,
        "Generating {} post about '{}'", request.platform, request.topic
    );

    match request.platform {
        Platform::LinkedIn => {
            let (system, user) = prompt::linkedin_prompt(request);
            llm::chat_response(params, &system, &user, LINKEDIN_MAX_TOKENS).await
        }
        Platform::Twitter => {
            let prompt = prompt::twitter_prompt(request);
            llm::prompt_response(params, &prompt, TWITTER_MAX_TOKENS).await
        }
        Platform::Instagram => {
            let prompt = prompt::instagram_prompt(request);
            llm::prompt_response(params, &prompt, INSTAGRAM_MAX_TOKENS).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_supported_values() {
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!("Twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!("X".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!(
            "Instagram".parse::<Platform>().unwrap(),
            Platform::Instagram
        );
    }

    #[test]
    fn unrecognized_platform_is_a_reported_error() {
        let err = "Facebook".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("Facebook"));
        assert!(GenerationRequest::from_form(GenerationForm::default()).is_err());
    }

    #[test]
    fn empty_fields_fall_back_to_placeholders() {
        let form = GenerationForm {
            platform: Some("LinkedIn".to_string()),
            topic: Some("   ".to_string()),
            ..GenerationForm::default()
        };
        let request = GenerationRequest::from_form(form).unwrap();
        assert_eq!(request.company_name, "Onbekend Bedrijf");
        assert_eq!(request.industry, "Algemene Industrie");
        assert_eq!(request.target_audience, "Doelgroep onbekend");
        assert_eq!(request.topic, "Onderwerp onbekend");
        assert_eq!(request.tone, "professioneel");
        assert_eq!(request.length, "200");
        assert_eq!(request.language, Language::Dutch);
    }

    #[test]
    fn language_defaults_to_dutch() {
        assert_eq!(Language::from_form_value(None), Language::Dutch);
        assert_eq!(Language::from_form_value(Some("Frans")), Language::Dutch);
        assert_eq!(
            Language::from_form_value(Some("English")),
            Language::English
        );
    }

    #[test]
    fn platform_survives_a_serde_round_trip() {
        let json = serde_json::to_string(&Platform::LinkedIn).unwrap();
        assert_eq!(json, "\"LinkedIn\"");
        let platform: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(platform, Platform::LinkedIn);
    }
}
