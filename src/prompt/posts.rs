use crate::generator::{GenerationRequest, Language};

/// Builds the LinkedIn system + user message pair. Each language carries its
/// own fully-written template so phrasing idioms differ naturally.
pub fn linkedin_prompt(request: &GenerationRequest) -> (String, String) {
    let topic = &request.topic;
    let tone = &request.tone;
    let company = &request.company_name;
    let industry = &request.industry;
    let audience = &request.target_audience;
    let extra = &request.extra_description;
    let length = &request.length;

    match request.language {
        Language::English => {
            let system =
                "You are an experienced copywriter who writes professional LinkedIn posts in English."
                    .to_string();
            let user = format!(
                r#"Write a LinkedIn post about "{topic}" in a {tone} tone
for the company "{company}" (active in {industry}), aimed at {audience}.

Use the following extra details:
{extra}

Provide practical tips or insights and end with a call-to-action.
Try to keep the post around {length} words (this is indicative, you can deviate a bit).

Make sure the final post is clear and persuasive, ready to publish."#
            );
            (system, user)
        }
        Language::Dutch => {
            let system =
                "Je bent een ervaren copywriter die professionele LinkedIn-posts schrijft in het Nederlands."
                    .to_string();
            let user = format!(
                r#"Schrijf een LinkedIn-post over "{topic}" in een {tone} toon
voor het bedrijf "{company}" (actief in {industry}), gericht op {audience}.

Gebruik de volgende extra details:
{extra}

Richt je op praktische tips of inzichten en eindig met een call-to-action.
Probeer de post rond de {length} woorden te houden (het is indicatief, je mag iets afwijken).

Zorg dat de uiteindelijke post helder en overtuigend is, klaar om te publiceren."#
            );
            (system, user)
        }
    }
}

/// Single-block tweet template. The 280-character ceiling is an instruction
/// to the model, not enforced on the response.
pub fn twitter_prompt(request: &GenerationRequest) -> String {
    let topic = &request.topic;
    let company = &request.company_name;
    let industry = &request.industry;
    let audience = &request.target_audience;

    match request.language {
        Language::English => format!(
            r#"You are an experienced copywriter for the company "{company}" in {industry}.
The audience is {audience}. Write a short, punchy tweet (max 280 characters)
about "{topic}". Use a catchy style and add 1-2 relevant hashtags."#
        ),
        Language::Dutch => format!(
            r#"Je bent een ervaren copywriter voor het bedrijf "{company}" in {industry}.
De doelgroep is {audience}. Schrijf een beknopte, pakkende tweet (max 280 tekens)
over "{topic}". Gebruik een vlotte stijl en voeg 1-2 relevante hashtags toe."#
        ),
    }
}

pub fn instagram_prompt(request: &GenerationRequest) -> String {
    let topic = &request.topic;
    let company = &request.company_name;
    let industry = &request.industry;
    let audience = &request.target_audience;

    match request.language {
        Language::English => format!(
            r#"You are an experienced copywriter for the company "{company}" in {industry}.
The audience is {audience}. Write an inspiring Instagram caption about "{topic}"
with a positive, engaging tone. Include some relevant hashtags and emojis.
Keep it around 100-150 words if possible."#
        ),
        Language::Dutch => format!(
            r#"Je bent een ervaren copywriter voor het bedrijf "{company}" in {industry}.
De doelgroep is {audience}. Schrijf een inspirerende Instagram-caption over "{topic}"
met een positieve, enthousiasmerende toon. Voeg enkele relevante hashtags en emoji's toe.
Houd het rond de 100-150 woorden."#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationForm, GenerationRequest, Platform};

    fn request_for(platform: Platform, language: &str) -> GenerationRequest {
        GenerationRequest::from_form(GenerationForm {
            company_name: Some("Acme".to_string()),
            industry: Some("Software".to_string()),
            target_audience: Some("developers".to_string()),
            topic: Some("remote work".to_string()),
            extra_description: Some("hybrid office".to_string()),
            tone: Some("informeel".to_string()),
            length: Some("150".to_string()),
            language: Some(language.to_string()),
            platform: Some(platform.to_string()),
        })
        .expect("valid form")
    }

    #[test]
    fn linkedin_prompt_contains_request_fields_verbatim() {
        for language in ["Dutch", "English"] {
            let request = request_for(Platform::LinkedIn, language);
            let (system, user) = linkedin_prompt(&request);
            assert!(!system.is_empty());
            assert!(user.contains("remote work"), "{language}: topic missing");
            assert!(user.contains("Acme"), "{language}: company missing");
            assert!(user.contains("developers"), "{language}: audience missing");
            assert!(user.contains("150"), "{language}: word count missing");
        }
    }

    #[test]
    fn linkedin_dutch_template_is_dutch() {
        let request = request_for(Platform::LinkedIn, "Dutch");
        let (system, user) = linkedin_prompt(&request);
        assert!(system.contains("Nederlands"));
        assert!(user.contains("Schrijf een LinkedIn-post"));
    }

    #[test]
    fn twitter_prompt_contains_request_fields_verbatim() {
        for language in ["Dutch", "English"] {
            let request = request_for(Platform::Twitter, language);
            let prompt = twitter_prompt(&request);
            assert!(prompt.contains("remote work"));
            assert!(prompt.contains("Acme"));
            assert!(prompt.contains("developers"));
            assert!(prompt.contains("280"));
        }
    }

    #[test]
    fn instagram_prompt_contains_request_fields_verbatim() {
        for language in ["Dutch", "English"] {
            let request = request_for(Platform::Instagram, language);
            let prompt = instagram_prompt(&request);
            assert!(prompt.contains("remote work"));
            assert!(prompt.contains("Acme"));
            assert!(prompt.contains("developers"));
        }
    }
}
