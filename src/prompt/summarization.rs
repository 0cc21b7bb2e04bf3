pub const SUMMARY_SYSTEM: &str =
    "You are a news analyst who writes clear, factual summaries of current events in English.";

/// Embeds the compiled event document into a single instructional prompt
/// asking for a condensed English summary of the topic.
pub fn topic_summary_prompt(topic: &str, compiled_events: &str) -> String {
    format!(
        r#"The following numbered events were collected for the topic "{topic}":

{compiled_events}

Write a concise summary in English of what is currently happening around this topic.
Cover the key points, mention relevant dates, and point out any visible trends.
Keep the summary compact and readable."#
    )
}
