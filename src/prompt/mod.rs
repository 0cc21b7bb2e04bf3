// Declare submodules
mod posts;
mod summarization;

pub use posts::{instagram_prompt, linkedin_prompt, twitter_prompt};
pub use summarization::{topic_summary_prompt, SUMMARY_SYSTEM};
