use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use postcraft::app::AppContext;
use postcraft::environment;
use postcraft::logging;

#[derive(Parser)]
#[clap(name = "postcraft", about = "Generate social-media posts and news summaries")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a post and store it in the history
    Generate {
        /// Target platform: LinkedIn, Twitter or Instagram
        #[clap(long)]
        platform: String,

        #[clap(long)]
        topic: Option<String>,

        /// Fill company details from a stored profile
        #[clap(long)]
        profile: Option<String>,

        #[clap(long)]
        tone: Option<String>,

        /// Advisory word count
        #[clap(long)]
        length: Option<String>,

        /// Dutch (default) or English
        #[clap(long)]
        language: Option<String>,

        /// Extra details to work into the post
        #[clap(long)]
        extra: Option<String>,
    },

    /// Show the generation history, or one item
    History {
        #[clap(short, long)]
        id: Option<String>,
    },

    /// Manage business profiles
    Profiles {
        #[clap(subcommand)]
        command: ProfileCommands,
    },

    /// Manage saved generation presets
    Frameworks {
        #[clap(subcommand)]
        command: FrameworkCommands,
    },

    /// Manage saved prompts
    Prompts {
        #[clap(subcommand)]
        command: PromptCommands,
    },

    /// Trending news topics and AI summaries
    News {
        #[clap(subcommand)]
        command: NewsCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    List,
    Add {
        #[clap(long)]
        name: String,
        #[clap(long, default_value = "")]
        industry: String,
        #[clap(long, default_value = "")]
        audience: String,
    },
    Show {
        #[clap(long)]
        name: String,
    },
}

#[derive(Subcommand)]
enum FrameworkCommands {
    List,
    Add {
        #[clap(long)]
        topic: String,
        #[clap(long)]
        platform: String,
        #[clap(long, default_value = "")]
        tone: String,
        #[clap(long, default_value = "")]
        length: String,
        #[clap(long, default_value = "")]
        extra: String,
    },
    Delete {
        #[clap(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum PromptCommands {
    List,
    Add {
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        text: Option<String>,
    },
    Favorite {
        #[clap(long)]
        id: String,
    },
    Delete {
        #[clap(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum NewsCommands {
    /// Show the top trending news topics
    Trending,
    /// Show recent events for a topic
    Events {
        #[clap(long)]
        topic: String,
    },
    /// Fetch events for a topic, summarize them, and save the result
    Summarize {
        #[clap(long)]
        topic: String,
    },
    /// List saved topic summaries
    Saved,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let cli = Cli::parse();
    let context = AppContext::new(
        environment::llm_params_from_env(),
        environment::news_client_from_env(),
        &environment::data_dir(),
    )?;

    let result = run(&context, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run(context: &AppContext, command: Commands) -> Result<Value> {
    match command {
        Commands::Generate {
            platform,
            topic,
            profile,
            tone,
            length,
            language,
            extra,
        } => {
            // The stored profile supplies the company fields, like the
            // profile selector in the generator form.
            let selected = profile.and_then(|name| {
                context
                    .profiles
                    .load_all()
                    .into_iter()
                    .find(|profile| profile.name == name)
            });

            let payload = json!({
                "platform": platform,
                "topic": topic,
                "tone": tone,
                "length": length,
                "language": language,
                "extraDescription": extra,
                "companyName": selected.as_ref().map(|p| p.name.clone()),
                "industry": selected.as_ref().map(|p| p.industry.clone()),
                "targetAudience": selected.as_ref().map(|p| p.audience.clone()),
            });
            context.dispatch("generate-post", payload).await
        }

        Commands::History { id: Some(id) } => {
            context.dispatch("get-history-item", json!(id)).await
        }
        Commands::History { id: None } => context.dispatch("get-history", Value::Null).await,

        Commands::Profiles { command } => match command {
            ProfileCommands::List => context.dispatch("get-profiles", Value::Null).await,
            ProfileCommands::Add {
                name,
                industry,
                audience,
            } => {
                context
                    .dispatch(
                        "add-profile",
                        json!({"name": name, "industry": industry, "audience": audience}),
                    )
                    .await
            }
            ProfileCommands::Show { name } => {
                context.dispatch("get-profile-detail", json!(name)).await
            }
        },

        Commands::Frameworks { command } => match command {
            FrameworkCommands::List => context.dispatch("get-frameworks", Value::Null).await,
            FrameworkCommands::Add {
                topic,
                platform,
                tone,
                length,
                extra,
            } => {
                context
                    .dispatch(
                        "add-framework",
                        json!({
                            "topic": topic,
                            "platform": platform,
                            "tone": tone,
                            "length": length,
                            "extraDescription": extra,
                        }),
                    )
                    .await
            }
            FrameworkCommands::Delete { id } => {
                context.dispatch("delete-framework", json!(id)).await
            }
        },

        Commands::Prompts { command } => match command {
            PromptCommands::List => context.dispatch("get-prompts", Value::Null).await,
            PromptCommands::Add { title, text } => {
                context
                    .dispatch("add-prompt", json!({"title": title, "text": text}))
                    .await
            }
            PromptCommands::Favorite { id } => {
                context.dispatch("toggle-favorite-prompt", json!(id)).await
            }
            PromptCommands::Delete { id } => context.dispatch("delete-prompt", json!(id)).await,
        },

        Commands::News { command } => match command {
            NewsCommands::Trending => context.dispatch("get-trending-topics", Value::Null).await,
            NewsCommands::Events { topic } => {
                context.dispatch("get-topic-events", json!(topic)).await
            }
            NewsCommands::Summarize { topic } => {
                let events = context.dispatch("get-topic-events", json!(&topic)).await?;
                context
                    .dispatch(
                        "save-topic-summary",
                        json!({"topic": topic, "events": events}),
                    )
                    .await
            }
            NewsCommands::Saved => context.dispatch("get-saved-topics", Value::Null).await,
        },
    }
}
