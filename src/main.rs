use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use bat::PrettyPrinter;
use clap::{Parser, Subcommand};
use cliclack::spinner;
use console::style;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use magpie::agents::TaskOutput;
use magpie::coordinator::Coordinator;
use magpie::providers::base::Provider;
use magpie::providers::configs::{
    DeepSeekProviderConfig, OpenAiProviderConfig, ProviderConfig,
};
use magpie::providers::factory::{get_provider, ProviderType};
use magpie::reddit::{RedditClient, TimeWindow};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// LLM backend family to use
    #[arg(long, default_value = "openai")]
    backend: String,

    /// Model identifier (defaults per backend)
    #[arg(short, long)]
    model: Option<String>,

    /// Reasoning effort (low/medium/high), applied only to reasoning models
    #[arg(long)]
    effort: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze complaints and problems voiced in a subreddit
    Complaints {
        subreddit: String,

        /// Restrict gathering to threads matching this query
        #[arg(short, long)]
        query: Option<String>,

        /// Ranking window for top threads
        #[arg(short, long, default_value = "week")]
        window: String,

        /// Maximum number of comments to gather
        #[arg(short, long, default_value_t = 100)]
        limit: usize,
    },
    /// Find and rank subreddits relevant to a topic
    Discover {
        topic: String,

        /// Per-term subreddit search limit
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },
    /// Research a topic and write up the findings
    Research { query: String },
    /// List subreddits cross-referenced from a subreddit's sidebar and wiki
    Related { subreddit: String },
    /// Show a subreddit's top posts
    Posts {
        subreddit: String,

        #[arg(short, long, default_value = "week")]
        window: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let provider = build_provider(&cli)?;
    println!("magpie {}", style(provider.describe()).dim());

    match &cli.command {
        Command::Complaints {
            subreddit,
            query,
            window,
            limit,
        } => {
            let coordinator = Coordinator::new(provider, RedditClient::from_env()?);
            let window: TimeWindow = window.parse()?;

            let spin = spinner();
            spin.start("analyzing complaints");
            let results = coordinator.analyze_reddit_complaints(
                subreddit,
                query.as_deref(),
                window,
                *limit,
            )?;
            spin.stop(format!("analyzed {} comments", results.raw_comments.len()));

            println!("\n{}", style("=== Reddit Analysis Results ===").bold());
            print_stage("Summary of Issues", &results.summary);
            print_stage("Detailed Analysis", &results.detailed_analysis);
            print_stage("Additional Insights", &results.insights);
            print_report("Final Report", &results.final_report);
        }
        Command::Discover { topic, limit } => {
            let coordinator = Coordinator::new(provider, RedditClient::from_env()?);

            let spin = spinner();
            spin.start("discovering subreddits");
            let results = coordinator.discover_subreddits(topic, *limit)?;
            spin.stop(format!(
                "found {} subreddits",
                results.subreddits_found.len()
            ));

            println!("\n{}", style("=== Subreddit Discovery Results ===").bold());
            println!("\n{}", style("Search Terms Used").bold().underlined());
            println!("{}", results.search_terms_used.join("\n"));
            println!("\n{}", style("Subreddits Found").bold().underlined());
            for sub in &results.subreddits_found {
                println!("r/{} ({} subscribers)", sub.name, sub.subscribers);
            }
            print_stage("Analysis", &results.analysis);
            print_stage("Additional Insights", &results.insights);
            print_report("Final Report", &results.final_report);
        }
        Command::Research { query } => {
            let coordinator = Coordinator::new(provider, RedditClient::from_env()?);

            let spin = spinner();
            spin.start("researching");
            let results = coordinator.research_topic(query);
            spin.stop("research complete");

            print_stage("Findings", &results.findings);
            print_stage("Analysis", &results.analysis);
            print_report("Final Report", &results.final_report);
        }
        Command::Related { subreddit } => {
            let reddit = RedditClient::from_env()?;
            let related = reddit.related_subreddits(subreddit);
            if related.is_empty() {
                println!("No related subreddits found for r/{subreddit}");
            } else {
                for name in related {
                    println!("r/{name}");
                }
            }
        }
        Command::Posts {
            subreddit,
            window,
            limit,
        } => {
            let reddit = RedditClient::from_env()?;
            let window: TimeWindow = window.parse()?;
            let posts = reddit.top_posts(subreddit, window, *limit)?;
            for (i, post) in posts.iter().enumerate() {
                println!("\n{}", style(format!("Post {}", i + 1)).bold());
                println!("Title: {}", post.title);
                println!("Author: {}", post.author);
                println!("Score: {}", post.score);
                println!("Comments: {}", post.num_comments);
                println!("URL: {}", post.url);
                if !post.content.is_empty() {
                    println!("Content: {}", post.content);
                }
            }
        }
    }

    Ok(())
}

fn build_provider(cli: &Cli) -> Result<Arc<dyn Provider>> {
    let provider = match cli.backend.parse::<ProviderType>()? {
        ProviderType::OpenAi => {
            let api_key = env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY environment variable must be set")?;
            let model = cli.model.as_deref().unwrap_or("gpt-4o-mini").parse()?;
            let mut config = OpenAiProviderConfig::new(api_key, model);
            if let Some(effort) = &cli.effort {
                config = config.with_reasoning_effort(effort.parse()?);
            }
            get_provider(ProviderConfig::OpenAi(config))?
        }
        ProviderType::DeepSeek => {
            let api_key = env::var("DEEPSEEK_API_KEY")
                .context("DEEPSEEK_API_KEY environment variable must be set")?;
            let model = cli.model.as_deref().unwrap_or("deepseek-chat").parse()?;
            let config = DeepSeekProviderConfig::new(api_key, model);
            get_provider(ProviderConfig::DeepSeek(config))?
        }
    };
    Ok(Arc::from(provider))
}

fn print_stage(title: &str, stage: &TaskOutput) {
    println!("\n{}", style(title).bold().underlined());
    if stage.ok {
        println!("{}", stage.text);
    } else {
        println!("{}", style("[stage failed, output degraded]").red());
    }
}

fn print_report(title: &str, stage: &TaskOutput) {
    println!("\n{}", style(title).bold().underlined());
    if !stage.ok {
        println!("{}", style("[stage failed, output degraded]").red());
        return;
    }
    render(&stage.text);
    println!();
}

fn render(content: &str) {
    if PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .is_err()
    {
        println!("{content}");
    }
}
