mod display;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_core::DaybookConfig;
use daybook_mood::MoodPipeline;
use daybook_store::{Journal, JournalStore};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "daybook", author, version, about = "A private journal that reads the mood of every entry", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, env = "DAYBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the journal database, overriding the config
    #[arg(short, long)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new entry (reads stdin when no text is given)
    Write {
        /// Entry text; omit to read it from stdin
        text: Option<String>,

        /// Entry title
        #[arg(short, long)]
        title: Option<String>,
    },
    /// List recent entries
    List {
        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
    /// Show one entry in full
    Show {
        /// Entry id
        id: i64,
    },
    /// Rewrite an entry and re-run its mood analysis
    Edit {
        /// Entry id
        id: i64,

        /// New text; omit to read it from stdin
        text: Option<String>,

        /// New title; omit to keep the current one
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Delete an entry and its mood analysis
    Delete {
        /// Entry id
        id: i64,
    },
    /// Search entries by keyword in content or title
    Search {
        /// Keyword to look for
        keyword: String,
    },
    /// Mood statistics over recent days
    Stats {
        /// Window in days; defaults to the configured window
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Print a reflection prompt
    Prompt {
        /// Restrict to one category
        #[arg(short = 'C', long, value_parser = ["gratitude", "growth", "challenge", "creativity"])]
        category: Option<String>,
    },
    /// Analyze text without saving anything
    Analyze {
        /// Text to analyze
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = DaybookConfig::load_or_default(&config_path);
    if let Some(db) = cli.db.clone() {
        config.storage.db_path = db;
    }

    run(cli.command, config).await
}

async fn run(command: Command, config: DaybookConfig) -> Result<()> {
    // Analyze is stateless and must not touch the database.
    let command = match command {
        Command::Analyze { text } => {
            let pipeline = MoodPipeline::new(&config.llm)?;
            let mood = pipeline.analyze_and_reconcile(&text).await;
            println!("{}", display::mood_line(&mood));
            return Ok(());
        }
        other => other,
    };

    info!("Opening journal at {}", config.storage.db_path);
    let store = JournalStore::new(&config.storage.db_path).await?;
    let pipeline = MoodPipeline::new(&config.llm)?;
    let journal = Journal::new(store, pipeline, &config.journal);

    match command {
        Command::Write { text, title } => {
            let content = text_or_stdin(text)?;
            let (id, mood) = journal.create_entry(&content, title.as_deref()).await?;
            println!("Saved entry {}.", id);
            println!("{}", display::mood_line(&mood));
        }
        Command::List { limit } => {
            let entries = journal.entries(limit).await?;
            if entries.is_empty() {
                println!("No entries yet. Try `daybook write`.");
            }
            for entry in &entries {
                println!("{}", display::entry_line(entry));
            }
        }
        Command::Show { id } => {
            let entry = journal.entry(id).await?;
            print!("{}", display::format_entry(&entry));
        }
        Command::Edit { id, text, title } => {
            let existing = journal.entry(id).await?;
            let content = text_or_stdin(text)?;
            let title = title.or(existing.title);
            let mood = journal.update_entry(id, &content, title.as_deref()).await?;
            println!("Updated entry {}.", id);
            println!("{}", display::mood_line(&mood));
        }
        Command::Delete { id } => {
            if journal.delete_entry(id).await? {
                println!("Deleted entry {}.", id);
            } else {
                println!("Entry {} not found.", id);
            }
        }
        Command::Search { keyword } => {
            let hits = journal.search(&keyword).await?;
            if hits.is_empty() {
                println!("No entries match '{}'.", keyword);
            }
            for entry in &hits {
                println!("{}", display::entry_line(entry));
            }
        }
        Command::Stats { days } => {
            let days = days.unwrap_or(config.journal.stats_window_days);
            let stats = journal.statistics(days).await?;
            let streak = journal.mood_streak().await?;
            print!("{}", display::format_stats(&stats, streak, days));
            println!();
            println!("{}", journal.mood_based_reflection().await?);
        }
        Command::Prompt { category } => {
            match journal.reflection_prompt(category.as_deref()).await? {
                Some(prompt) => println!("[{}] {}", prompt.category, prompt.text),
                None => println!("No reflection prompt available."),
            }
        }
        Command::Analyze { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read entry text from stdin")?;
            Ok(buf)
        }
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("daybook").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("daybook.toml"))
}
