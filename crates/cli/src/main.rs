use anyhow::Result;
use audit_core::config;
use clap::{Parser, Subcommand};
use cli::{audit, rules, watch};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Audit { meetings, json } => {
            audit::run_audit(&cfg, &meetings, json).await?;
            Ok(())
        }
        Commands::Summary { meetings, json } => audit::run_summary(&cfg, &meetings, json).await,
        Commands::Watch { meetings, json } => watch::watch_meetings(cfg, meetings, json).await,
        Commands::Rules { command } => match command {
            RuleCommands::List { json } => {
                rules::list_rules(&cfg, json).await?;
                Ok(())
            }
            RuleCommands::Add {
                pattern,
                field,
                category,
                confidence,
                append,
            } => {
                rules::add_rule(&cfg, &pattern, &field, &category, &confidence, append).await?;
                Ok(())
            }
            RuleCommands::Delete { id } => rules::delete_rule(&cfg, id).await,
            RuleCommands::Remember { title, category } => {
                rules::remember(&cfg, &title, &category).await?;
                Ok(())
            }
        },
    }
}

#[derive(Parser)]
#[command(name = "calendar-audit")]
#[command(about = "Categorize calendar meetings with rules and heuristics", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Categorize a meetings file and print every assignment plus totals
    Audit {
        /// JSON array of meetings
        meetings: PathBuf,
        /// Output JSON report
        #[arg(long)]
        json: bool,
    },
    /// Print per-category totals only
    Summary {
        /// JSON array of meetings
        meetings: PathBuf,
        /// Output JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Re-run the audit whenever the meetings file changes
    Watch {
        meetings: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Manage stored category rules
    Rules {
        #[command(subcommand)]
        command: RuleCommands,
    },
}

#[derive(Subcommand)]
enum RuleCommands {
    /// List rules in match order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a rule (placed first unless --append)
    Add {
        #[arg(long)]
        pattern: String,
        /// title | attendeeEmail | attendeeDomain
        #[arg(long, default_value = "title")]
        field: String,
        #[arg(long)]
        category: String,
        /// high | low
        #[arg(long, default_value = "high")]
        confidence: String,
        /// Place after existing rules instead of before them
        #[arg(long, default_value_t = false)]
        append: bool,
    },
    /// Delete a rule by id
    Delete { id: i64 },
    /// Remember a categorization as a title rule (first three words)
    Remember {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
    },
}
