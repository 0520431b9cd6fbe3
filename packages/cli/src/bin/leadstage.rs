use clap::Parser;
use colored::*;
use leadstage_store::{LeadStore, StoreConfig};
use std::path::PathBuf;
use std::process;

mod cli;

use cli::leads::LeadsCommands;

#[derive(Parser)]
#[command(name = "leadstage")]
#[command(about = "Leadstage - track leads through the outreach pipeline")]
#[command(version)]
struct Cli {
    /// JSON file of leads to load instead of the built-in examples
    #[arg(long, global = true)]
    leads_file: Option<PathBuf>,

    /// Days of silence before a lead counts as not replying
    #[arg(long, global = true)]
    no_reply_days: Option<i64>,

    #[command(subcommand)]
    command: LeadsCommands,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    leadstage_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = StoreConfig::from_env()?;
    if let Some(path) = cli.leads_file {
        config.leads_file = Some(path);
    }
    if let Some(days) = cli.no_reply_days {
        anyhow::ensure!(days >= 1, "--no-reply-days must be at least 1, got {}", days);
        config.no_reply_days = days;
    }

    let store = LeadStore::from_config(&config);
    store.fetch_leads().await;

    cli::leads::handle_leads_command(&store, cli.command).await
}
