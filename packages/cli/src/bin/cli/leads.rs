// ABOUTME: Lead commands for the leadstage binary
// ABOUTME: Lists, inspects, re-stages, and re-evaluates leads held by the store

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::Subcommand;
use colored::*;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, ContentArrangement, Table,
};
use leadstage_cli::format::{
    bar, colored_stage, format_age, format_date, stage_label, truncate, EMPTY,
};
use leadstage_cli::{parse_group, parse_stage};
use leadstage_core::{GroupConfig, Lead, Stage, StageGroup, StageSource};
use leadstage_store::LeadStore;

#[derive(Subcommand)]
pub enum LeadsCommands {
    /// List leads, narrowed by any combination of filters
    List {
        /// Case-insensitive text matched against name, headline, emails, and location
        #[arg(short, long)]
        search: Option<String>,
        /// Only leads in this campaign
        #[arg(short, long)]
        campaign: Option<u64>,
        /// Only leads in this stage (repeatable)
        #[arg(long = "stage", value_parser = parse_stage)]
        stages: Vec<Stage>,
        /// Only leads in this stage group (repeatable)
        #[arg(long = "group", value_parser = parse_group)]
        groups: Vec<StageGroup>,
        /// Inline filter expression as JSON, e.g.
        /// '{"conditions":[{"field":"email","operator":"is_set"}]}'
        #[arg(short, long)]
        filter: Option<String>,
        /// Print leads as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Lead counts per stage and stage group
    Stats,
    /// Show lead details and stage history
    Show {
        /// Lead ID to show
        id: u64,
        /// Print the lead as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manually move a lead to another stage
    SetStage {
        /// Lead ID to update
        id: u64,
        /// Target stage, e.g. engaged or NOT_INTERESTED
        #[arg(value_parser = parse_stage)]
        stage: Stage,
        /// Why the lead is moving
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Ask the classifier which stage a lead belongs in
    Suggest {
        /// Lead ID to evaluate
        id: u64,
    },
}

pub async fn handle_leads_command(store: &LeadStore, command: LeadsCommands) -> anyhow::Result<()> {
    match command {
        LeadsCommands::List {
            search,
            campaign,
            stages,
            groups,
            filter,
            json,
        } => {
            if let Some(search) = search {
                store.set_search_query(search).await;
            }
            store.set_campaign_filter(campaign).await;
            store.set_stage_filter(stages).await;
            store.set_stage_group_filter(groups).await;
            if let Some(filter) = filter {
                store
                    .set_inline_filter_json(&filter)
                    .await
                    .context("Invalid --filter expression")?;
            }
            list_leads(store, json).await
        }
        LeadsCommands::Stats => show_stats(store).await,
        LeadsCommands::Show { id, json } => show_lead(store, id, json).await,
        LeadsCommands::SetStage { id, stage, reason } => set_stage(store, id, stage, reason).await,
        LeadsCommands::Suggest { id } => suggest_stage(store, id).await,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn stage_cell(stage: Stage) -> Cell {
    let color = match stage.group() {
        StageGroup::New => Color::Blue,
        StageGroup::InProgress => Color::Yellow,
        StageGroup::Closed => Color::DarkGrey,
    };
    Cell::new(stage_label(stage)).fg(color)
}

fn source_text(source: StageSource) -> &'static str {
    match source {
        StageSource::Ai => "AI",
        StageSource::Manual => "Manual",
    }
}

async fn list_leads(store: &LeadStore, json: bool) -> anyhow::Result<()> {
    let leads = store.filtered_leads().await;
    let total = store.total_leads().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
        return Ok(());
    }

    if leads.is_empty() {
        println!("{}", "No leads match the current filters".yellow());
        println!("{}", format!("{} leads loaded in total", total).dimmed());
        return Ok(());
    }

    let now = Utc::now();
    let mut table = new_table();
    table.set_header(vec![
        "ID",
        "Name",
        "Stage",
        "Source",
        "Campaign",
        "Email",
        "Location",
        "Last action",
    ]);

    for lead in &leads {
        table.add_row(vec![
            Cell::new(lead.id),
            Cell::new(truncate(&lead.name, 22)),
            stage_cell(lead.stage()),
            Cell::new(source_text(lead.stage_source())),
            Cell::new(lead.campaign_name.as_deref().unwrap_or(EMPTY)),
            Cell::new(truncate(lead.emails.first().map_or(EMPTY, String::as_str), 28)),
            Cell::new(truncate(lead.location.as_deref().unwrap_or(EMPTY), 20)),
            Cell::new(format_age(lead.last_action, now)),
        ]);
    }

    println!("{}", table);
    println!(
        "Showing {} of {} leads",
        leads.len().to_string().cyan(),
        total.to_string().cyan()
    );

    Ok(())
}

async fn show_stats(store: &LeadStore) -> anyhow::Result<()> {
    let total = store.total_leads().await;
    let stages = store.stage_stats().await;
    let groups = store.group_stats().await;

    println!("{}", "Pipeline by stage".blue().bold());
    let mut table = new_table();
    table.set_header(vec!["Stage", "Leads", ""]);
    for (stage, count) in &stages {
        table.add_row(vec![
            stage_cell(*stage),
            Cell::new(count),
            Cell::new(bar(*count, total, 20)),
        ]);
    }
    println!("{}", table);
    println!();

    println!("{}", "Pipeline by group".blue().bold());
    let mut table = new_table();
    table.set_header(vec!["Group", "Leads", "Stages"]);
    for (group, count) in &groups {
        let config = GroupConfig::for_group(*group);
        let members: Vec<&str> = config.stages.iter().map(|s| stage_label(*s)).collect();
        table.add_row(vec![
            Cell::new(config.label),
            Cell::new(count),
            Cell::new(members.join(", ")),
        ]);
    }
    println!("{}", table);
    println!("Total: {} leads", total.to_string().cyan());

    Ok(())
}

fn find_lead_error(id: u64) -> anyhow::Error {
    anyhow!("Lead with ID {} not found", id)
}

async fn show_lead(store: &LeadStore, id: u64, json: bool) -> anyhow::Result<()> {
    let lead = store
        .get_lead_by_id(id)
        .await
        .ok_or_else(|| find_lead_error(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&lead)?);
        return Ok(());
    }

    println!("{}", format!("Lead {} - {}", lead.id, lead.name).blue().bold());
    println!();
    print_lead_details(&lead);

    if !lead.stage_history().is_empty() {
        println!();
        println!("{}", "Stage history".bold());
        let mut table = new_table();
        table.set_header(vec!["Stage", "Source", "Date", "Reason"]);
        for entry in lead.stage_history() {
            table.add_row(vec![
                stage_cell(entry.stage),
                Cell::new(source_text(entry.source)),
                Cell::new(format_date(Some(entry.timestamp))),
                Cell::new(entry.reason.as_deref().unwrap_or(EMPTY)),
            ]);
        }
        println!("{}", table);
    }

    Ok(())
}

fn print_lead_details(lead: &Lead) {
    let field = |label: &str, value: &str| {
        println!("{:<12} {}", format!("{}:", label).bold(), value)
    };
    let or_empty = |value: Option<&str>| value.unwrap_or(EMPTY).to_string();

    field("Headline", &or_empty(lead.headline.as_deref()));
    field("Company", &or_empty(lead.company.as_deref()));
    field("Location", &or_empty(lead.location.as_deref()));
    let emails = if lead.emails.is_empty() {
        format!("{} ({:?})", EMPTY, lead.email_status)
    } else {
        lead.emails.join(", ")
    };
    field("Emails", &emails);
    field("LinkedIn", &or_empty(lead.linkedin_url.as_deref()));
    field("Campaign", &or_empty(lead.campaign_name.as_deref()));
    field("Created", &format_date(lead.created_at));
    println!();
    println!(
        "{:<12} {} ({}, {})",
        "Stage:".bold(),
        colored_stage(lead.stage()),
        source_text(lead.stage_source()),
        format_date(Some(lead.stage_updated_at()))
    );
    field("Reason", lead.stage_reason().unwrap_or(EMPTY));
    field(
        "Activity",
        &format!(
            "{} sent, {} replies, {} follow-ups",
            lead.messages_sent, lead.replies_received, lead.follow_up_count
        ),
    );
}

async fn set_stage(
    store: &LeadStore,
    id: u64,
    stage: Stage,
    reason: Option<String>,
) -> anyhow::Result<()> {
    let previous = store
        .get_lead_by_id(id)
        .await
        .ok_or_else(|| find_lead_error(id))?
        .stage();

    if !store.update_lead_stage(id, stage, reason).await {
        return Err(find_lead_error(id));
    }

    println!(
        "{} Lead {} moved from {} to {}",
        "✓".green(),
        id,
        colored_stage(previous),
        colored_stage(stage)
    );
    println!(
        "{}",
        "Changes are kept in memory for this run only".dimmed()
    );

    Ok(())
}

async fn suggest_stage(store: &LeadStore, id: u64) -> anyhow::Result<()> {
    let suggestion = store
        .re_evaluate_lead_stage(id)
        .await
        .ok_or_else(|| find_lead_error(id))?;

    if suggestion.is_change() {
        println!(
            "{} {} -> {}",
            "Suggested move:".green().bold(),
            colored_stage(suggestion.current_stage),
            colored_stage(suggestion.suggested_stage)
        );
    } else {
        println!(
            "{} {}",
            "Keep current stage:".bold(),
            colored_stage(suggestion.current_stage)
        );
    }

    println!("{:<12} {}", "Intent:".bold(), suggestion.intent);
    println!(
        "{:<12} {:.0}%",
        "Confidence:".bold(),
        suggestion.confidence * 100.0
    );
    if let Some(score) = suggestion.score {
        println!(
            "{:<12} {:.1} (threshold {:.0})",
            "Score:".bold(),
            score.score,
            score.threshold
        );
    }
    println!("{:<12} {}", "Reason:".bold(), suggestion.reason);

    Ok(())
}
