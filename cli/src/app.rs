use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};
use lavender_history::{export_file_name, FileKeyValueStore, HistoryStore};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::{GenerateArgs, HistoryAction};
use crate::gateway_client::GatewayClient;
use crate::output::{print_cards, print_history};
use crate::prompt::{ContentType, IdeaForm};
use crate::workspace::{export_cards, Card, IdeaWorkspace, SaveState};

pub type CliWorkspace = IdeaWorkspace<GatewayClient, FileKeyValueStore>;

const CLEAR_CONFIRMATION: &str =
    "Are you sure you want to delete all your saved history? This cannot be undone.";

pub fn build_workspace(gateway: GatewayClient, history_path: PathBuf) -> CliWorkspace {
    info!("Using history storage at {}", history_path.display());
    IdeaWorkspace::new(gateway, HistoryStore::new(FileKeyValueStore::new(history_path)))
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

async fn write_export(path: &Path, document: String) -> Result<()> {
    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Ask for every form field the content type uses
fn prompt_form(content_type: ContentType, mut form: IdeaForm) -> Result<IdeaForm> {
    let ask = |label: &str, current: &str| -> Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")
    };

    form.topic = ask("Topic", &form.topic)?;
    match content_type {
        ContentType::Instagram => form.goal = ask("Main goal", &form.goal)?,
        ContentType::Youtube | ContentType::Blog => {
            form.audience = ask("Target audience", &form.audience)?
        }
    }
    form.tone = ask("Tone", &form.tone)?;
    if content_type == ContentType::Blog {
        let keywords = ask("Keywords (comma separated)", &form.keywords.join(", "))?;
        form.keywords = keywords.split(',').map(|k| k.trim().to_string()).collect();
    }
    form.notes = ask("Additional constraints", &form.notes)?;
    Ok(form)
}

/// Generate ideas, print them, then save the ones the user asks for
pub async fn run_generate(workspace: &CliWorkspace, args: GenerateArgs) -> Result<()> {
    let content_type = args.content_type;
    let form = if args.interactive {
        prompt_form(content_type, args.form())?
    } else {
        args.form()
    };

    let progress = spinner("Generating ideas...");
    let cards = workspace.generate(content_type, &form).await;
    progress.finish_and_clear();

    // A single invocation issues one request, so nothing can be stale here
    let Some(mut cards) = cards else {
        return Ok(());
    };

    let title = format!("{} ideas", content_type.label());
    print_cards(&title, &cards);

    if let Some(output) = args.export {
        if cards.iter().any(|card| card.idea_text().is_some()) {
            let now = Utc::now();
            let path = output
                .unwrap_or_else(|| PathBuf::from(export_file_name(content_type.label(), now)));
            write_export(&path, export_cards(content_type, &cards, now)).await?;
            println!("{}", format!("Exported ideas to {}", path.display()).green());
        } else {
            println!("{}", "No ideas to export.".yellow());
        }
    }

    let unsaved: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            matches!(
                card,
                Card::Idea {
                    save_state: SaveState::Unsaved,
                    ..
                }
            )
        })
        .map(|(i, _)| i)
        .collect();
    if unsaved.is_empty() {
        return Ok(());
    }

    let selected: Vec<usize> = if args.save_all {
        unsaved
    } else if args.pick {
        let labels: Vec<String> = unsaved
            .iter()
            .map(|&i| {
                let text = cards[i].idea_text().unwrap_or_default();
                text.lines().next().unwrap_or_default().to_string()
            })
            .collect();
        let chosen = MultiSelect::new()
            .with_prompt("Select ideas to save (space to toggle, enter to confirm)")
            .items(&labels)
            .interact()
            .context("Failed to read selection")?;
        chosen.into_iter().map(|i| unsaved[i]).collect()
    } else {
        Vec::new()
    };

    for i in &selected {
        workspace
            .save_card(&mut cards[*i])
            .await
            .context("Failed to save idea")?;
    }
    if !selected.is_empty() {
        println!("{}", format!("👍 Saved {} idea(s)", selected.len()).green());
    }

    Ok(())
}

pub async fn run_history(workspace: &CliWorkspace, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            let ideas = workspace
                .saved_ideas()
                .await
                .context("Failed to read history")?;
            print_history(&ideas);
        }
        HistoryAction::Remove { position } => {
            match workspace
                .remove_at(position)
                .await
                .context("Failed to update history")?
            {
                Some(_) => {
                    println!("{}", format!("🗑️ Removed idea {}", position).green());
                    print_history(&workspace.saved_ideas().await?);
                }
                None => println!("{}", format!("No saved idea at position {}", position).yellow()),
            }
        }
        HistoryAction::Clear { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(CLEAR_CONFIRMATION)
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
            if workspace.clear_history(confirmed).await? {
                println!("{}", "History cleared.".green());
                print_history(&[]);
            } else {
                println!("History left unchanged.");
            }
        }
        HistoryAction::Export { category, output } => {
            let now = Utc::now();
            let document = workspace
                .export_history(&category, now)
                .await
                .context("Failed to read history")?;
            let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(&category, now)));
            write_export(&path, document).await?;
            println!("{}", format!("Exported history to {}", path.display()).green());
        }
    }
    Ok(())
}

pub async fn run_health(gateway: &GatewayClient) -> Result<()> {
    match gateway.test_connection().await {
        Ok(true) => println!("{}", "Gateway is up.".green()),
        Ok(false) => println!("{}", "Gateway answered with an error status.".red()),
        Err(e) => {
            error!("Health check failed: {:#}", e);
            println!(
                "{}",
                "Could not reach the gateway. Please ensure it is running.".red()
            );
        }
    }
    Ok(())
}
