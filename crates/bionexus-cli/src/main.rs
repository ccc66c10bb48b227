//! The `bionexus` REPL binary.
//!
//! A terminal chat surface over the Renaiscent biomedical-analysis
//! API: plain input is sent as a query, slash commands drive the
//! session lifecycle (new chat, history panel, clear with
//! confirmation), and structured responses are rendered as sections.

mod display;
mod helper;

use anyhow::{Context as _, Result};
use bionexus_core::{ChatController, ClientConfig, JsonHistoryStore, WELCOME_TEXT};
use bionexus_interaction::{AnalysisGateway, BioNexusClient};
use bionexus_render::{render, RenderOptions};
use bionexus_types::Sender;
use clap::Parser;
use colored::Colorize;
use helper::ReplHelper;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bionexus", about = "Terminal client for the Renaiscent BioNexus API")]
struct Cli {
    /// Directory for the persisted session history and config.toml
    /// (default: ~/.bionexus)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ===== Backend Initialization =====
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => ClientConfig::default_data_dir().context("Failed to resolve data directory")?,
    };
    let config =
        ClientConfig::load_from(&data_dir).context("Failed to load client configuration")?;
    let store =
        Arc::new(JsonHistoryStore::new(&data_dir).context("Failed to open history store")?);
    let gateway = BioNexusClient::new(&config).context("Failed to build HTTP client")?;
    let mut controller =
        ChatController::new(store).context("Failed to load session history")?;

    // ===== REPL Setup =====
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== Renaiscent BioNexus ===".bright_magenta().bold());
    println!(
        "{}",
        "Ask a biomedical question, or type '/help' for commands.".bright_black()
    );
    println!();
    println!("{}", WELCOME_TEXT.bright_blue());

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if let Some(command) = trimmed.strip_prefix('/') {
                    handle_command(command, &mut controller, &mut rl);
                    continue;
                }

                send_query(trimmed, &mut controller, &gateway).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Submits one query and paints the response.
///
/// The prompt is held for the duration, so there is never more than
/// one query in flight.
async fn send_query(
    input: &str,
    controller: &mut ChatController,
    gateway: &impl AnalysisGateway,
) {
    let Some(pending) = controller.submit(input) else {
        return;
    };

    println!("{}", "thinking...".bright_black());
    let outcome = gateway.ask(&pending.query).await;
    controller.resolve(pending.token, outcome);

    if let Some(message) = controller.messages().last() {
        display::print_tree(&render(message, RenderOptions::default()));
    }
}

fn handle_command(
    command: &str,
    controller: &mut ChatController,
    rl: &mut Editor<ReplHelper, DefaultHistory>,
) {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("new") => {
            if let Err(err) = controller.new_chat() {
                eprintln!(
                    "{}",
                    format!("Warning: failed to save history: {}", err).yellow()
                );
            }
            println!("{}", WELCOME_TEXT.bright_blue());
        }
        Some("history") => display::print_history(controller.history()),
        Some("load") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(index) if index >= 1 => load_session(index, controller),
            _ => println!("{}", "Usage: /load <number from /history>".yellow()),
        },
        Some("papers") => show_latest_papers(controller),
        Some("clear") => clear_with_confirmation(controller, rl),
        Some("help") => print_help(),
        _ => println!("{}", "Unknown command. Type '/help' for commands.".yellow()),
    }
}

fn load_session(index: usize, controller: &mut ChatController) {
    let Some(session) = controller.history().sessions().get(index - 1) else {
        println!("{}", "No such session. See '/history'.".yellow());
        return;
    };
    let id = session.id;

    match controller.select_session(id) {
        Ok(()) => {
            println!("{}", "Loaded session:".bright_black());
            for message in controller.messages().to_vec() {
                display::print_tree(&render(&message, RenderOptions::default()));
            }
        }
        Err(err) => eprintln!("{}", format!("Error: {}", err).red()),
    }
}

/// Re-renders the latest structured bot message with its reference
/// list expanded.
fn show_latest_papers(controller: &ChatController) {
    let latest_bot = controller
        .messages()
        .iter()
        .rev()
        .find(|message| message.sender == Sender::Bot);

    let Some(message) = latest_bot else {
        println!("{}", "Nothing to expand yet.".bright_black());
        return;
    };

    display::print_tree(&render(
        message,
        RenderOptions {
            expand_references: true,
        },
    ));
}

fn clear_with_confirmation(
    controller: &mut ChatController,
    rl: &mut Editor<ReplHelper, DefaultHistory>,
) {
    if controller.messages().len() <= 1 {
        println!("{}", "Nothing to clear.".bright_black());
        return;
    }

    println!(
        "{}",
        "Are you sure you want to clear the current chat? This action cannot be undone."
            .bright_yellow()
    );
    let answer = rl.readline("[y/N] ").unwrap_or_default();
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        controller.clear();
        println!("{}", WELCOME_TEXT.bright_blue());
    } else {
        println!("{}", "Cancelled.".bright_black());
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /new       - Archive the current chat and start a new one");
    println!("  /history   - List the ten most recent archived chats");
    println!("  /load <n>  - Switch to an archived chat from /history");
    println!("  /papers    - Expand the latest referenced-papers list");
    println!("  /clear     - Clear the current chat (asks for confirmation)");
    println!("  /help      - Show this help message");
    println!("  quit/exit  - Leave the REPL");
    println!("  Any other text is sent to the analysis service");
}
