//! Terminal painting for rendered display trees and the history panel.

use bionexus_core::SessionHistory;
use bionexus_render::{DisplayBlock, DisplayTree};
use chrono::DateTime;
use colored::Colorize;

/// Prints a rendered message tree.
pub fn print_tree(tree: &DisplayTree) {
    for block in tree {
        print_block(block);
    }
}

fn print_block(block: &DisplayBlock) {
    match block {
        DisplayBlock::UserBubble(text) => {
            println!("{}", format!("> {}", text).green());
        }
        DisplayBlock::BotBubble(text) => {
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        DisplayBlock::GraphSection {
            node_count,
            relationship_count,
            community_count,
            summary,
        } => {
            println!("{}", "Knowledge Graph Analysis".bright_white().bold());
            println!(
                "  {}  {}  {}",
                format!("nodes: {}", node_count).blue(),
                format!("relationships: {}", relationship_count).blue(),
                format!("communities: {}", community_count).blue(),
            );
            if let Some(summary) = summary {
                for line in summary.lines() {
                    println!("  {}", line.bright_blue());
                }
            }
            println!();
        }
        DisplayBlock::TargetSection { content } => {
            println!("{}", "OpenTargets Analysis".bright_white().bold());
            for line in content.lines() {
                println!("  {}", line.bright_blue());
            }
            println!();
        }
        DisplayBlock::LiteratureSection { answer, references } => {
            println!("{}", "Literature Analysis".bright_white().bold());
            for line in answer.lines() {
                println!("  {}", line.bright_blue());
            }
            if let Some(references) = references {
                if references.expanded {
                    println!("  {}", "Referenced Papers".bright_white());
                    for reference in &references.entries {
                        println!(
                            "    {} {}",
                            reference.title.bright_blue(),
                            format!("(PMID: {})", reference.pmid).bright_black(),
                        );
                    }
                } else {
                    println!(
                        "  {}",
                        format!(
                            "▸ Referenced Papers ({}) - /papers to expand",
                            references.entries.len()
                        )
                        .bright_black()
                    );
                }
            }
            println!();
        }
        DisplayBlock::SynthesisSection { content } => {
            println!("{}", "Final Analysis".bright_white().bold());
            for line in content.lines() {
                println!("  {}", line.bright_blue());
            }
            println!();
        }
    }
}

/// Prints the archived-sessions panel, most recent first.
pub fn print_history(history: &SessionHistory) {
    if history.is_empty() {
        println!("{}", "No chat history yet".bright_black());
        return;
    }

    for (index, session) in history.sessions().iter().enumerate() {
        println!(
            "{} {}  {}",
            format!("{:>2}.", index + 1).bright_white(),
            format_timestamp(&session.timestamp).bright_white(),
            session.title.bright_black(),
        );
    }
}

/// Formats an ISO-8601 archival timestamp as e.g. `Mar 4, 09:30`.
fn format_timestamp(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%b %-d, %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
