//! SnapFind CLI
//!
//! Command-line interface for the SnapFind search client.
//! `search` runs a one-shot query against the backend; `gui` (or no
//! subcommand) opens the desktop window.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::HumanDuration;
use snapfind::{similarity_percent, SearchClient, TileInfo};
use std::time::Instant;

/// SnapFind - Semantic image search client
///
/// Sends text queries to a vector-search backend and shows
/// matching images with similarity scores.
#[derive(Parser)]
#[command(name = "snapfind")]
#[command(author = "SnapFind Contributors")]
#[command(version)]
#[command(about = "Semantic image search client", long_about = None)]
struct Cli {
    /// API base URL of the search backend
    #[arg(long, env = "SNAPFIND_API_BASE", default_value_t = snapfind::config::compiled_api_base().to_string())]
    api_base: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a one-shot search and print the results
    Search {
        /// Query text (Korean or English)
        query: String,

        /// Number of results to request (clamped to 1-50)
        #[arg(short, long, default_value = "10")]
        k: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Launch the desktop window
    Gui,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Search { query, k, output }) => cmd_search(&cli.api_base, &query, k, &output),
        Some(Commands::Gui) | None => cmd_gui(&cli.api_base),
    };

    if let Err(e) = result {
        if e.is_timeout() {
            eprintln!(
                "{} search timed out after 15s: {}",
                style("error:").red().bold(),
                e
            );
        } else {
            eprintln!("{} {}", style("error:").red().bold(), e);
        }
        std::process::exit(1);
    }
}

/// Search command - query the backend once and print results
fn cmd_search(api_base: &str, query: &str, k: u32, output: &str) -> snapfind::Result<()> {
    let client = SearchClient::new(api_base)?;

    let trimmed = query.trim();
    if trimmed.is_empty() {
        println!("Nothing to search for.");
        return Ok(());
    }

    let started = Instant::now();
    let hits = client.search(trimmed, k)?;

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&hits_to_json(&hits))?);
        return Ok(());
    }

    println!(
        "{} {} results for '{}' in {}",
        style("✓").green().bold(),
        hits.len(),
        style(trimmed).yellow(),
        HumanDuration(started.elapsed())
    );

    if hits.is_empty() {
        println!("No results. Try a different keyword.");
        return Ok(());
    }

    for (index, hit) in hits.iter().enumerate() {
        let tile = TileInfo::from_hit(hit, client.base_url());
        println!(
            "{:>3}. {} {}",
            index + 1,
            style(format!("{:>3}%", tile.similarity)).cyan(),
            style(&tile.name).bold()
        );
        println!("     {}", tile.label);
        if !tile.image_src.is_empty() {
            println!("     {}", style(&tile.image_src).dim());
        }
    }

    Ok(())
}

/// Raw hits re-serialized with their derived similarity for scripting.
fn hits_to_json(hits: &[snapfind::SearchHit]) -> serde_json::Value {
    serde_json::Value::Array(
        hits.iter()
            .map(|hit| {
                serde_json::json!({
                    "id": hit.id,
                    "item_name": hit.item_name,
                    "filepath": hit.filepath,
                    "label": hit.label,
                    "image_url": hit.image_url,
                    "distance": hit.distance,
                    "similarity_percent": similarity_percent(hit.distance),
                })
            })
            .collect(),
    )
}

/// Gui command - open the desktop window
fn cmd_gui(api_base: &str) -> snapfind::Result<()> {
    let client = SearchClient::new(api_base)?;
    log::info!("starting GUI against {}", client.base_url());
    snapfind::gui::run(client)
}
