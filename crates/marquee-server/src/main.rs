//! Marquee — movie discovery API server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use marquee_generate::GeminiConfig;
use marquee_ingest::{clean_markdown, extract_analysis, parse_catalog};
use marquee_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("MARQUEE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_catalog(path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let entries = parse_catalog(&content);
    println!("{}", serde_json::to_string_pretty(&entries)?);
    eprintln!("{} entries", entries.len());
    Ok(())
}

fn print_analysis(path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    let analysis = extract_analysis(&clean_markdown(&content));
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn print_help() {
    println!("Marquee — movie discovery API server");
    println!();
    println!("Usage: marquee [command]");
    println!();
    println!("Commands:");
    println!("  (none)              Start the server");
    println!("  catalog <file>      Parse a catalog file and print its entries as JSON");
    println!("  analyze <file>      Extract the structured analysis of a saved document");
    println!("  help                Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "catalog" | "analyze" => {
                let Some(file) = args.get(2) else {
                    eprintln!("Usage: marquee {} <file>", args[1]);
                    std::process::exit(1);
                };
                let file = PathBuf::from(file);
                return if args[1] == "catalog" {
                    print_catalog(&file)
                } else {
                    print_analysis(&file)
                };
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'marquee help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = marquee_core::MarqueeConfig::from_env(&data_dir)?;
    let port = config.port;
    let gemini_config = GeminiConfig::load(&config.data_paths.gemini_config_file);

    let state = Arc::new(AppState::new(config, gemini_config));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Marquee server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
