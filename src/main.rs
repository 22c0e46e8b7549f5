use clap::Parser;
use colored::*;
use github_prs_server::cli::Cli;
use github_prs_server::error::Result;
use github_prs_server::server::{build_state, start_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Initialize tracing with DEBUG level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = Cli::parse().into_config();

    println!("{}", "GitHub PRs Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let state = build_state(&config)?;

    println!("✅ Loaded templates from {}", config.templates_glob);
    println!("🔎 Search query: {}", state.github.search_url());
    println!("📡 Serving on http://{}/elements", config.bind_addr());
    println!("\nPress Ctrl+C to stop the server\n");

    start_server(&config, state).await?;

    println!("✅ Server stopped");

    Ok(())
}
