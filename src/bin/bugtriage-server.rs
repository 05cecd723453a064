//! Bug triage HTTP server binary

use bugtriage::server::{run_server, AppState};
use bugtriage::{EngineConfig, GitHubClient, HttpExtractSource, JiraClient, TriageEngine};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    println!("Bug Triage Assignment Service");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = engine_config_from_env();
    println!(
        "✓ Engine limits: max workload {}, capacity threshold {}",
        config.max_workload, config.capacity_threshold
    );

    let mut state = AppState::new(TriageEngine::with_config(config));

    // Optional text-extraction service for /ingest_report documents
    if let Ok(url) = std::env::var("EXTRACTOR_SERVICE_URL") {
        let source = HttpExtractSource::new(url.clone());
        match source.health_check().await {
            Ok(true) => println!("✓ Extraction service is healthy: {}", url),
            Ok(false) => eprintln!("⚠️  Extraction service returned unhealthy status: {}", url),
            Err(e) => {
                eprintln!("⚠️  Failed to reach extraction service {}: {}", url, e);
                eprintln!("   /ingest_report will only accept inline text until it is up");
            }
        }
        state.text_source = Some(Box::new(source));
    } else {
        println!("✓ No extraction service configured (inline report text only)");
    }

    // Optional ticket integrations, used on assignment approval
    state.github = GitHubClient::from_env();
    if state.github.is_some() {
        println!("✓ GitHub integration enabled");
    }
    state.jira = JiraClient::from_env();
    if state.jira.is_some() {
        println!("✓ Jira integration enabled");
    }
    if state.github.is_none() && state.jira.is_none() {
        println!("✓ No ticket integrations configured (approvals are logged only)");
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8082);

    println!("✓ Triage engine initialized");
    println!("✓ Starting HTTP server on port {}...", port);
    println!();

    run_server(Arc::new(state), port).await?;

    Ok(())
}

fn engine_config_from_env() -> EngineConfig {
    let mut config = EngineConfig::default();
    if let Some(max) = env_u32("BUGTRIAGE_MAX_WORKLOAD") {
        config.max_workload = max;
    }
    if let Some(threshold) = env_u32("BUGTRIAGE_CAPACITY_THRESHOLD") {
        config.capacity_threshold = threshold;
    }
    config
}

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
