//! HTTP server for bug triage assignment

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::engine::TriageEngine;
use crate::github_client::GitHubClient;
use crate::jira_client::JiraClient;
use crate::report;
use crate::sources::TextSource;
use crate::types::{
    AssignmentResult, DeveloperProfile, HistoricalPerformance, RawBugInput, RawDeveloperInput,
};

/// Shared service state. The engine is behind a mutex: scoring mutates
/// workload state and must stay single-writer.
pub struct AppState {
    pub engine: Mutex<TriageEngine>,
    pub text_source: Option<Box<dyn TextSource>>,
    pub github: Option<GitHubClient>,
    pub jira: Option<JiraClient>,
}

impl AppState {
    pub fn new(engine: TriageEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
            text_source: None,
            github: None,
            jira: None,
        }
    }
}

pub type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub bug: RawBugInput,
    pub developers: Vec<RawDeveloperInput>,
}

#[derive(Debug, Deserialize)]
pub struct AssignBatchRequest {
    pub bugs: Vec<RawBugInput>,
    pub developers: Vec<RawDeveloperInput>,
}

#[derive(Debug, Serialize)]
pub struct AssignBatchResponse {
    pub processed: usize,
    pub results: Vec<AssignmentResult>,
}

/// Ingest request: either inline report text or a document reference
/// resolved through the configured text source.
#[derive(Debug, Deserialize)]
pub struct IngestReportRequest {
    pub document: Option<String>,
    pub text: Option<String>,
    /// Overrides the roster parsed from the report when present.
    pub developers: Option<Vec<RawDeveloperInput>>,
}

#[derive(Debug, Deserialize)]
pub struct PerformanceUpdateRequest {
    pub developer: String,
    pub resolution_time: f32,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct PerformanceUpdateResponse {
    pub developer: String,
    pub performance: HistoricalPerformance,
}

#[derive(Debug, Serialize)]
pub struct TicketOutcome {
    pub integration: String,
    pub created: bool,
    pub reference: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub developer: String,
    pub tickets: Vec<TicketOutcome>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total_assignments: u64,
    pub workload_distribution: HashMap<String, u32>,
    pub known_developers: Vec<DeveloperProfile>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: &str, details: Option<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            details,
        }),
    )
}

/// Required-field validation; everything else has defaults and is
/// accepted verbatim.
fn validate_bug(bug: &RawBugInput) -> Result<(), ApiError> {
    if bug.title.trim().is_empty() {
        return Err(bad_request("Title cannot be empty", None));
    }
    if bug.description.trim().is_empty() {
        return Err(bad_request("Description cannot be empty", None));
    }
    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "bugtriage".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn assign_handler(
    State(state): State<SharedState>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<AssignmentResult>, ApiError> {
    validate_bug(&req.bug)?;

    info!(
        "Received assign request: bug='{}', roster={}",
        req.bug.title,
        req.developers.len()
    );

    let mut engine = state.engine.lock().await;
    let result = engine.assign(&req.bug, &req.developers);
    Ok(Json(result))
}

async fn assign_batch_handler(
    State(state): State<SharedState>,
    Json(req): Json<AssignBatchRequest>,
) -> Result<Json<AssignBatchResponse>, ApiError> {
    for (idx, bug) in req.bugs.iter().enumerate() {
        validate_bug(bug).map_err(|_| {
            bad_request(
                "Invalid bug in batch",
                Some(format!(
                    "bug at index {} has an empty title or description",
                    idx
                )),
            )
        })?;
    }

    info!(
        "Received batch assign request: {} bugs, roster={}",
        req.bugs.len(),
        req.developers.len()
    );

    let mut engine = state.engine.lock().await;
    let results = engine.assign_batch(&req.bugs, &req.developers);
    Ok(Json(AssignBatchResponse {
        processed: results.len(),
        results,
    }))
}

async fn ingest_report_handler(
    State(state): State<SharedState>,
    Json(req): Json<IngestReportRequest>,
) -> Result<Json<AssignBatchResponse>, ApiError> {
    let text = if let Some(text) = req.text {
        text
    } else if let Some(ref document) = req.document {
        let source = state.text_source.as_ref().ok_or_else(|| {
            bad_request(
                "No text source configured",
                Some("supply inline report text instead".to_string()),
            )
        })?;
        source.fetch_text(document).await.map_err(|e| {
            error!("Text extraction failed for '{}': {:?}", document, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Text extraction failed".to_string(),
                    details: Some(e.to_string()),
                }),
            )
        })?
    } else {
        return Err(bad_request(
            "Request must carry report text or a document reference",
            None,
        ));
    };

    let parsed = report::parse_report(&text)
        .map_err(|e| bad_request("Could not parse report", Some(e.to_string())))?;

    let developers = match req.developers {
        Some(roster) if !roster.is_empty() => roster,
        _ => parsed.developers,
    };

    info!(
        "Ingesting report: {} bugs, roster={}",
        parsed.bugs.len(),
        developers.len()
    );

    let mut engine = state.engine.lock().await;
    let results = engine.assign_batch(&parsed.bugs, &developers);
    Ok(Json(AssignBatchResponse {
        processed: results.len(),
        results,
    }))
}

/// Human approval of an assignment: forward it to every configured ticket
/// integration. Integration failures are reported per ticket, never as a
/// request failure.
async fn approve_handler(
    State(state): State<SharedState>,
    Json(assignment): Json<AssignmentResult>,
) -> Result<Json<ApproveResponse>, ApiError> {
    validate_bug(&assignment.bug)?;

    let assignment_ref = &assignment;
    let mut tasks: Vec<futures::future::BoxFuture<'_, TicketOutcome>> = Vec::new();

    if let Some(ref github) = state.github {
        tasks.push(Box::pin(async move {
            match github.create_issue(assignment_ref).await {
                Ok(issue) => TicketOutcome {
                    integration: "github".to_string(),
                    created: true,
                    reference: Some(issue.html_url),
                    error: None,
                },
                Err(e) => {
                    error!("GitHub issue creation failed: {:?}", e);
                    TicketOutcome {
                        integration: "github".to_string(),
                        created: false,
                        reference: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        }));
    }

    if let Some(ref jira) = state.jira {
        tasks.push(Box::pin(async move {
            match jira.create_ticket(assignment_ref).await {
                Ok(ticket) => TicketOutcome {
                    integration: "jira".to_string(),
                    created: true,
                    reference: Some(ticket.key),
                    error: None,
                },
                Err(e) => {
                    error!("Jira ticket creation failed: {:?}", e);
                    TicketOutcome {
                        integration: "jira".to_string(),
                        created: false,
                        reference: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        }));
    }

    if tasks.is_empty() {
        warn!("Assignment approved but no ticket integrations are configured");
    }

    let tickets = futures::future::join_all(tasks).await;

    Ok(Json(ApproveResponse {
        developer: assignment.developer.clone(),
        tickets,
    }))
}

async fn performance_handler(
    State(state): State<SharedState>,
    Json(req): Json<PerformanceUpdateRequest>,
) -> Result<Json<PerformanceUpdateResponse>, ApiError> {
    if req.developer.trim().is_empty() {
        return Err(bad_request("Developer name cannot be empty", None));
    }

    let mut engine = state.engine.lock().await;
    let performance = engine.update_performance(&req.developer, req.resolution_time, req.success);

    Ok(Json(PerformanceUpdateResponse {
        developer: req.developer,
        performance,
    }))
}

async fn analytics_handler(State(state): State<SharedState>) -> Json<AnalyticsResponse> {
    let engine = state.engine.lock().await;

    let mut known_developers: Vec<DeveloperProfile> =
        engine.cached_profiles().values().cloned().collect();
    known_developers.sort_by(|a, b| a.name.cmp(&b.name));

    Json(AnalyticsResponse {
        total_assignments: engine.assignments_total(),
        workload_distribution: engine.workloads().clone(),
        known_developers,
    })
}

/// Create and configure the HTTP server
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/assign", post(assign_handler))
        .route("/assign_batch", post(assign_batch_handler))
        .route("/ingest_report", post(ingest_report_handler))
        .route("/approve", post(approve_handler))
        .route("/performance", post(performance_handler))
        .route("/analytics", get(analytics_handler))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(state: SharedState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting bugtriage server on {}", addr);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
