//! HTTP client for creating GitHub issues from approved assignments

use crate::types::AssignmentResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GitHubClient {
    token: String,
    repo: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest {
    title: String,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct IssueCreated {
    pub number: u64,
    pub html_url: String,
}

impl GitHubClient {
    /// `repo` is the `owner/name` slug the issue lands in.
    pub fn new(token: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            repo: repo.into(),
            base_url: GITHUB_API.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build from `GITHUB_TOKEN` + `GITHUB_REPO`; `None` when either is
    /// missing (integration unconfigured).
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok()?;
        let repo = std::env::var("GITHUB_REPO").ok()?;
        Some(Self::new(token, repo))
    }

    /// Open an issue for an approved assignment.
    pub async fn create_issue(&self, assignment: &AssignmentResult) -> Result<IssueCreated> {
        let bug = &assignment.bug;
        let request = CreateIssueRequest {
            title: bug.title.clone(),
            body: format!(
                "**Description:**\n{}\n\n**Severity:** {}\n**Component:** {}\n**Assigned to:** {}",
                bug.description, bug.severity, bug.component, assignment.developer
            ),
            assignee: Some(assignment.developer.to_lowercase().replace(' ', "")),
            labels: vec!["bug".to_string(), bug.severity.to_lowercase()],
        };

        let url = format!("{}/repos/{}/issues", self.base_url, self.repo);
        debug!("Creating GitHub issue in {}", self.repo);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "bugtriage")
            .json(&request)
            .send()
            .await
            .context("Failed to call GitHub API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API error {}: {}", status, body);
        }

        let issue: IssueCreated = response
            .json()
            .await
            .context("Failed to parse GitHub issue response")?;

        debug!("Created GitHub issue #{}", issue.number);

        Ok(issue)
    }
}
