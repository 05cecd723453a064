//! HTTP client for creating Jira tickets from approved assignments

use crate::types::AssignmentResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JiraClient {
    base_url: String,
    token: String,
    project_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreateTicketRequest {
    fields: TicketFields,
}

#[derive(Debug, Serialize)]
struct TicketFields {
    project: KeyRef,
    summary: String,
    description: String,
    issuetype: NameRef,
    priority: NameRef,
    assignee: DisplayNameRef,
}

#[derive(Debug, Serialize)]
struct KeyRef {
    key: String,
}

#[derive(Debug, Serialize)]
struct NameRef {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayNameRef {
    display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TicketCreated {
    pub id: String,
    pub key: String,
}

impl JiraClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        project_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            project_key: project_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build from `JIRA_URL` + `JIRA_TOKEN` (+ optional `JIRA_PROJECT_KEY`,
    /// defaulting to "BUG"); `None` when unconfigured.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("JIRA_URL").ok()?;
        let token = std::env::var("JIRA_TOKEN").ok()?;
        let project_key = std::env::var("JIRA_PROJECT_KEY").unwrap_or_else(|_| "BUG".to_string());
        Some(Self::new(base_url, token, project_key))
    }

    /// File a ticket for an approved assignment.
    pub async fn create_ticket(&self, assignment: &AssignmentResult) -> Result<TicketCreated> {
        let bug = &assignment.bug;
        let request = CreateTicketRequest {
            fields: TicketFields {
                project: KeyRef {
                    key: self.project_key.clone(),
                },
                summary: bug.title.clone(),
                description: bug.description.clone(),
                issuetype: NameRef {
                    name: "Bug".to_string(),
                },
                priority: NameRef {
                    name: bug.severity.clone(),
                },
                assignee: DisplayNameRef {
                    display_name: assignment.developer.clone(),
                },
            },
        };

        let url = format!("{}/rest/api/3/issue", self.base_url);
        debug!("Creating Jira ticket in project {}", self.project_key);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&request)
            .send()
            .await
            .context("Failed to call Jira API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Jira API error {}: {}", status, body);
        }

        let ticket: TicketCreated = response
            .json()
            .await
            .context("Failed to parse Jira ticket response")?;

        debug!("Created Jira ticket {}", ticket.key);

        Ok(ticket)
    }
}
