//! Bug triage assignment engine
//!
//! Assigns incoming bug reports to the best-matching developer from a
//! roster using a deterministic multi-factor heuristic:
//! - Keyword extraction over fixed technical vocabularies
//! - Heuristic 0-1 complexity estimation per bug
//! - Expertise profiles built from skills, contributions and modules
//! - Weighted scoring with workload balancing and experience matching
//! - Ranked candidates with human-readable justifications

pub mod engine;
pub mod features;
pub mod github_client;
pub mod http_source;
pub mod jira_client;
pub mod keywords;
pub mod profiles;
pub mod report;
pub mod scoring;
pub mod server;
pub mod sources;
pub mod types;

pub use engine::TriageEngine;
pub use github_client::GitHubClient;
pub use http_source::HttpExtractSource;
pub use jira_client::JiraClient;
pub use report::{parse_report, ParsedReport, ReportError};
pub use sources::{MockTextSource, TextSource};
pub use types::*;
