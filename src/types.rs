//! Core type definitions for bug triage assignment

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_severity() -> String {
    "Medium".to_string()
}

fn default_component() -> String {
    "General".to_string()
}

/// Incoming bug report, as supplied by a caller or parsed from a report
/// document. Title and description are required; everything else defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBugInput {
    pub title: String,
    pub description: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default = "default_component")]
    pub component: String,
    #[serde(default)]
    pub labels: String,
    #[serde(default)]
    pub stack_trace: String,
}

impl RawBugInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: default_severity(),
            component: default_component(),
            labels: String::new(),
            stack_trace: String::new(),
        }
    }
}

/// Roster entry for a candidate developer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDeveloperInput {
    pub name: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub contributions: String,
}

/// Severity levels the scorer understands. Unknown strings keep their
/// verbatim form on the bug record and fall back to Medium weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Critical" => Some(Self::Critical),
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Complexity contribution of this severity level.
    pub fn weight(self) -> f32 {
        match self {
            Self::Critical => 1.0,
            Self::High => 0.75,
            Self::Medium => 0.5,
            Self::Low => 0.25,
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

/// Features derived from one bug report. Immutable once computed; built
/// fresh per scoring call and discarded afterwards.
#[derive(Debug, Clone)]
pub struct BugFeatures {
    /// Concatenated title, description, labels and stack trace. Used only
    /// for keyword scanning.
    pub text: String,
    pub title: String,
    pub description: String,
    pub severity: String,
    pub component: String,
    pub labels: String,
    pub tech_keywords: BTreeSet<String>,
    pub complexity_score: f32,
    pub text_length: usize,
    pub has_stack_trace: bool,
}

/// Inferred experience bracket for a developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Senior,
    Mid,
}

/// Aggregate resolution metrics for a developer. Until the first recorded
/// resolution, every developer scores with these defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalPerformance {
    pub success_rate: f32,
    pub avg_resolution_time: f32,
}

impl Default for HistoricalPerformance {
    fn default() -> Self {
        Self {
            success_rate: 0.8,
            avg_resolution_time: 0.0,
        }
    }
}

/// Running totals backing [`HistoricalPerformance`]. Owned by the engine,
/// keyed by developer name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceRecord {
    pub total_assignments: u32,
    pub successful_assignments: u32,
    pub total_resolution_time: f32,
}

impl PerformanceRecord {
    pub fn record(&mut self, resolution_time: f32, success: bool) {
        self.total_assignments += 1;
        self.total_resolution_time += resolution_time;
        if success {
            self.successful_assignments += 1;
        }
    }

    pub fn snapshot(&self) -> HistoricalPerformance {
        if self.total_assignments == 0 {
            return HistoricalPerformance::default();
        }
        HistoricalPerformance {
            success_rate: self.successful_assignments as f32 / self.total_assignments as f32,
            avg_resolution_time: self.total_resolution_time / self.total_assignments as f32,
        }
    }
}

/// Structured expertise profile, derived per scoring call. Names are
/// assumed unique within a batch; the caller upholds this.
#[derive(Debug, Clone, Serialize)]
pub struct DeveloperProfile {
    pub name: String,
    /// Skills text, lower-cased.
    pub skills: String,
    pub modules: Vec<String>,
    /// Union of keywords found in skills + contributions and the declared
    /// modules, all lower-cased.
    pub expertise_domains: BTreeSet<String>,
    pub experience_level: ExperienceLevel,
    pub current_workload: u32,
    pub historical_performance: HistoricalPerformance,
}

/// One ranked developer candidate for a bug. Confidence always lies in
/// [0.30, 0.95].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub developer: String,
    pub confidence: f32,
    pub reason: String,
}

/// Outcome of assigning one bug: the winning developer plus up to three
/// runner-up candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub bug: RawBugInput,
    pub developer: String,
    pub confidence: f32,
    pub reason: String,
    #[serde(default)]
    pub alternatives: Vec<ScoredCandidate>,
}

/// Tunable limits for one engine instance. Defaults match the fixed
/// constants of the scoring formula.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Workload at which a developer's availability factor reaches zero.
    /// Loads beyond it drive the factor negative.
    pub max_workload: u32,
    /// Below this many open assignments a developer is reported as having
    /// available capacity.
    pub capacity_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_workload: 10,
            capacity_threshold: 3,
        }
    }
}
