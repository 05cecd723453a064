//! TriageEngine: orchestrates feature extraction, profiling and scoring,
//! and owns the per-instance workload and performance state.

use crate::features::extract_features;
use crate::profiles::build_profiles;
use crate::scoring::score_candidates;
use crate::types::*;
use std::collections::HashMap;
use tracing::{debug, info};

const UNASSIGNED: &str = "Unassigned";
const NO_CANDIDATE_REASON: &str = "No suitable developer found";
const MAX_ALTERNATIVES: usize = 3;

/// Assignment coordinator for one team.
///
/// State is process-lifetime and engine-local: workloads grow by one per
/// winning assignment and are never decremented, performance records
/// accumulate through [`TriageEngine::update_performance`], and the
/// expertise cache holds the most recently built profile per developer for
/// external inspection only. Nothing is persisted across restarts.
///
/// Not internally synchronized; a shared instance must be serialized by
/// the caller (one mutex, or confinement to a single worker).
pub struct TriageEngine {
    config: EngineConfig,
    workloads: HashMap<String, u32>,
    performance: HashMap<String, PerformanceRecord>,
    expertise_cache: HashMap<String, DeveloperProfile>,
    assignments_total: u64,
}

impl TriageEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            workloads: HashMap::new(),
            performance: HashMap::new(),
            expertise_cache: HashMap::new(),
            assignments_total: 0,
        }
    }

    /// Assign one bug to the best-matching developer from the roster.
    ///
    /// An empty roster yields the "Unassigned" fallback result rather than
    /// an error. A winning assignment increments that developer's workload,
    /// visible to every later call on this engine.
    pub fn assign(
        &mut self,
        bug: &RawBugInput,
        developers: &[RawDeveloperInput],
    ) -> AssignmentResult {
        let features = extract_features(bug);
        let profiles = self.build_profiles(developers);
        let mut ranked = score_candidates(&features, &profiles, &self.config);

        if ranked.is_empty() {
            debug!("No candidates for bug '{}'", preview(&features.title));
            return AssignmentResult {
                bug: bug.clone(),
                developer: UNASSIGNED.to_string(),
                confidence: 0.30,
                reason: NO_CANDIDATE_REASON.to_string(),
                alternatives: Vec::new(),
            };
        }

        let top: Vec<String> = ranked
            .iter()
            .take(3)
            .map(|c| format!("{} ({:.0}%)", c.developer, c.confidence * 100.0))
            .collect();

        let winner = ranked.remove(0);
        *self.workloads.entry(winner.developer.clone()).or_insert(0) += 1;
        self.assignments_total += 1;
        ranked.truncate(MAX_ALTERNATIVES);

        info!(
            "Bug '{}' -> {} ({:.0}%)",
            preview(&features.title),
            winner.developer,
            winner.confidence * 100.0
        );
        info!("Reason: {}", winner.reason);
        info!("Top candidates: {}", top.join(", "));

        AssignmentResult {
            bug: bug.clone(),
            developer: winner.developer,
            confidence: winner.confidence,
            reason: winner.reason,
            alternatives: ranked,
        }
    }

    /// Assign a batch of bugs in input order. Sequential and
    /// workload-aware: an assignment made for an earlier bug is visible
    /// when scoring the later ones.
    pub fn assign_batch(
        &mut self,
        bugs: &[RawBugInput],
        developers: &[RawDeveloperInput],
    ) -> Vec<AssignmentResult> {
        bugs.iter().map(|bug| self.assign(bug, developers)).collect()
    }

    /// Record a resolved assignment into the developer's performance
    /// history and return the updated snapshot.
    pub fn update_performance(
        &mut self,
        developer: &str,
        resolution_time: f32,
        success: bool,
    ) -> HistoricalPerformance {
        let record = self.performance.entry(developer.to_string()).or_default();
        record.record(resolution_time, success);
        record.snapshot()
    }

    fn build_profiles(&mut self, developers: &[RawDeveloperInput]) -> Vec<DeveloperProfile> {
        let profiles = build_profiles(developers, &self.workloads, &self.performance);
        // Introspection-only cache; scoring always works from the fresh
        // profiles, never from here
        for profile in &profiles {
            self.expertise_cache
                .insert(profile.name.clone(), profile.clone());
        }
        profiles
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current open-assignment count per developer.
    pub fn workloads(&self) -> &HashMap<String, u32> {
        &self.workloads
    }

    /// Most recently built profile per developer name.
    pub fn cached_profiles(&self) -> &HashMap<String, DeveloperProfile> {
        &self.expertise_cache
    }

    pub fn assignments_total(&self) -> u64 {
        self.assignments_total
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn preview(title: &str) -> String {
    title.chars().take(50).collect()
}
