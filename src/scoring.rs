//! Weighted multi-factor scoring of developers against a bug

use crate::types::*;

// Component weights. Additive; a raw score saturates at 1.0 before being
// rescaled into the confidence band.
const EXPERTISE_WEIGHT: f32 = 0.40;
const MODULE_WEIGHT: f32 = 0.30;
const WORKLOAD_WEIGHT: f32 = 0.15;
const SENIOR_URGENT_BONUS: f32 = 0.10;
const MID_SIMPLE_BONUS: f32 = 0.05;
const HISTORY_BONUS: f32 = 0.05;

const HIGH_SUCCESS_THRESHOLD: f32 = 0.85;
const SIMPLE_COMPLEXITY_THRESHOLD: f32 = 0.5;

// Confidence band: 0.30 floor, 0.95 ceiling. The heuristic never reports
// certainty outside it.
const CONFIDENCE_FLOOR: f32 = 0.30;
const CONFIDENCE_SPAN: f32 = 0.65;

const FALLBACK_REASON: &str = "General assignment based on availability";

/// Score every profile against the bug and rank by confidence descending.
///
/// The sort is stable, so equal confidences keep the order the profiles
/// were supplied in. An empty profile slice yields an empty ranking, which
/// callers treat as "no candidates" rather than an error.
pub fn score_candidates(
    features: &BugFeatures,
    profiles: &[DeveloperProfile],
    config: &EngineConfig,
) -> Vec<ScoredCandidate> {
    let bug_keywords = &features.tech_keywords;
    let bug_component = features.component.to_lowercase();
    let bug_severity = Severity::parse(&features.severity);

    let mut candidates: Vec<ScoredCandidate> = profiles
        .iter()
        .map(|profile| {
            let mut score = 0.0f32;
            let mut reasons: Vec<String> = Vec::new();

            // 1. Expertise overlap
            let matched: Vec<&String> = bug_keywords
                .intersection(&profile.expertise_domains)
                .collect();
            if !matched.is_empty() {
                // Denominator guarded: an empty keyword set contributes 0
                let expertise_score = if bug_keywords.is_empty() {
                    0.0
                } else {
                    (matched.len() as f32 / bug_keywords.len() as f32).min(1.0)
                };
                score += expertise_score * EXPERTISE_WEIGHT;

                let shown: Vec<&str> = matched.iter().take(3).map(|s| s.as_str()).collect();
                reasons.push(format!("Expertise: {}", shown.join(", ")));
            }

            // 2. Module match
            if profile
                .modules
                .iter()
                .any(|m| m.to_lowercase() == bug_component)
            {
                score += MODULE_WEIGHT;
                reasons.push(format!("Module expert: {}", features.component));
            }

            // 3. Workload balance. Not clamped below zero: a developer past
            // max_workload actively loses score.
            let load_factor =
                1.0 - profile.current_workload as f32 / config.max_workload as f32;
            score += load_factor * WORKLOAD_WEIGHT;
            if profile.current_workload < config.capacity_threshold {
                reasons.push("Available capacity".to_string());
            }

            // 4. Experience vs severity
            let urgent = bug_severity.map(Severity::is_urgent).unwrap_or(false);
            if urgent && profile.experience_level == ExperienceLevel::Senior {
                score += SENIOR_URGENT_BONUS;
                reasons.push("Senior dev for critical bug".to_string());
            } else if features.complexity_score < SIMPLE_COMPLEXITY_THRESHOLD
                && profile.experience_level == ExperienceLevel::Mid
            {
                score += MID_SIMPLE_BONUS;
            }

            // 5. Historical performance
            if profile.historical_performance.success_rate > HIGH_SUCCESS_THRESHOLD {
                score += HISTORY_BONUS;
                reasons.push("High success rate".to_string());
            }

            let score = score.min(1.0);
            let confidence = CONFIDENCE_FLOOR + score * CONFIDENCE_SPAN;

            let reason = if reasons.is_empty() {
                FALLBACK_REASON.to_string()
            } else {
                reasons.join("; ")
            };

            ScoredCandidate {
                developer: profile.name.clone(),
                confidence,
                reason,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract_features;
    use crate::profiles::build_profiles;
    use std::collections::HashMap;

    fn dev(name: &str, skills: &str, modules: &[&str]) -> RawDeveloperInput {
        RawDeveloperInput {
            name: name.to_string(),
            skills: skills.to_string(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
            contributions: String::new(),
        }
    }

    fn score_for(
        bug: &RawBugInput,
        roster: &[RawDeveloperInput],
        workloads: &HashMap<String, u32>,
    ) -> Vec<ScoredCandidate> {
        let features = extract_features(bug);
        let profiles = build_profiles(roster, workloads, &HashMap::new());
        score_candidates(&features, &profiles, &EngineConfig::default())
    }

    #[test]
    fn test_empty_profiles_yield_empty_ranking() {
        let bug = RawBugInput::new("t", "d");
        let ranked = score_for(&bug, &[], &HashMap::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_module_expert_outranks_generalist() {
        let mut bug = RawBugInput::new("Payment timeout", "checkout hangs");
        bug.component = "Payments".to_string();

        let roster = [
            dev("Generalist", "", &[]),
            dev("Specialist", "", &["Payments"]),
        ];
        let ranked = score_for(&bug, &roster, &HashMap::new());

        assert_eq!(ranked[0].developer, "Specialist");
        assert!(ranked[0].reason.contains("Module expert: Payments"));
    }

    #[test]
    fn test_lower_workload_scores_strictly_higher() {
        let bug = RawBugInput::new("t", "d");
        let roster = [dev("Busy", "", &[]), dev("Idle", "", &[])];
        let mut workloads = HashMap::new();
        workloads.insert("Busy".to_string(), 9);

        let ranked = score_for(&bug, &roster, &workloads);

        assert_eq!(ranked[0].developer, "Idle");
        assert!(ranked[0].confidence > ranked[1].confidence);
    }

    #[test]
    fn test_overloaded_developer_loses_score() {
        let bug = RawBugInput::new("t", "d");
        let roster = [dev("Swamped", "", &[]), dev("AtCap", "", &[])];
        let mut workloads = HashMap::new();
        workloads.insert("Swamped".to_string(), 12);
        workloads.insert("AtCap".to_string(), 10);

        // Past max_workload the factor goes negative, so 12 < 10
        let ranked = score_for(&bug, &roster, &workloads);
        assert_eq!(ranked[0].developer, "AtCap");
        assert!(ranked[0].confidence > ranked[1].confidence);
    }

    #[test]
    fn test_ties_preserve_roster_order() {
        let bug = RawBugInput::new("t", "d");
        let roster = [dev("First", "", &[]), dev("Second", "", &[]), dev("Third", "", &[])];
        let ranked = score_for(&bug, &roster, &HashMap::new());

        assert_eq!(ranked[0].developer, "First");
        assert_eq!(ranked[1].developer, "Second");
        assert_eq!(ranked[2].developer, "Third");
    }

    #[test]
    fn test_fallback_reason_when_nothing_triggers() {
        let bug = RawBugInput::new("t", "d");
        let roster = [dev("Busy", "", &[])];
        let mut workloads = HashMap::new();
        workloads.insert("Busy".to_string(), 5);

        let ranked = score_for(&bug, &roster, &workloads);
        // complexity 0.5 blocks the mid bonus; load 5 blocks the capacity
        // note; no expertise, module, or history triggers remain
        assert_eq!(ranked[0].reason, FALLBACK_REASON);
    }

    #[test]
    fn test_expertise_reason_lists_at_most_three_terms() {
        let mut bug = RawBugInput::new(
            "Crash",
            "python django postgresql redis docker stack misbehaving",
        );
        bug.severity = "Low".to_string();
        let roster = [dev(
            "Poly",
            "python, django, postgresql, redis, docker",
            &[],
        )];

        let ranked = score_for(&bug, &roster, &HashMap::new());
        let reason = &ranked[0].reason;
        let expertise = reason
            .split("; ")
            .find(|part| part.starts_with("Expertise: "))
            .unwrap();
        assert_eq!(expertise.trim_start_matches("Expertise: ").split(", ").count(), 3);
    }

    #[test]
    fn test_senior_bonus_on_urgent_bug() {
        let mut bug = RawBugInput::new("Outage", "everything is down");
        bug.severity = "Critical".to_string();

        let senior = RawDeveloperInput {
            name: "Senior".to_string(),
            skills: String::new(),
            modules: vec![],
            contributions: "shipped several subsystems".to_string(),
        };
        let roster = [dev("Mid", "", &[]), senior];

        let ranked = score_for(&bug, &roster, &HashMap::new());
        assert_eq!(ranked[0].developer, "Senior");
        assert!(ranked[0].reason.contains("Senior dev for critical bug"));
    }

    #[test]
    fn test_high_success_rate_bonus() {
        let bug = RawBugInput::new("t", "d");
        let mut performance = HashMap::new();
        let mut record = PerformanceRecord::default();
        record.record(4.0, true);
        record.record(2.0, true);
        performance.insert("Proven".to_string(), record);

        let roster = [dev("Fresh", "", &[]), dev("Proven", "", &[])];
        let features = extract_features(&bug);
        let profiles = build_profiles(&roster, &HashMap::new(), &performance);
        let ranked = score_candidates(&features, &profiles, &EngineConfig::default());

        assert_eq!(ranked[0].developer, "Proven");
        assert!(ranked[0].reason.contains("High success rate"));
    }
}
