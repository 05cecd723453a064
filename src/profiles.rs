//! Developer profile construction

use crate::keywords;
use crate::types::{
    DeveloperProfile, ExperienceLevel, PerformanceRecord, RawDeveloperInput,
};
use std::collections::HashMap;

/// Build expertise profiles for a roster of developers.
///
/// Workload and performance state come from the engine's maps (defaults: 0
/// open assignments, 0.8 success rate). The returned vector preserves
/// roster order; a duplicated name is overwritten in place, so the later
/// record wins while keeping the earlier position.
pub fn build_profiles(
    developers: &[RawDeveloperInput],
    workloads: &HashMap<String, u32>,
    performance: &HashMap<String, PerformanceRecord>,
) -> Vec<DeveloperProfile> {
    let mut profiles: Vec<DeveloperProfile> = Vec::with_capacity(developers.len());

    for dev in developers {
        let skills = dev.skills.to_lowercase();
        let contributions = dev.contributions.to_lowercase();

        let mut expertise_domains = keywords::extract(&format!("{} {}", skills, contributions));
        for module in &dev.modules {
            expertise_domains.insert(module.to_lowercase());
        }

        let profile = DeveloperProfile {
            name: dev.name.clone(),
            skills,
            modules: dev.modules.clone(),
            expertise_domains,
            experience_level: infer_experience_level(&dev.contributions),
            current_workload: workloads.get(&dev.name).copied().unwrap_or(0),
            historical_performance: performance
                .get(&dev.name)
                .map(PerformanceRecord::snapshot)
                .unwrap_or_default(),
        };

        match profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(slot) => *slot = profile,
            None => profiles.push(profile),
        }
    }

    profiles
}

/// Textual heuristic for seniority: a contribution note containing
/// "several" or "significantly" marks the developer as senior, anything
/// else as mid-level. Known-crude; kept behind this function so the
/// trigger phrases can change without touching the scoring formula.
pub fn infer_experience_level(contributions: &str) -> ExperienceLevel {
    let lower = contributions.to_lowercase();
    if lower.contains("several") || lower.contains("significantly") {
        ExperienceLevel::Senior
    } else {
        ExperienceLevel::Mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(name: &str, skills: &str, modules: &[&str], contributions: &str) -> RawDeveloperInput {
        RawDeveloperInput {
            name: name.to_string(),
            skills: skills.to_string(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
            contributions: contributions.to_string(),
        }
    }

    #[test]
    fn test_expertise_unions_keywords_and_modules() {
        let roster = [dev(
            "Alice",
            "Python, Django, REST APIs",
            &["Reports"],
            "built the reporting pipeline",
        )];
        let profiles = build_profiles(&roster, &HashMap::new(), &HashMap::new());

        let domains = &profiles[0].expertise_domains;
        assert!(domains.contains("python"));
        assert!(domains.contains("django"));
        assert!(domains.contains("rest"));
        assert!(domains.contains("reports"));
    }

    #[test]
    fn test_experience_trigger_phrases() {
        assert_eq!(
            infer_experience_level("Led several migrations"),
            ExperienceLevel::Senior
        );
        assert_eq!(
            infer_experience_level("Contributed SIGNIFICANTLY to auth"),
            ExperienceLevel::Senior
        );
        assert_eq!(
            infer_experience_level("fixed a few bugs"),
            ExperienceLevel::Mid
        );
        assert_eq!(infer_experience_level(""), ExperienceLevel::Mid);
    }

    #[test]
    fn test_defaults_without_engine_state() {
        let roster = [dev("Bob", "", &[], "")];
        let profiles = build_profiles(&roster, &HashMap::new(), &HashMap::new());

        assert_eq!(profiles[0].current_workload, 0);
        assert_eq!(profiles[0].historical_performance.success_rate, 0.8);
        assert_eq!(profiles[0].historical_performance.avg_resolution_time, 0.0);
    }

    #[test]
    fn test_duplicate_name_last_write_wins_in_place() {
        let roster = [
            dev("Bob", "java", &[], ""),
            dev("Carol", "python", &[], ""),
            dev("Bob", "ruby", &[], ""),
        ];
        let profiles = build_profiles(&roster, &HashMap::new(), &HashMap::new());

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "Bob");
        assert!(profiles[0].expertise_domains.contains("ruby"));
        assert!(!profiles[0].expertise_domains.contains("java"));
        assert_eq!(profiles[1].name, "Carol");
    }

    #[test]
    fn test_workload_read_from_map() {
        let mut workloads = HashMap::new();
        workloads.insert("Bob".to_string(), 7);
        let roster = [dev("Bob", "", &[], "")];
        let profiles = build_profiles(&roster, &workloads, &HashMap::new());
        assert_eq!(profiles[0].current_workload, 7);
    }
}
