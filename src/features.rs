//! Bug feature extraction and complexity estimation

use crate::keywords;
use crate::types::{BugFeatures, RawBugInput, Severity};

/// Derive the scoring features for one bug report. Pure; the returned
/// record is discarded after the scoring call.
pub fn extract_features(bug: &RawBugInput) -> BugFeatures {
    let text = format!(
        "{} {} {} {}",
        bug.title, bug.description, bug.labels, bug.stack_trace
    );

    let tech_keywords = keywords::extract(&text);
    let complexity_score = estimate_complexity(bug);

    BugFeatures {
        text_length: text.len(),
        title: bug.title.clone(),
        description: bug.description.clone(),
        severity: bug.severity.clone(),
        component: bug.component.clone(),
        labels: bug.labels.clone(),
        tech_keywords,
        complexity_score,
        has_stack_trace: !bug.stack_trace.is_empty(),
        text,
    }
}

/// Heuristic 0-1 estimate of how involved a bug is to resolve.
///
/// Additive over four signals, then clamped:
/// severity weight (unknown severities count as Medium), description
/// length (>500 chars +0.3, >200 +0.15), presence of a stack trace
/// (+0.2), and technical keyword density over title + description
/// (min(count * 0.1, 0.3)).
pub fn estimate_complexity(bug: &RawBugInput) -> f32 {
    let mut complexity = Severity::parse(&bug.severity)
        .map(Severity::weight)
        .unwrap_or(0.5);

    let desc_length = bug.description.len();
    if desc_length > 500 {
        complexity += 0.3;
    } else if desc_length > 200 {
        complexity += 0.15;
    }

    if !bug.stack_trace.is_empty() {
        complexity += 0.2;
    }

    // Keyword density over title + description only, not labels or trace
    let text = format!("{} {}", bug.title, bug.description);
    let keyword_count = keywords::extract(&text).len();
    complexity += (keyword_count as f32 * 0.1).min(0.3);

    complexity.min(1.0)
}
