//! Plain-text report parsing: bugs and a developer roster from an
//! extracted document

use crate::types::{RawBugInput, RawDeveloperInput};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Module names recognized when inferring components and declared modules.
const KNOWN_MODULES: &[&str] = &["Auth", "Dashboard", "Payments", "Reports", "Notifications"];

/// Window scanned after a `Name:` line for that developer's fields.
const DEVELOPER_WINDOW: usize = 300;

/// Fallback span when a bug section has no terminator.
const BUG_FALLBACK_SPAN: usize = 500;

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("report contains no text")]
    EmptyDocument,
    #[error("no bug entries found in report")]
    NoBugs,
}

/// Everything parsed out of one report document.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub bugs: Vec<RawBugInput>,
    pub developers: Vec<RawDeveloperInput>,
}

/// Parse bug entries and a developer roster out of raw report text.
///
/// Bugs are located by `Bug #N: <title>` headers; each section runs to the
/// next header, the `Developers` section, or a fixed span. Developers are
/// located by `Name:` lines. Field labels are matched case-insensitively
/// and are line-scoped. Missing bug fields take the documented defaults.
pub fn parse_report(text: &str) -> Result<ParsedReport, ReportError> {
    if text.trim().is_empty() {
        return Err(ReportError::EmptyDocument);
    }

    let bugs = parse_bugs(text);
    if bugs.is_empty() {
        return Err(ReportError::NoBugs);
    }

    let developers = parse_developers(text);
    debug!(
        "Parsed report: {} bugs, {} developers",
        bugs.len(),
        developers.len()
    );

    Ok(ParsedReport { bugs, developers })
}

fn parse_bugs(text: &str) -> Vec<RawBugInput> {
    let header = Regex::new(r"(?i)Bug\s*#\s*\d+:\s*([^\n]+)").unwrap();

    let matches: Vec<(usize, String)> = header
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?.as_str().trim().to_string();
            Some((whole.start(), title))
        })
        .collect();

    let section_header = Regex::new(r"(?i)developers").unwrap();
    let section_starts: Vec<usize> = section_header.find_iter(text).map(|m| m.start()).collect();

    let mut bugs = Vec::with_capacity(matches.len());
    for (idx, (start, title)) in matches.iter().enumerate() {
        let end = match matches.get(idx + 1) {
            Some((next_start, _)) => *next_start,
            None => section_starts
                .iter()
                .copied()
                .find(|&at| at > *start)
                .unwrap_or_else(|| floor_char_boundary(text, start + BUG_FALLBACK_SPAN)),
        };
        let section = &text[*start..end];

        let severity = extract_field(section, "Severity").unwrap_or_else(|| "Medium".to_string());
        let bug = RawBugInput {
            title: title.clone(),
            description: extract_field(section, "Description").unwrap_or_default(),
            severity,
            component: determine_component(&format!("{} {}", title, section)),
            labels: extract_field(section, "Labels").unwrap_or_default(),
            stack_trace: extract_field(section, "Stack Trace").unwrap_or_default(),
        };
        debug!("Parsed bug '{}'", bug.title);
        bugs.push(bug);
    }

    bugs
}

fn parse_developers(text: &str) -> Vec<RawDeveloperInput> {
    let name_line = Regex::new(r"(?i)Name:\s*([^\n]+)").unwrap();

    let mut developers = Vec::new();
    for caps in name_line.captures_iter(text) {
        let (whole, name) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(name)) => (whole, name.as_str().trim().to_string()),
            _ => continue,
        };
        if name.is_empty() {
            continue;
        }

        let window_end = floor_char_boundary(text, whole.start() + DEVELOPER_WINDOW);
        let window = &text[whole.start()..window_end];

        developers.push(RawDeveloperInput {
            name,
            skills: extract_field(window, "Skills").unwrap_or_default(),
            modules: extract_modules(window),
            contributions: extract_field(window, "Contributions").unwrap_or_default(),
        });
    }

    developers
}

/// First `<field>: value` occurrence in the section, value running to end
/// of line.
fn extract_field(section: &str, field: &str) -> Option<String> {
    let pattern = format!(r"(?i){}:\s*([^\n]+)", regex::escape(field));
    let re = Regex::new(&pattern).unwrap();
    re.captures(section)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Infer the owning component from free text. First known module mentioned
/// wins; "General" when none is.
fn determine_component(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("auth") {
        "Auth".to_string()
    } else if lower.contains("dashboard") {
        "Dashboard".to_string()
    } else if lower.contains("payment") {
        "Payments".to_string()
    } else if lower.contains("report") {
        "Reports".to_string()
    } else if lower.contains("notification") {
        "Notifications".to_string()
    } else {
        "General".to_string()
    }
}

fn extract_modules(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    KNOWN_MODULES
        .iter()
        .filter(|module| lower.contains(&module.to_lowercase()))
        .map(|module| module.to_string())
        .collect()
}

/// Largest char boundary at or below `at`.
fn floor_char_boundary(text: &str, at: usize) -> usize {
    if at >= text.len() {
        return text.len();
    }
    let mut at = at;
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Bug Report Sheet

Bug #1: Login broken
Description: users cannot authenticate via OAuth
Severity: Critical
Labels: Security
Stack Trace: NullPointerException at AuthFilter.java:42

Bug #2: Dashboard slow to render
Description: charts take over ten seconds to appear
Severity: Medium
Labels: Performance

Developers

Name: Frank Thomas
Email: frank@example.com
Skills: Cybersecurity, authentication
Contributions: Hardened the Auth module significantly

Name: Charlie Brown
Email: charlie@example.com
Skills: JavaScript, React
Contributions: Dashboard charts
";

    #[test]
    fn test_parse_bugs_and_developers() {
        let report = parse_report(SAMPLE).unwrap();

        assert_eq!(report.bugs.len(), 2);
        assert_eq!(report.developers.len(), 2);

        let login = &report.bugs[0];
        assert_eq!(login.title, "Login broken");
        assert_eq!(login.severity, "Critical");
        assert_eq!(login.labels, "Security");
        assert_eq!(login.component, "Auth");
        assert!(login.stack_trace.contains("NullPointerException"));

        let dashboard = &report.bugs[1];
        assert_eq!(dashboard.component, "Dashboard");
        assert_eq!(dashboard.stack_trace, "");
    }

    #[test]
    fn test_missing_severity_defaults_to_medium() {
        let text = "Bug #1: Something odd\nDescription: it flickers\n";
        let report = parse_report(text).unwrap();
        assert_eq!(report.bugs[0].severity, "Medium");
        assert_eq!(report.bugs[0].component, "General");
    }

    #[test]
    fn test_developer_modules_inferred() {
        let report = parse_report(SAMPLE).unwrap();

        let frank = &report.developers[0];
        assert_eq!(frank.name, "Frank Thomas");
        // Adjacent entries share the scan window, so Frank may also pick
        // up Charlie's Dashboard mention; Auth must be there
        assert!(frank.modules.contains(&"Auth".to_string()));
        assert!(frank.skills.contains("Cybersecurity"));
        assert!(frank.contributions.contains("significantly"));

        let charlie = &report.developers[1];
        assert_eq!(charlie.modules, vec!["Dashboard".to_string()]);
    }

    #[test]
    fn test_empty_document_rejected() {
        assert_eq!(parse_report("   \n  ").unwrap_err(), ReportError::EmptyDocument);
    }

    #[test]
    fn test_no_bug_headers_rejected() {
        assert_eq!(
            parse_report("just some prose with no entries").unwrap_err(),
            ReportError::NoBugs
        );
    }

    #[test]
    fn test_field_labels_case_insensitive() {
        let text = "bug #3: Mixed case\nDESCRIPTION: still parsed\nseverity: Low\n";
        let report = parse_report(text).unwrap();
        assert_eq!(report.bugs[0].description, "still parsed");
        assert_eq!(report.bugs[0].severity, "Low");
    }
}
