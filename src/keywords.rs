//! Technical keyword extraction over fixed vocabularies

use std::collections::BTreeSet;

const LANGUAGES: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "sql",
    "c++",
    "c#",
    "ruby",
    "php",
    "go",
];

const FRAMEWORKS: &[&str] = &[
    "react", "angular", "vue", "django", "flask", "spring", "node", "express", "fastapi",
];

const DATABASES: &[&str] = &[
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "cassandra",
];

const CLOUD: &[&str] = &["aws", "azure", "gcp", "docker", "kubernetes", "terraform"];

const CONCEPTS: &[&str] = &[
    "api",
    "rest",
    "graphql",
    "auth",
    "authentication",
    "authorization",
    "security",
    "performance",
    "memory",
    "crash",
];

const VOCABULARIES: &[&[&str]] = &[LANGUAGES, FRAMEWORKS, DATABASES, CLOUD, CONCEPTS];

/// Scan text for known technical terms. Case-insensitive plain substring
/// matching: "java" also fires inside "javascript", "auth" inside "oauth".
/// Category membership is discarded; the result is a deduplicated set.
pub fn extract(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let mut found = BTreeSet::new();

    for vocabulary in VOCABULARIES {
        for term in *vocabulary {
            if lower.contains(term) {
                found.insert((*term).to_string());
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let found = extract("The Python service crashes under load; check the Redis cache");
        assert!(found.contains("python"));
        assert!(found.contains("redis"));
        assert!(found.contains("crash"));
        assert!(!found.contains("mysql"));
    }

    #[test]
    fn test_extract_case_insensitive() {
        let text = "Docker container OOM in the AUTH service";
        assert_eq!(extract(text), extract(&text.to_uppercase()));
        assert_eq!(extract(text), extract(&text.to_lowercase()));
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extract_substring_semantics() {
        // "javascript" fires both terms; matching is plain substring
        let found = extract("legacy JavaScript widget");
        assert!(found.contains("javascript"));
        assert!(found.contains("java"));
    }

    #[test]
    fn test_extract_deduplicates() {
        let found = extract("redis redis redis");
        assert_eq!(found.len(), 1);
    }
}
