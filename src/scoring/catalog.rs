//! Static keyword and section-header catalogs used by the analyzers

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Technical,
    Business,
    Data,
    Design,
    Marketing,
    Finance,
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeywordCategory::Technical => "technical",
            KeywordCategory::Business => "business",
            KeywordCategory::Data => "data",
            KeywordCategory::Design => "design",
            KeywordCategory::Marketing => "marketing",
            KeywordCategory::Finance => "finance",
        };
        f.write_str(name)
    }
}

/// Keyword lists per category, in declaration order. The same keyword may
/// appear under more than one category and counts once for each.
pub const KEYWORD_CATALOG: &[(KeywordCategory, &[&str])] = &[
    (
        KeywordCategory::Technical,
        &[
            "JavaScript", "Python", "React", "Node.js", "SQL", "AWS", "Docker", "Git", "Java",
            "C++", "HTML", "CSS", "Angular", "Vue", "TypeScript", "MongoDB", "PostgreSQL",
        ],
    ),
    (
        KeywordCategory::Business,
        &[
            "Management", "Leadership", "Strategy", "Analysis", "Planning", "Communication",
            "Collaboration", "Project Management", "Team Lead",
        ],
    ),
    (
        KeywordCategory::Data,
        &[
            "Analytics", "Machine Learning", "Statistics", "Visualization", "Excel", "Tableau",
            "Python", "R", "Data Mining", "Big Data",
        ],
    ),
    (
        KeywordCategory::Design,
        &[
            "UI/UX", "Figma", "Adobe", "Prototype", "Wireframe", "User Research",
            "Design Systems",
        ],
    ),
    (
        KeywordCategory::Marketing,
        &[
            "Digital Marketing", "SEO", "SEM", "Social Media", "Content", "Campaign",
            "Analytics",
        ],
    ),
    (
        KeywordCategory::Finance,
        &[
            "Financial Analysis", "Budgeting", "Forecasting", "Risk Management", "Accounting",
        ],
    ),
];

pub const STANDARD_SECTION_HEADERS: &[&str] = &[
    "Experience",
    "Education",
    "Skills",
    "Projects",
    "Certifications",
    "Summary",
];

pub const SECTION_HEADER_VARIATIONS: &[&str] = &[
    "Work Experience",
    "Professional Experience",
    "Employment",
    "Academic Background",
    "Technical Skills",
];

pub const ACTION_VERBS: &[&str] = &[
    "managed",
    "led",
    "developed",
    "created",
    "implemented",
    "improved",
    "increased",
    "reduced",
    "achieved",
    "delivered",
];

/// Degree keywords, most specific first in the order they are tested
pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "associate",
    "diploma",
];

/// A catalog keyword together with the category it was declared under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub keyword: &'static str,
    pub category: KeywordCategory,
    pattern_id: usize,
}

/// Flattened keyword catalog with a single case-insensitive automaton over
/// the distinct lowercased keywords.
pub struct KeywordIndex {
    entries: Vec<CatalogEntry>,
    matcher: AhoCorasick,
}

static KEYWORD_INDEX: Lazy<KeywordIndex> = Lazy::new(KeywordIndex::build);

impl KeywordIndex {
    /// Process-wide index, built once on first use
    pub fn global() -> &'static KeywordIndex {
        &KEYWORD_INDEX
    }

    fn build() -> Self {
        let mut patterns: Vec<String> = Vec::new();
        let mut entries = Vec::new();

        for (category, keywords) in KEYWORD_CATALOG {
            for keyword in keywords.iter() {
                let lowered = keyword.to_lowercase();
                let pattern_id = match patterns.iter().position(|p| *p == lowered) {
                    Some(id) => id,
                    None => {
                        patterns.push(lowered);
                        patterns.len() - 1
                    }
                };
                entries.push(CatalogEntry {
                    keyword: *keyword,
                    category: *category,
                    pattern_id,
                });
            }
        }

        // Standard semantics so overlapping search reports every keyword
        // occurring anywhere, including ones nested inside longer keywords.
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .expect("keyword catalog patterns are static and valid");

        Self { entries, matcher }
    }

    /// Every catalog entry in declaration order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn total_keywords(&self) -> usize {
        self.entries.len()
    }

    /// Catalog entries whose keyword occurs as a case-insensitive substring
    /// of `text`, in declaration order (duplicates across categories kept).
    pub fn matching_entries<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        let lowered = text.to_lowercase();
        let found: HashSet<usize> = self
            .matcher
            .find_overlapping_iter(&lowered)
            .map(|m| m.pattern().as_usize())
            .collect();

        self.entries
            .iter()
            .filter(move |entry| found.contains(&entry.pattern_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let index = KeywordIndex::global();
        assert_eq!(index.total_keywords(), 55);
        assert_eq!(
            STANDARD_SECTION_HEADERS.len() + SECTION_HEADER_VARIATIONS.len(),
            11
        );
        assert_eq!(ACTION_VERBS.len(), 10);
    }

    #[test]
    fn test_duplicate_keywords_count_per_category() {
        let index = KeywordIndex::global();
        let matches: Vec<_> = index.matching_entries("Fluent in python").collect();

        let python: Vec<_> = matches.iter().filter(|e| e.keyword == "Python").collect();
        assert_eq!(python.len(), 2);
        assert_eq!(python[0].category, KeywordCategory::Technical);
        assert_eq!(python[1].category, KeywordCategory::Data);
    }

    #[test]
    fn test_nested_keywords_all_reported() {
        let index = KeywordIndex::global();
        let keywords: Vec<&str> = index
            .matching_entries("PROJECT MANAGEMENT")
            .map(|e| e.keyword)
            .collect();

        assert!(keywords.contains(&"Management"));
        assert!(keywords.contains(&"Project Management"));
    }

    #[test]
    fn test_no_matches_in_empty_text() {
        assert_eq!(KeywordIndex::global().matching_entries("").count(), 0);
    }
}
