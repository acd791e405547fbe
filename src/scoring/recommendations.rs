//! Threshold rules turning the breakdown into suggestions and strengths

use crate::scoring::analyzer::Breakdown;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub suggestion: String,
}

struct RecommendationRule {
    fires: fn(&Breakdown) -> bool,
    priority: Priority,
    category: &'static str,
    suggestion: &'static str,
}

const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        fires: |b| b.keyword_matching.score < 15,
        priority: Priority::High,
        category: "Keywords",
        suggestion: "Add more industry-relevant keywords and technical skills to match job descriptions",
    },
    RecommendationRule {
        fires: |b| b.structure_analysis.score < 12,
        priority: Priority::High,
        category: "Structure",
        suggestion: "Use standard section headers like \"Professional Experience\", \"Education\", and \"Skills\"",
    },
    RecommendationRule {
        fires: |b| b.quantification.score < 6,
        priority: Priority::High,
        category: "Achievements",
        suggestion: "Add quantifiable achievements with specific numbers, percentages, and metrics",
    },
    RecommendationRule {
        fires: |b| b.contact_information.score < 7,
        priority: Priority::Medium,
        category: "Contact Info",
        suggestion: "Ensure complete contact information including professional email and phone number",
    },
    RecommendationRule {
        fires: |b| b.content_quality.score < 12,
        priority: Priority::Medium,
        category: "Content",
        suggestion: "Use more action verbs and improve content depth with detailed descriptions",
    },
];

const STRENGTH_RULES: &[(fn(&Breakdown) -> bool, &str)] = &[
    (
        |b| b.keyword_matching.score >= 18,
        "Strong keyword optimization for ATS systems",
    ),
    (
        |b| b.structure_analysis.score >= 15,
        "Well-organized with standard resume sections",
    ),
    (
        |b| b.quantification.score >= 8,
        "Good use of quantifiable achievements",
    ),
    (
        |b| b.format_compatibility.score >= 12,
        "ATS-friendly file format and structure",
    ),
];

/// Every rule whose threshold is missed, highest priority first. Rules of
/// equal priority keep their evaluation order.
pub fn generate_recommendations(breakdown: &Breakdown) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RECOMMENDATION_RULES
        .iter()
        .filter(|rule| (rule.fires)(breakdown))
        .map(|rule| Recommendation {
            priority: rule.priority,
            category: rule.category.to_string(),
            suggestion: rule.suggestion.to_string(),
        })
        .collect();

    // sort_by is stable
    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recommendations
}

pub fn identify_strengths(breakdown: &Breakdown) -> Vec<String> {
    STRENGTH_RULES
        .iter()
        .filter(|(fires, _)| fires(breakdown))
        .map(|(_, strength)| strength.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::analyzer::tests::breakdown_with_scores;

    #[test]
    fn test_all_rules_fire_on_zero_breakdown() {
        let breakdown = breakdown_with_scores([0, 0, 0, 0, 0, 0]);
        let recs = generate_recommendations(&breakdown);

        let categories: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Keywords", "Structure", "Achievements", "Contact Info", "Content"]
        );
        assert!(recs[..3].iter().all(|r| r.priority == Priority::High));
        assert!(recs[3..].iter().all(|r| r.priority == Priority::Medium));
    }

    #[test]
    fn test_thresholds_are_strict() {
        // keyword, structure, content, format, contact, quantification
        let breakdown = breakdown_with_scores([15, 12, 12, 0, 7, 6]);
        assert!(generate_recommendations(&breakdown).is_empty());

        let breakdown = breakdown_with_scores([14, 12, 11, 0, 7, 6]);
        let categories: Vec<String> = generate_recommendations(&breakdown)
            .into_iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(categories, vec!["Keywords", "Content"]);
    }

    #[test]
    fn test_sorted_by_priority_descending() {
        let breakdown = breakdown_with_scores([20, 20, 0, 15, 0, 0]);
        let recs = generate_recommendations(&breakdown);
        let ranks: Vec<u8> = recs.iter().map(|r| r.priority.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ranks, sorted);
        assert_eq!(recs[0].category, "Achievements");
    }

    #[test]
    fn test_strengths() {
        assert!(identify_strengths(&breakdown_with_scores([0; 6])).is_empty());

        let strengths = identify_strengths(&breakdown_with_scores([18, 15, 0, 12, 0, 8]));
        assert_eq!(
            strengths,
            vec![
                "Strong keyword optimization for ATS systems",
                "Well-organized with standard resume sections",
                "Good use of quantifiable achievements",
                "ATS-friendly file format and structure",
            ]
        );

        let strengths = identify_strengths(&breakdown_with_scores([17, 14, 20, 11, 10, 7]));
        assert!(strengths.is_empty());
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
