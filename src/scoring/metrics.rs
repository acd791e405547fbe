//! The six independent metric analyzers
//!
//! Each analyzer is a stateless unit struct reading only the normalized text
//! (plus the filename for format compatibility) and the static catalogs, so
//! they can run in any order. Every result is capped at its metric maximum.

use crate::scoring::catalog::{
    KeywordCategory, KeywordIndex, ACTION_VERBS, SECTION_HEADER_VARIATIONS,
    STANDARD_SECTION_HEADERS,
};
use crate::scoring::normalizer::ResumeText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six metrics composing the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    KeywordMatching,
    StructureAnalysis,
    ContentQuality,
    FormatCompatibility,
    ContactInformation,
    Quantification,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::KeywordMatching,
        Metric::StructureAnalysis,
        Metric::ContentQuality,
        Metric::FormatCompatibility,
        Metric::ContactInformation,
        Metric::Quantification,
    ];

    pub fn max_score(self) -> u32 {
        match self {
            Metric::KeywordMatching => 25,
            Metric::StructureAnalysis => 20,
            Metric::ContentQuality => 20,
            Metric::FormatCompatibility => 15,
            Metric::ContactInformation => 10,
            Metric::Quantification => 10,
        }
    }

    /// Aggregation weight; the six weights sum to 1.0
    pub fn weight(self) -> f64 {
        match self {
            Metric::KeywordMatching => 0.25,
            Metric::StructureAnalysis => 0.20,
            Metric::ContentQuality => 0.20,
            Metric::FormatCompatibility => 0.15,
            Metric::ContactInformation => 0.10,
            Metric::Quantification => 0.10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::KeywordMatching => "Keyword Matching",
            Metric::StructureAnalysis => "Structure Analysis",
            Metric::ContentQuality => "Content Quality",
            Metric::FormatCompatibility => "Format Compatibility",
            Metric::ContactInformation => "Contact Information",
            Metric::Quantification => "Quantification",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What every analyzer sees
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub text: &'a ResumeText,
    pub filename: &'a str,
}

pub trait MetricScore {
    fn score(&self) -> u32;
}

pub trait MetricAnalyzer {
    type Output: MetricScore;

    fn metric(&self) -> Metric;

    fn analyze(&self, input: &AnalysisInput<'_>) -> Self::Output;
}

macro_rules! impl_metric_score {
    ($($result:ty),* $(,)?) => {
        $(
            impl MetricScore for $result {
                fn score(&self) -> u32 {
                    self.score
                }
            }
        )*
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub keyword: String,
    pub category: KeywordCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatchingResult {
    pub score: u32,
    pub matched_keywords: Vec<KeywordMatch>,
    pub total_matched: usize,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysisResult {
    pub score: u32,
    pub found_sections: Vec<String>,
    pub section_count: usize,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub word_count: usize,
    pub sentences: usize,
    pub action_verbs: usize,
    /// Reserved; always zero
    pub professional_language: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQualityResult {
    pub score: u32,
    pub metrics: ContentMetrics,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCompatibilityResult {
    pub score: u32,
    pub file_type: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: bool,
    pub phone: bool,
    pub linkedin: bool,
    pub location: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInformationResult {
    pub score: u32,
    pub contact_info: ContactInfo,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantificationResult {
    pub score: u32,
    pub quantifications: usize,
    pub details: String,
}

impl_metric_score!(
    KeywordMatchingResult,
    StructureAnalysisResult,
    ContentQualityResult,
    FormatCompatibilityResult,
    ContactInformationResult,
    QuantificationResult,
);

// Word boundaries are ASCII-only: a CJK character next to "Experience" or
// "2015" still counts as a boundary.
static SECTION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    STANDARD_SECTION_HEADERS
        .iter()
        .chain(SECTION_HEADER_VARIATIONS.iter())
        .map(|header| {
            let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(header));
            let regex = Regex::new(&pattern).expect("Invalid section header regex");
            (*header, regex)
        })
        .collect()
});

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid sentence regex"));

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{3}[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").expect("Invalid phone regex")
});

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Z][a-z]+,\s*[A-Z]{2}(?-u:\b)").expect("Invalid location regex")
});

static QUANTIFICATION_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        // Percentages
        Regex::new(r"[0-9]+%").expect("Invalid percentage regex"),
        // Dollar amounts
        Regex::new(r"\$[0-9,]+").expect("Invalid dollar regex"),
        // Time periods
        Regex::new(r"(?i)(?-u:\b)[0-9]+\s*(?:years?|months?)").expect("Invalid time period regex"),
        // Achievement verb followed by a number
        Regex::new(r"(?i)(?-u:\b)(?:increased|decreased|improved|reduced|grew)\s+.*?\s+[0-9]+")
            .expect("Invalid achievement regex"),
    ]
});

pub struct KeywordMatchingAnalyzer;

impl MetricAnalyzer for KeywordMatchingAnalyzer {
    type Output = KeywordMatchingResult;

    fn metric(&self) -> Metric {
        Metric::KeywordMatching
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> KeywordMatchingResult {
        let index = KeywordIndex::global();
        let matched_keywords: Vec<KeywordMatch> = index
            .matching_entries(input.text)
            .map(|entry| KeywordMatch {
                keyword: entry.keyword.to_string(),
                category: entry.category,
            })
            .collect();

        let ratio = matched_keywords.len() as f64 / index.total_keywords() as f64 * 100.0;
        let score = ratio.min(self.metric().max_score() as f64).round() as u32;

        KeywordMatchingResult {
            score,
            total_matched: matched_keywords.len(),
            matched_keywords,
            details: "Keywords found across technical, business, and industry-specific categories"
                .to_string(),
        }
    }
}

pub struct StructureAnalyzer;

impl StructureAnalyzer {
    const POINTS_PER_SECTION: u32 = 3;
}

impl MetricAnalyzer for StructureAnalyzer {
    type Output = StructureAnalysisResult;

    fn metric(&self) -> Metric {
        Metric::StructureAnalysis
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> StructureAnalysisResult {
        let found_sections: Vec<String> = SECTION_PATTERNS
            .iter()
            .filter(|(_, regex)| regex.is_match(input.text))
            .map(|(header, _)| header.to_string())
            .collect();

        let raw = found_sections.len() as u32 * Self::POINTS_PER_SECTION;
        let score = raw.min(self.metric().max_score());

        StructureAnalysisResult {
            score,
            section_count: found_sections.len(),
            details: format!("Found {} standard resume sections", found_sections.len()),
            found_sections,
        }
    }
}

pub struct ContentQualityAnalyzer;

impl ContentQualityAnalyzer {
    const LENGTH_BONUS: u32 = 10;

    fn has_ideal_length(word_count: usize) -> bool {
        word_count > 200 && word_count < 800
    }
}

impl MetricAnalyzer for ContentQualityAnalyzer {
    type Output = ContentQualityResult;

    fn metric(&self) -> Metric {
        Metric::ContentQuality
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> ContentQualityResult {
        let text: &str = input.text;
        let lowered = text.to_lowercase();

        let action_verbs = ACTION_VERBS
            .iter()
            .filter(|verb| lowered.contains(*verb))
            .count();

        let metrics = ContentMetrics {
            word_count: text.split_whitespace().count(),
            sentences: SENTENCE_END.split(text).count(),
            action_verbs,
            professional_language: 0,
        };

        let mut raw = action_verbs as u32;
        if Self::has_ideal_length(metrics.word_count) {
            raw += Self::LENGTH_BONUS;
        }

        ContentQualityResult {
            score: raw.min(self.metric().max_score()),
            metrics,
            details: "Content analysis based on length, language quality, and action verbs"
                .to_string(),
        }
    }
}

pub struct FormatAnalyzer;

impl FormatAnalyzer {
    const PDF_POINTS: u32 = 10;
    const DOCX_POINTS: u32 = 8;
    const CLEAN_TEXT_POINTS: u32 = 5;

    /// Last dot-separated segment of the filename, or the whole name when it
    /// has no dot.
    fn file_type(filename: &str) -> String {
        filename.rsplit('.').next().unwrap_or(filename).to_string()
    }
}

impl MetricAnalyzer for FormatAnalyzer {
    type Output = FormatCompatibilityResult;

    fn metric(&self) -> Metric {
        Metric::FormatCompatibility
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> FormatCompatibilityResult {
        let filename = input.filename.to_lowercase();
        let mut raw = if filename.ends_with(".pdf") {
            Self::PDF_POINTS
        } else if filename.ends_with(".docx") {
            Self::DOCX_POINTS
        } else {
            0
        };

        // Empty text means nothing was extracted, which is not a clean extraction
        if !input.text.is_empty() && input.text.is_ascii() {
            raw += Self::CLEAN_TEXT_POINTS;
        }

        FormatCompatibilityResult {
            score: raw.min(self.metric().max_score()),
            file_type: Self::file_type(input.filename),
            details: "Format compatibility for ATS systems".to_string(),
        }
    }
}

pub struct ContactInfoAnalyzer;

impl MetricAnalyzer for ContactInfoAnalyzer {
    type Output = ContactInformationResult;

    fn metric(&self) -> Metric {
        Metric::ContactInformation
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> ContactInformationResult {
        let text: &str = input.text;
        let contact_info = ContactInfo {
            email: text.contains('@'),
            phone: PHONE.is_match(text),
            linkedin: text.to_lowercase().contains("linkedin"),
            location: LOCATION.is_match(text),
        };

        let raw = [
            (contact_info.email, 3),
            (contact_info.phone, 3),
            (contact_info.linkedin, 2),
            (contact_info.location, 2),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, points)| points)
        .sum::<u32>();

        ContactInformationResult {
            score: raw.min(self.metric().max_score()),
            contact_info,
            details: "Professional contact information completeness".to_string(),
        }
    }
}

pub struct QuantificationAnalyzer;

impl QuantificationAnalyzer {
    const POINTS_PER_MATCH: usize = 2;
}

impl MetricAnalyzer for QuantificationAnalyzer {
    type Output = QuantificationResult;

    fn metric(&self) -> Metric {
        Metric::Quantification
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> QuantificationResult {
        let text: &str = input.text;
        let quantifications: usize = QUANTIFICATION_PATTERNS
            .iter()
            .map(|pattern| pattern.find_iter(text).count())
            .sum();

        let max = self.metric().max_score() as usize;
        let score = quantifications.saturating_mul(Self::POINTS_PER_MATCH).min(max) as u32;

        QuantificationResult {
            score,
            quantifications,
            details: format!("Found {} quantified achievements", quantifications),
        }
    }
}
