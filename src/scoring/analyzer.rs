//! Scoring pipeline: normalize, run the six analyzers, aggregate, advise

use crate::error::{AtsScorerError, Result};
use crate::scoring::extractor::{extract_key_info, ExtractedInfo};
use crate::scoring::metrics::{
    AnalysisInput, ContactInfoAnalyzer, ContactInformationResult, ContentQualityAnalyzer,
    ContentQualityResult, FormatAnalyzer, FormatCompatibilityResult, KeywordMatchingAnalyzer,
    KeywordMatchingResult, Metric, MetricAnalyzer, MetricScore, QuantificationAnalyzer,
    QuantificationResult, StructureAnalysisResult, StructureAnalyzer,
};
use crate::scoring::normalizer::ResumeText;
use crate::scoring::recommendations::{generate_recommendations, identify_strengths, Recommendation};
use log::debug;
use serde::{Deserialize, Serialize};

/// One result per metric; all six are always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub keyword_matching: KeywordMatchingResult,
    pub structure_analysis: StructureAnalysisResult,
    pub content_quality: ContentQualityResult,
    pub format_compatibility: FormatCompatibilityResult,
    pub contact_information: ContactInformationResult,
    pub quantification: QuantificationResult,
}

impl Breakdown {
    pub fn score(&self, metric: Metric) -> u32 {
        match metric {
            Metric::KeywordMatching => self.keyword_matching.score(),
            Metric::StructureAnalysis => self.structure_analysis.score(),
            Metric::ContentQuality => self.content_quality.score(),
            Metric::FormatCompatibility => self.format_compatibility.score(),
            Metric::ContactInformation => self.contact_information.score(),
            Metric::Quantification => self.quantification.score(),
        }
    }

    /// (metric, score) pairs in aggregation order
    pub fn scores(&self) -> impl Iterator<Item = (Metric, u32)> + '_ {
        Metric::ALL.into_iter().map(move |metric| (metric, self.score(metric)))
    }

    /// Reject any score above its metric maximum
    pub fn validate(&self) -> Result<()> {
        for (metric, score) in self.scores() {
            if score > metric.max_score() {
                return Err(AtsScorerError::AnalysisFailed(format!(
                    "{} score {} exceeds maximum {}",
                    metric,
                    score,
                    metric.max_score()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub breakdown: Breakdown,
    pub recommendations: Vec<Recommendation>,
    pub strengths: Vec<String>,
    pub extracted_info: ExtractedInfo,
}

/// Weighted sum of the raw metric scores, rounded half up.
///
/// Each score is multiplied by its weight without first rescaling it to
/// 0-100, so the practical ceiling is well below 100.
pub fn calculate_overall_score(breakdown: &Breakdown) -> u32 {
    let total: f64 = breakdown
        .scores()
        .map(|(metric, score)| score as f64 * metric.weight())
        .sum();
    total.round() as u32
}

/// Qualitative band for an overall score, as shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Excellent
        } else if score >= 60 {
            ScoreBand::Good
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    /// Band for a metric score relative to its own maximum
    pub fn for_metric(score: u32, max: u32) -> Self {
        if max == 0 {
            return ScoreBand::NeedsImprovement;
        }
        Self::from_score(score * 100 / max)
    }

    pub fn description(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! Your resume is well-optimized for ATS systems.",
            ScoreBand::Good => {
                "Good! Your resume has solid ATS compatibility with room for improvement."
            }
            ScoreBand::NeedsImprovement => {
                "Needs improvement. Follow our recommendations to optimize for ATS systems."
            }
        }
    }
}

/// Entry point of the scoring engine. Stateless; the only shared data are
/// the read-only catalogs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResumeAnalyzer;

impl ResumeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score extracted resume text. `filename` is only used for its extension.
    ///
    /// Either the whole result is returned or an `AnalysisFailed` error; no
    /// partial breakdown escapes.
    pub fn analyze(&self, text: &str, filename: &str) -> Result<AnalysisResult> {
        let text = ResumeText::normalize(text);
        let input = AnalysisInput {
            text: &text,
            filename,
        };

        let breakdown = Breakdown {
            keyword_matching: KeywordMatchingAnalyzer.analyze(&input),
            structure_analysis: StructureAnalyzer.analyze(&input),
            content_quality: ContentQualityAnalyzer.analyze(&input),
            format_compatibility: FormatAnalyzer.analyze(&input),
            contact_information: ContactInfoAnalyzer.analyze(&input),
            quantification: QuantificationAnalyzer.analyze(&input),
        };
        breakdown.validate()?;

        for (metric, score) in breakdown.scores() {
            debug!("{}: {}/{}", metric, score, metric.max_score());
        }

        let overall_score = calculate_overall_score(&breakdown);
        debug!("Overall score for '{}': {}", filename, overall_score);

        Ok(AnalysisResult {
            overall_score,
            recommendations: generate_recommendations(&breakdown),
            strengths: identify_strengths(&breakdown),
            extracted_info: extract_key_info(&text),
            breakdown,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scoring::metrics::{ContactInfo, ContentMetrics};

    /// Breakdown with the given scores in `Metric::ALL` order
    pub(crate) fn breakdown_with_scores(scores: [u32; 6]) -> Breakdown {
        Breakdown {
            keyword_matching: KeywordMatchingResult {
                score: scores[0],
                matched_keywords: Vec::new(),
                total_matched: 0,
                details: String::new(),
            },
            structure_analysis: StructureAnalysisResult {
                score: scores[1],
                found_sections: Vec::new(),
                section_count: 0,
                details: String::new(),
            },
            content_quality: ContentQualityResult {
                score: scores[2],
                metrics: ContentMetrics {
                    word_count: 0,
                    sentences: 0,
                    action_verbs: 0,
                    professional_language: 0,
                },
                details: String::new(),
            },
            format_compatibility: FormatCompatibilityResult {
                score: scores[3],
                file_type: String::new(),
                details: String::new(),
            },
            contact_information: ContactInformationResult {
                score: scores[4],
                contact_info: ContactInfo {
                    email: false,
                    phone: false,
                    linkedin: false,
                    location: false,
                },
                details: String::new(),
            },
            quantification: QuantificationResult {
                score: scores[5],
                quantifications: 0,
                details: String::new(),
            },
        }
    }

    #[test]
    fn test_overall_score_weighting() {
        let max = breakdown_with_scores([25, 20, 20, 15, 10, 10]);
        // 6.25 + 4 + 4 + 2.25 + 1 + 1 = 18.5
        assert_eq!(calculate_overall_score(&max), 19);

        let zero = breakdown_with_scores([0; 6]);
        assert_eq!(calculate_overall_score(&zero), 0);

        // 0.75 rounds up
        let format_only = breakdown_with_scores([0, 0, 0, 5, 0, 0]);
        assert_eq!(calculate_overall_score(&format_only), 1);
    }

    #[test]
    fn test_overall_score_is_deterministic() {
        let breakdown = breakdown_with_scores([13, 9, 14, 15, 8, 4]);
        let first = calculate_overall_score(&breakdown);
        for _ in 0..10 {
            assert_eq!(calculate_overall_score(&breakdown), first);
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let breakdown = breakdown_with_scores([26, 0, 0, 0, 0, 0]);
        assert!(matches!(
            breakdown.validate(),
            Err(AtsScorerError::AnalysisFailed(_))
        ));
        assert!(breakdown_with_scores([25, 20, 20, 15, 10, 10]).validate().is_ok());
    }

    #[test]
    fn test_empty_text() {
        let result = ResumeAnalyzer::new().analyze("", "").unwrap();

        assert!(result.breakdown.scores().all(|(_, score)| score == 0));
        assert_eq!(result.overall_score, 0);
        assert_eq!(result.recommendations.len(), 5);
        assert!(result.strengths.is_empty());
        assert_eq!(result.extracted_info.estimated_experience, "Not specified");
        assert!(result.extracted_info.top_skills.is_empty());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let text = "Jane Roe\njane@example.com\n\nExperience\nLed migration to AWS, \
                    reduced costs by 30% (2016 - 2023).";
        let analyzer = ResumeAnalyzer::new();
        let first = analyzer.analyze(text, "resume.docx").unwrap();
        let second = analyzer.analyze(text, "resume.docx").unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let result = ResumeAnalyzer::new()
            .analyze("Skills: Python. Austin, TX", "resume.pdf")
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("overallScore").is_some());
        assert!(json["breakdown"]["keywordMatching"]["matchedKeywords"].is_array());
        assert_eq!(
            json["breakdown"]["keywordMatching"]["matchedKeywords"][0]["category"],
            "technical"
        );
        assert_eq!(json["breakdown"]["contactInformation"]["contactInfo"]["location"], true);
        assert!(json["extractedInfo"]["topSkills"].is_array());
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::for_metric(20, 25), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_metric(6, 10), ScoreBand::Good);
    }
}
