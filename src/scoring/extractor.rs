//! Best-effort extraction of display-only resume facts

use crate::scoring::catalog::{KeywordIndex, DEGREE_KEYWORDS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_SPECIFIED: &str = "Not specified";
const MAX_TOP_SKILLS: usize = 10;

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)(?:19|20)[0-9]{2}(?-u:\b)").expect("Invalid year regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInfo {
    pub estimated_experience: String,
    pub top_skills: Vec<String>,
    pub education: String,
}

pub fn extract_key_info(text: &str) -> ExtractedInfo {
    ExtractedInfo {
        estimated_experience: estimate_experience(text),
        top_skills: top_skills(text),
        education: education_level(text),
    }
}

/// Span between the earliest and latest year mentioned, e.g. "22+ years"
pub fn estimate_experience(text: &str) -> String {
    let years: Vec<u32> = YEAR
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if years.len() < 2 {
        return NOT_SPECIFIED.to_string();
    }

    match (years.iter().min(), years.iter().max()) {
        (Some(first), Some(last)) => format!("{}+ years", last - first),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// First catalog keywords present in the text, in declaration order
pub fn top_skills(text: &str) -> Vec<String> {
    KeywordIndex::global()
        .matching_entries(text)
        .take(MAX_TOP_SKILLS)
        .map(|entry| entry.keyword.to_string())
        .collect()
}

pub fn education_level(text: &str) -> String {
    let lowered = text.to_lowercase();
    DEGREE_KEYWORDS
        .iter()
        .find(|degree| lowered.contains(*degree))
        .map(|degree| capitalize(degree))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
