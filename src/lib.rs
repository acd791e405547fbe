//! ATS scorer library
//!
//! Deterministic, rule-based scoring of resume text for applicant tracking
//! system compatibility, plus the extraction and reporting around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod scoring;

pub use config::Config;
pub use error::{AtsScorerError, Result};
pub use scoring::{AnalysisResult, ResumeAnalyzer};
