//! Rule-based ATS scoring engine

pub mod catalog;
pub mod normalizer;
pub mod metrics;
pub mod recommendations;
pub mod extractor;
pub mod analyzer;

pub use analyzer::{AnalysisResult, Breakdown, ResumeAnalyzer, ScoreBand};
pub use metrics::Metric;
pub use recommendations::{Priority, Recommendation};
