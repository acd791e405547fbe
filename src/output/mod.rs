//! Report envelopes and output formatting

pub mod report;
pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{AnalysisEnvelope, ErrorEnvelope, ReportMetadata};
