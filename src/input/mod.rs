//! Input processing module
//! Handles file detection, text extraction, and the pre-scoring checks

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::{ExtractedDocument, InputManager};
