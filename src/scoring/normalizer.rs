//! Whitespace normalization shared by every analyzer

use std::fmt;
use std::ops::Deref;

/// Resume text with every whitespace run collapsed to a single space and
/// no leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText(String);

impl ResumeText {
    pub fn normalize(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len());
        for word in raw.split_whitespace() {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(word);
        }
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ResumeText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResumeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
