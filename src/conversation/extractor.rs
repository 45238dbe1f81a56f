//! Label-anchored field extraction.
//!
//! Each field is found independently by a `label : value` pattern. The
//! label is matched case-insensitively; the captured value keeps its
//! original characters. A field whose pattern does not match is simply
//! absent.

use std::sync::LazyLock;

use regex::Regex;

use crate::conversation::model::ExtractedFields;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)name\s*:\s*(\w+)").unwrap());

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)email\s*:\s*([\w.\-]+@[\w.\-]+)").unwrap());

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)phone\s*:\s*(\+[0-9]+)").unwrap());

/// Extracts name, email and phone from free text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run all three patterns over `text`.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            name: first_capture(&NAME_PATTERN, text),
            email: first_capture(&EMAIL_PATTERN, text),
            phone: first_capture(&PHONE_PATTERN, text),
        }
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
