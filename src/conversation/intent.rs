//! Keyword-driven intent classification.

use serde::Serialize;

use crate::conversation::model::ExtractedFields;

/// What the sender is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asked to start ("lead").
    RequestInfo,
    /// Mentions all of name, email and phone.
    SubmitLead,
    /// Anything else.
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::RequestInfo => "request_info",
            Intent::SubmitLead => "submit_lead",
            Intent::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords that, together, gate a submission attempt.
const SUBMIT_KEYWORDS: [&str; 3] = ["name", "email", "phone"];

/// Classify a message. First rule that matches wins:
///
/// 1. contains `lead` → [`Intent::RequestInfo`]
/// 2. contains `name`, `email` and `phone` → [`Intent::SubmitLead`]
/// 3. otherwise → [`Intent::Fallback`]
///
/// Only keyword presence is checked. `_fields` is not consulted; whether the
/// values actually parsed is the validator's concern.
pub fn classify(text: &str, _fields: &ExtractedFields) -> Intent {
    let normalized = text.to_lowercase();

    if normalized.contains("lead") {
        Intent::RequestInfo
    } else if SUBMIT_KEYWORDS.iter().all(|kw| normalized.contains(kw)) {
        Intent::SubmitLead
    } else {
        Intent::Fallback
    }
}
