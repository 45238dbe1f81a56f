//! Data carried through a single conversation step.

use serde::{Deserialize, Serialize};

/// An inbound SMS as handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Sender phone number (the carrier's `from`).
    pub sender_phone: String,
    /// Message body, untouched.
    pub raw_text: String,
}

impl IncomingMessage {
    pub fn new(sender_phone: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            sender_phone: sender_phone.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Candidate values found by the labeled-field patterns.
///
/// A field is `Some` only when its pattern matched syntactically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ExtractedFields {
    /// Names of fields that are absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().is_none_or(str::is_empty))
        .map(|(label, _)| label)
        .collect()
    }
}

/// A validated lead. Only `validator::validate` builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    name: String,
    email: String,
    phone: String,
}

impl LeadRecord {
    pub(crate) fn from_parts(name: String, email: String, phone: String) -> Self {
        Self { name, email, phone }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Terminal state reached by one call to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    LeadCreated,
    NoLead,
}

/// Everything the engine decided for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationResult {
    pub reply_text: String,
    pub lead: Option<LeadRecord>,
    pub outcome: Outcome,
}

impl ConversationResult {
    pub(crate) fn reply(text: &str) -> Self {
        Self {
            reply_text: text.to_string(),
            lead: None,
            outcome: Outcome::NoLead,
        }
    }

    pub(crate) fn captured(text: &str, lead: LeadRecord) -> Self {
        Self {
            reply_text: text.to_string(),
            lead: Some(lead),
            outcome: Outcome::LeadCreated,
        }
    }
}
