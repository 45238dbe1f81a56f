//! Conversation engine: one message in, one reply out.
//!
//! Every call starts fresh: extract, classify, validate submissions, then
//! pick the reply. Nothing is remembered between calls, so a
//! single engine can be shared across concurrent requests.

use tracing::debug;

use crate::conversation::extractor::FieldExtractor;
use crate::conversation::intent::{self, Intent};
use crate::conversation::model::{ConversationResult, IncomingMessage};
use crate::conversation::validator;

pub const REPLY_REQUEST_INFO: &str =
    "Please provide your name, email, and phone number to generate a lead.";

pub const REPLY_LEAD_CAPTURED: &str =
    "Thank you! Your lead has been captured. We'll get back to you soon.";

pub const REPLY_FORMAT_HINT: &str =
    "Please send in this format: 'Name: [your name], Email: [your email], Phone: [your phone]'";

pub const REPLY_GREETING: &str =
    "Hi! To generate a lead, say 'lead' or send your name, email, and phone number.";

/// Stateless lead-capture conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationEngine {
    extractor: FieldExtractor,
}

impl ConversationEngine {
    pub fn new() -> Self {
        Self {
            extractor: FieldExtractor::new(),
        }
    }

    /// Decide the reply (and lead, if any) for one message. Never fails.
    pub fn handle(&self, msg: &IncomingMessage) -> ConversationResult {
        let fields = self.extractor.extract(&msg.raw_text);
        let intent = intent::classify(&msg.raw_text, &fields);
        debug!(sender = %msg.sender_phone, intent = %intent, "Classified message");

        match intent {
            Intent::RequestInfo => ConversationResult::reply(REPLY_REQUEST_INFO),
            Intent::Fallback => ConversationResult::reply(REPLY_GREETING),
            Intent::SubmitLead => match validator::validate(&fields) {
                Ok(lead) => ConversationResult::captured(REPLY_LEAD_CAPTURED, lead),
                Err(e) => {
                    debug!(sender = %msg.sender_phone, error = %e, "Submission rejected");
                    ConversationResult::reply(REPLY_FORMAT_HINT)
                }
            },
        }
    }
}
