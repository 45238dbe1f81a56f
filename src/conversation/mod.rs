//! Lead-capture conversation core.
//!
//! Pure and synchronous. Inbound text flows through:
//! 1. `FieldExtractor::extract()`: labeled-field patterns, run on every message
//! 2. `intent::classify()`: keyword gate
//! 3. `validator::validate()`: all three fields or nothing
//! 4. `ConversationEngine::handle()`: picks the reply
//!
//! No I/O happens here. Persisting the lead and sending the reply are the
//! caller's job.

pub mod engine;
pub mod extractor;
pub mod intent;
pub mod model;
pub mod validator;

pub use engine::ConversationEngine;
pub use extractor::FieldExtractor;
pub use intent::{Intent, classify};
pub use model::{ConversationResult, ExtractedFields, IncomingMessage, LeadRecord, Outcome};
pub use validator::validate;
