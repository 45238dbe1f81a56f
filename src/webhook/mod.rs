//! Inbound SMS webhook.
//!
//! The carrier posts each incoming SMS here. The handler hands the text to
//! the conversation engine, persists any captured lead, sends the reply
//! through the gateway, and echoes the gateway's verdict as JSON.

pub mod payload;
pub mod routes;

pub use payload::{SmsWebhook, WebhookResponse};
pub use routes::{AppState, webhook_routes};
