//! HTTP endpoints: the SMS webhook and a health check.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::payload::{SmsWebhook, WebhookResponse};
use crate::conversation::{ConversationEngine, IncomingMessage};
use crate::error::WebhookError;
use crate::gateway::{GatewayResult, MessageGateway};
use crate::store::LeadStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConversationEngine>,
    pub store: Arc<dyn LeadStore>,
    pub gateway: Arc<dyn MessageGateway>,
}

impl AppState {
    pub fn new(store: Arc<dyn LeadStore>, gateway: Arc<dyn MessageGateway>) -> Self {
        Self {
            engine: Arc::new(ConversationEngine::new()),
            store,
            gateway,
        }
    }
}

/// Build the Axum router for the webhook service.
pub fn webhook_routes(state: AppState) -> Router {
    Router::new()
        .route("/webhook/sms", post(sms_webhook))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "lead-sms"
    }))
}

// ── Webhook ─────────────────────────────────────────────────────────────

/// POST /webhook/sms
///
/// Runs the conversation engine, stores any captured lead, then sends the
/// reply. A store failure aborts before anything is sent.
async fn sms_webhook(
    State(state): State<AppState>,
    payload: SmsWebhook,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let sender = payload.sender()?.to_string();
    info!(
        from = %sender,
        to = ?payload.to,
        id = ?payload.id,
        date = ?payload.date,
        link_id = ?payload.link_id,
        text_len = payload.text.len(),
        "Incoming SMS webhook"
    );

    let msg = IncomingMessage::new(sender, payload.text);
    let result = state.engine.handle(&msg);
    info!(from = %msg.sender_phone, outcome = ?result.outcome, "Conversation step complete");

    if let Some(ref lead) = result.lead {
        let stored = state.store.insert_lead(lead, &msg.sender_phone).await?;
        info!(lead_id = %stored.id, from = %msg.sender_phone, "Lead captured");
    }

    let gateway_result = match state
        .gateway
        .send(&msg.sender_phone, &result.reply_text)
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!(gateway = state.gateway.name(), error = %e, "SMS send failed");
            GatewayResult::error(serde_json::json!({ "error": e.to_string() }))
        }
    };
    info!(
        gateway = state.gateway.name(),
        status = ?gateway_result.status,
        response = %gateway_result.data,
        "SMS response"
    );

    Ok(Json(WebhookResponse::from(gateway_result)))
}
