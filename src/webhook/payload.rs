//! Inbound webhook body and the JSON reply shape.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::error::WebhookError;
use crate::gateway::{GatewayResult, GatewayStatus};

/// Fields the carrier posts for an incoming SMS.
///
/// Only `from` and `text` drive behavior; the rest are kept for logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmsWebhook {
    pub from: Option<String>,
    #[serde(default)]
    pub text: String,
    pub to: Option<String>,
    pub id: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "linkId")]
    pub link_id: Option<String>,
}

impl SmsWebhook {
    /// Sender phone, rejecting a missing or blank `from`.
    pub fn sender(&self) -> Result<&str, WebhookError> {
        self.from
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| WebhookError::InvalidPayload("missing `from`".to_string()))
    }
}

/// Accepts `application/json` bodies, and form-encoded bodies otherwise.
impl<S> FromRequest<S> for SmsWebhook
where
    S: Send + Sync,
{
    type Rejection = WebhookError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<SmsWebhook>::from_request(req, state)
                .await
                .map_err(|e| WebhookError::InvalidPayload(e.body_text()))?;
            Ok(payload)
        } else {
            let Form(payload) = Form::<SmsWebhook>::from_request(req, state)
                .await
                .map_err(|e| WebhookError::InvalidPayload(e.body_text()))?;
            Ok(payload)
        }
    }
}

/// `{ "status": "success"|"error", "response": <gateway result> }`
#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    pub status: GatewayStatus,
    pub response: GatewayResult,
}

impl From<GatewayResult> for WebhookResponse {
    fn from(response: GatewayResult) -> Self {
        let status = if response.is_success() {
            GatewayStatus::Success
        } else {
            GatewayStatus::Error
        };
        Self { status, response }
    }
}
