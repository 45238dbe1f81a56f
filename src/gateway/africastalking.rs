//! Africa's Talking SMS gateway: REST `version1/messaging` endpoint.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use secrecy::ExposeSecret;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::{GatewayResult, MessageGateway};

const PROVIDER: &str = "africastalking";

/// Africa's Talking client.
pub struct AfricasTalkingGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl AfricasTalkingGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn messaging_url(&self) -> String {
        format!("{}/version1/messaging", self.config.base_url)
    }
}

#[async_trait]
impl MessageGateway for AfricasTalkingGateway {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn send(&self, to: &str, message: &str) -> Result<GatewayResult, GatewayError> {
        let mut form = vec![
            ("username", self.config.username.as_str()),
            ("to", to),
            ("message", message),
        ];
        if let Some(ref sender_id) = self.config.sender_id {
            form.push(("from", sender_id.as_str()));
        }

        let resp = self
            .client
            .post(self.messaging_url())
            .header("apiKey", self.config.api_key.expose_secret())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed {
                provider: PROVIDER.into(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::InvalidResponse {
                provider: PROVIDER.into(),
                reason: format!("failed to read body: {e}"),
            })?;
        let data = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));

        if status.is_success() {
            tracing::debug!(to, status = status.as_u16(), "SMS accepted by gateway");
            Ok(GatewayResult::success(data))
        } else {
            tracing::warn!(to, status = status.as_u16(), "SMS rejected by gateway");
            Ok(GatewayResult::error(data))
        }
    }
}
