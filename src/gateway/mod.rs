//! Outbound SMS gateway abstraction.

pub mod africastalking;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GatewayError;

pub use africastalking::AfricasTalkingGateway;

/// Whether the carrier accepted the send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Success,
    Error,
}

/// Carrier verdict plus its raw payload, echoed back to the webhook caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResult {
    pub status: GatewayStatus,
    pub data: serde_json::Value,
}

impl GatewayResult {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            status: GatewayStatus::Success,
            data,
        }
    }

    pub fn error(data: serde_json::Value) -> Self {
        Self {
            status: GatewayStatus::Error,
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == GatewayStatus::Success
    }
}

/// Sends a text message to a phone number.
///
/// Carrier rejections come back in-band as [`GatewayStatus::Error`]; `Err`
/// is reserved for requests that never got a carrier answer.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    async fn send(&self, to: &str, message: &str) -> Result<GatewayResult, GatewayError>;
}
