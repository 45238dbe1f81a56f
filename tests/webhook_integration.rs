//! Integration tests for the SMS webhook.
//!
//! Each test spins up the Axum router on a random port with an in-memory
//! store and a recording gateway, then drives it over real HTTP.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;

use lead_sms::conversation::engine::{
    REPLY_FORMAT_HINT, REPLY_GREETING, REPLY_LEAD_CAPTURED, REPLY_REQUEST_INFO,
};
use lead_sms::conversation::LeadRecord;
use lead_sms::error::{DatabaseError, GatewayError};
use lead_sms::gateway::{GatewayResult, MessageGateway};
use lead_sms::store::{LeadStore, LibSqlBackend, StoredLead};
use lead_sms::webhook::{AppState, webhook_routes};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const SENDER: &str = "+254711111111";

#[derive(Clone, Copy)]
enum GatewayMode {
    Accept,
    Reject,
    Unreachable,
}

/// Gateway stub that records every send.
struct RecordingGateway {
    mode: GatewayMode,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingGateway {
    fn new(mode: GatewayMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageGateway for RecordingGateway {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, to: &str, message: &str) -> Result<GatewayResult, GatewayError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.to_string()));
        match self.mode {
            GatewayMode::Accept => Ok(GatewayResult::success(serde_json::json!({
                "SMSMessageData": { "Recipients": [{ "number": to, "status": "Success" }] }
            }))),
            GatewayMode::Reject => Ok(GatewayResult::error(serde_json::json!("InvalidSenderId"))),
            GatewayMode::Unreachable => Err(GatewayError::RequestFailed {
                provider: "recording".into(),
                reason: "connection refused".into(),
            }),
        }
    }
}

/// Store stub whose writes always fail.
struct BrokenStore;

#[async_trait]
impl LeadStore for BrokenStore {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
    async fn insert_lead(&self, _: &LeadRecord, _: &str) -> Result<StoredLead, DatabaseError> {
        Err(DatabaseError::Query("disk I/O error".into()))
    }
    async fn list_leads(&self, _: usize) -> Result<Vec<StoredLead>, DatabaseError> {
        Ok(Vec::new())
    }
    async fn count_leads(&self) -> Result<u64, DatabaseError> {
        Ok(0)
    }
}

/// Start the router on a random port, return the base URL.
async fn start_server(store: Arc<dyn LeadStore>, gateway: Arc<dyn MessageGateway>) -> String {
    let app = webhook_routes(AppState::new(store, gateway));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

struct Harness {
    base: String,
    store: Arc<LibSqlBackend>,
    gateway: Arc<RecordingGateway>,
    client: reqwest::Client,
}

async fn harness(mode: GatewayMode) -> Harness {
    let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
    let gateway = RecordingGateway::new(mode);
    let base = start_server(store.clone(), gateway.clone()).await;
    Harness {
        base,
        store,
        gateway,
        client: reqwest::Client::new(),
    }
}

impl Harness {
    async fn post_form(&self, text: &str) -> (u16, Value) {
        let resp = self
            .client
            .post(format!("{}/webhook/sms", self.base))
            .form(&[("from", SENDER), ("text", text), ("to", "12345"), ("id", "msg-1")])
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

// ── Conversation paths ───────────────────────────────────────────────

#[tokio::test]
async fn complete_submission_stores_lead_and_thanks_sender() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Accept).await;

        let (status, json) = h
            .post_form("Name: Jane, Email: jane@x.com, Phone: +254700000000")
            .await;
        assert_eq!(status, 200);
        assert_eq!(json["status"], "success");
        assert_eq!(json["response"]["status"], "success");

        let leads = h.store.list_leads(10).await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Jane");
        assert_eq!(leads[0].email, "jane@x.com");
        assert_eq!(leads[0].phone, "+254700000000");
        assert_eq!(leads[0].sender_phone, SENDER);

        assert_eq!(
            h.gateway.sent(),
            vec![(SENDER.to_string(), REPLY_LEAD_CAPTURED.to_string())]
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn lead_keyword_asks_for_details_without_storing() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Accept).await;

        let (status, _) = h.post_form("lead please").await;
        assert_eq!(status, 200);
        assert_eq!(h.store.count_leads().await.unwrap(), 0);
        assert_eq!(h.gateway.sent()[0].1, REPLY_REQUEST_INFO);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn bare_keywords_get_format_hint() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Accept).await;

        h.post_form("name email phone").await;
        assert_eq!(h.store.count_leads().await.unwrap(), 0);
        assert_eq!(h.gateway.sent()[0].1, REPLY_FORMAT_HINT);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unrelated_text_gets_greeting() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Accept).await;

        h.post_form("hello there").await;
        assert_eq!(h.store.count_leads().await.unwrap(), 0);
        assert_eq!(h.gateway.sent()[0].1, REPLY_GREETING);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn json_and_form_bodies_get_identical_responses() {
    timeout(TEST_TIMEOUT, async {
        for text in [
            "Name: Jane, Email: jane@x.com, Phone: +254700000000",
            "lead",
            "name email phone",
            "hello",
        ] {
            let form = harness(GatewayMode::Accept).await;
            let (form_status, form_body) = form.post_form(text).await;

            let json = harness(GatewayMode::Accept).await;
            let resp = json
                .client
                .post(format!("{}/webhook/sms", json.base))
                .json(&serde_json::json!({
                    "from": SENDER,
                    "text": text,
                    "to": "12345",
                    "id": "msg-1",
                }))
                .send()
                .await
                .unwrap();
            let json_status = resp.status().as_u16();
            let json_body: Value = resp.json().await.unwrap();

            assert_eq!(form_status, json_status, "status for {text:?}");
            assert_eq!(form_body, json_body, "body for {text:?}");
            assert_eq!(form.gateway.sent(), json.gateway.sent(), "sends for {text:?}");
            assert_eq!(
                form.store.count_leads().await.unwrap(),
                json.store.count_leads().await.unwrap(),
                "stored leads for {text:?}"
            );
        }
    })
    .await
    .expect("test timed out");
}

// ── Gateway outcomes ─────────────────────────────────────────────────

#[tokio::test]
async fn gateway_rejection_reports_error_status() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Reject).await;

        let (status, json) = h.post_form("hello").await;
        assert_eq!(status, 200);
        assert_eq!(json["status"], "error");
        assert_eq!(json["response"]["status"], "error");
        assert_eq!(json["response"]["data"], "InvalidSenderId");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_gateway_still_answers_webhook() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Unreachable).await;

        let (status, json) = h
            .post_form("Name: Jane, Email: jane@x.com, Phone: +254700000000")
            .await;
        assert_eq!(status, 200);
        assert_eq!(json["status"], "error");
        assert!(
            json["response"]["data"]["error"]
                .as_str()
                .unwrap()
                .contains("connection refused")
        );
        // The lead was stored before the send was attempted.
        assert_eq!(h.store.count_leads().await.unwrap(), 1);
    })
    .await
    .expect("test timed out");
}

// ── Request errors ───────────────────────────────────────────────────

#[tokio::test]
async fn missing_sender_is_bad_request() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Accept).await;

        let resp = h
            .client
            .post(format!("{}/webhook/sms", h.base))
            .form(&[("text", "lead")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 400);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "error");
        assert!(h.gateway.sent().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn store_failure_is_server_error_and_sends_nothing() {
    timeout(TEST_TIMEOUT, async {
        let gateway = RecordingGateway::new(GatewayMode::Accept);
        let base = start_server(Arc::new(BrokenStore), gateway.clone()).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/webhook/sms"))
            .form(&[
                ("from", SENDER),
                ("text", "Name: Jane, Email: jane@x.com, Phone: +254700000000"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 500);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "error");
        assert!(gateway.sent().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn store_failure_does_not_affect_non_submissions() {
    timeout(TEST_TIMEOUT, async {
        let gateway = RecordingGateway::new(GatewayMode::Accept);
        let base = start_server(Arc::new(BrokenStore), gateway.clone()).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/webhook/sms"))
            .form(&[("from", SENDER), ("text", "hello")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(gateway.sent().len(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let h = harness(GatewayMode::Accept).await;

        let json: Value = h
            .client
            .get(format!("{}/health", h.base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "lead-sms");
    })
    .await
    .expect("test timed out");
}
