//! `LeadStore` trait: create-only persistence for captured leads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::conversation::LeadRecord;
use crate::error::DatabaseError;

/// A persisted lead row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredLead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Phone number the SMS came from (may differ from the submitted phone).
    pub sender_phone: String,
    pub created_at: DateTime<Utc>,
}

/// Backend-agnostic lead persistence. Leads are never updated or deleted.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Persist a lead verbatim. Returns the stored row.
    async fn insert_lead(
        &self,
        lead: &LeadRecord,
        sender_phone: &str,
    ) -> Result<StoredLead, DatabaseError>;

    /// Most recent leads first, up to `limit`.
    async fn list_leads(&self, limit: usize) -> Result<Vec<StoredLead>, DatabaseError>;

    /// Total number of stored leads.
    async fn count_leads(&self) -> Result<u64, DatabaseError>;
}
