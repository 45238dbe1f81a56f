//! libSQL backend: async `LeadStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::conversation::LeadRecord;
use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{LeadStore, StoredLead};

/// Column order used by `row_to_lead`.
const LEAD_COLUMNS: &str = "id, name, email, phone, sender_phone, created_at";

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    // Never read, but must outlive `conn`: dropping the database handle
    // closes the underlying file or in-memory instance.
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db)?;
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let backend = Self::from_database(db)?;
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Map a libsql Row to a StoredLead. Column order matches LEAD_COLUMNS.
fn row_to_lead(row: &libsql::Row) -> Result<StoredLead, DatabaseError> {
    let field = |e: libsql::Error| DatabaseError::Query(format!("row parse: {e}"));

    let id_str: String = row.get(0).map_err(field)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Query(format!("invalid lead id {id_str}: {e}")))?;
    let created_str: String = row.get(5).map_err(field)?;

    Ok(StoredLead {
        id,
        name: row.get(1).map_err(field)?,
        email: row.get(2).map_err(field)?,
        phone: row.get(3).map_err(field)?,
        sender_phone: row.get(4).map_err(field)?,
        created_at: parse_datetime(&created_str),
    })
}

#[async_trait]
impl LeadStore for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn insert_lead(
        &self,
        lead: &LeadRecord,
        sender_phone: &str,
    ) -> Result<StoredLead, DatabaseError> {
        let stored = StoredLead {
            id: Uuid::new_v4(),
            name: lead.name().to_string(),
            email: lead.email().to_string(),
            phone: lead.phone().to_string(),
            sender_phone: sender_phone.to_string(),
            created_at: Utc::now(),
        };

        self.conn()
            .execute(
                "INSERT INTO leads (id, name, email, phone, sender_phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    stored.id.to_string(),
                    stored.name.as_str(),
                    stored.email.as_str(),
                    stored.phone.as_str(),
                    stored.sender_phone.as_str(),
                    stored.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("insert_lead: {e}")))?;

        debug!(id = %stored.id, sender = sender_phone, "Lead inserted into DB");
        Ok(stored)
    }

    async fn list_leads(&self, limit: usize) -> Result<Vec<StoredLead>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {LEAD_COLUMNS} FROM leads ORDER BY rowid DESC LIMIT ?1"
                ),
                params![limit as i64],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_leads: {e}")))?;

        let mut leads = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("list_leads: {e}")))?
        {
            leads.push(row_to_lead(&row)?);
        }
        Ok(leads)
    }

    async fn count_leads(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM leads", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("count_leads: {e}")))?;

        match rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("count_leads: {e}")))?
        {
            Some(row) => {
                let count: i64 = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("count_leads: {e}")))?;
                Ok(count as u64)
            }
            None => Ok(0),
        }
    }
}
