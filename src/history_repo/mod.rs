// SQLite sample store. One connection per call, released on every exit path.

pub mod aggregation;

use crate::error::UsageError;
use crate::models::UsageSample;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct HistoryRepo {
    opts: SqliteConnectOptions,
}

impl HistoryRepo {
    /// Resolve connect options and create parent directories. The database
    /// file itself is only touched by the per-call connections.
    pub fn new(path: &str) -> Result<Self, UsageError> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                UsageError::Persistence(format!("create {}: {}", parent.display(), e))
            })?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))
            .map_err(|e| UsageError::Persistence(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        Ok(Self { opts })
    }

    // Dropping the connection releases it, so error paths need no cleanup;
    // success paths close explicitly.
    async fn connect(&self) -> Result<SqliteConnection, UsageError> {
        Ok(self.opts.connect().await?)
    }

    /// Idempotent schema creation. An existing database file is opened as-is
    /// with no validation or migration; a file created with an incompatible
    /// prior schema surfaces as a Persistence error on first append/scan
    /// (known limitation).
    pub async fn init(&self) -> Result<(), UsageError> {
        let mut conn = self.connect().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usage (
                timestamp INTEGER,
                cpu_usage TEXT,
                memory_usage REAL,
                network_rx REAL,
                network_tx REAL
            )
            "#,
        )
        .execute(&mut conn)
        .await?;
        conn.close().await?;
        Ok(())
    }

    /// Durably persist one row. No dedup, no upsert.
    #[instrument(skip(self, sample), fields(repo = "history", operation = "append"))]
    pub async fn append(&self, sample: &UsageSample) -> Result<(), UsageError> {
        let cpu_usage = serde_json::to_string(&sample.cpu_per_core)
            .map_err(|e| UsageError::Persistence(format!("encode cpu list: {}", e)))?;
        let mut conn = self.connect().await?;
        sqlx::query(
            "INSERT INTO usage (timestamp, cpu_usage, memory_usage, network_rx, network_tx) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(sample.timestamp)
        .bind(&cpu_usage)
        .bind(sample.memory_percent)
        .bind(sample.network_rx_mib)
        .bind(sample.network_tx_mib)
        .execute(&mut conn)
        .await?;
        conn.close().await?;
        Ok(())
    }

    /// Every stored row in insertion order. An empty store yields an empty
    /// vec, not an error.
    #[instrument(skip(self), fields(repo = "history", operation = "scan_all"))]
    pub async fn scan_all(&self) -> Result<Vec<UsageSample>, UsageError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            "SELECT timestamp, cpu_usage, memory_usage, network_rx, network_tx FROM usage ORDER BY rowid",
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(parse_row(&row)?);
        }
        Ok(out)
    }
}

fn parse_row(row: &SqliteRow) -> Result<UsageSample, UsageError> {
    let timestamp: i64 = row.try_get("timestamp")?;
    let cpu_usage: String = row.try_get("cpu_usage")?;
    let memory_usage: f64 = row.try_get("memory_usage")?;
    let network_rx: f64 = row.try_get("network_rx")?;
    let network_tx: f64 = row.try_get("network_tx")?;
    let cpu_per_core: Vec<f64> = serde_json::from_str(&cpu_usage)
        .map_err(|e| UsageError::Persistence(format!("decode cpu list: {}", e)))?;
    Ok(UsageSample {
        timestamp,
        cpu_per_core,
        memory_percent: memory_usage,
        network_rx_mib: network_rx,
        network_tx_mib: network_tx,
    })
}
