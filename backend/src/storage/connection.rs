use anyhow::{Context, Result};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;

/// DbConnection owns the pool every repository shares
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if missing) the database at `url` and make sure the
    /// schema exists
    pub async fn new(url: &str, max_connections: u32, busy_timeout: Duration) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{}'", url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout)
            // the item_id reference on the ledger is declarative only
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database '{}'", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the database named in the application config
    pub async fn init(config: &AppConfig) -> Result<Self> {
        info!("Opening database {}", config.database_url);
        Self::new(
            &config.database_url,
            config.max_connections,
            Duration::from_secs(config.busy_timeout_seconds),
        )
        .await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        // a single connection keeps the shared in-memory database alive and
        // avoids shared-cache table locks between pooled connections
        Self::new(&db_url, 1, Duration::from_secs(5)).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection; waits for checked-out ones to return
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Set up the required database schema. Column sets match the data
    /// files written by earlier versions of the form, so existing files open
    /// unchanged.
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Inventory master rows, one per item_id
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                item_id TEXT PRIMARY KEY,
                item_name TEXT,
                quantity INTEGER,
                date_of_arrival DATE,
                supplier_details TEXT
            );
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create inventory table")?;

        // Append-only ledger
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory_transactions (
                transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id TEXT,
                transaction_type TEXT,
                quantity INTEGER,
                transaction_date DATE,
                FOREIGN KEY(item_id) REFERENCES inventory(item_id)
            );
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create inventory_transactions table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_inventory_transactions_item_id
            ON inventory_transactions(item_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Attendance keyed by worker only
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance (
                worker_id TEXT PRIMARY KEY,
                worker_name TEXT,
                date DATE,
                time_of_arrival TIME,
                time_of_departure TIME
            );
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create attendance table")?;

        // Attendance keyed by worker and day
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance_daily (
                worker_id TEXT NOT NULL,
                worker_name TEXT,
                date DATE NOT NULL,
                time_of_arrival TIME,
                time_of_departure TIME,
                PRIMARY KEY (worker_id, date)
            );
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create attendance_daily table")?;

        // Payments have no key; duplicates are legitimate
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                worker_id TEXT,
                worker_name TEXT,
                payment_date DATE,
                amount_paid REAL,
                payment_method TEXT
            );
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create payments table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_payments_worker_id
            ON payments(worker_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
