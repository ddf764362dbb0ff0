//! Connection acquisition for the expense store.
//!
//! By default every call to [`Database::acquire`] opens a brand new
//! connection which is closed again on [`DbConnection::release`]. Setting
//! `DB_POOL_SIZE` switches to a bounded pool instead; the retry loop is the
//! same in both modes.

use std::{
    ops::{Deref, DerefMut},
    str::FromStr,
    time::Duration,
};

use sqlx::{
    migrate::MigrateDatabase,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Connection, Pool, Sqlite, SqliteConnection,
};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::{config::Config, error::StoreError};

const CREATE_EXPENSES_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS expenses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        description TEXT NOT NULL,
        amount REAL NOT NULL,
        date TEXT NOT NULL
    );"#;

#[derive(Debug, Clone)]
pub struct Database {
    url: String,
    options: SqliteConnectOptions,
    pool: Option<Pool<Sqlite>>,
    attempts: u32,
    retry_delay: Duration,
}

/// A live connection, either opened for this request alone or borrowed
/// from the pool.
#[derive(Debug)]
pub enum DbConnection {
    Fresh(SqliteConnection),
    Pooled(PoolConnection<Sqlite>),
}

impl Database {
    /// Parse the connection string. Nothing is connected yet.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?;

        // Lazy so that an unreachable store does not prevent startup.
        let pool = config.db_pool_size.map(|size| {
            SqlitePoolOptions::new()
                .max_connections(size)
                .connect_lazy_with(options.clone())
        });

        Ok(Self {
            url: config.database_url.clone(),
            options,
            pool,
            attempts: config.db_connect_attempts.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// Obtain a connection, retrying a fixed number of times with a fixed
    /// delay in between.
    pub async fn acquire(&self) -> Result<DbConnection, StoreError> {
        let mut attempt = 1;
        loop {
            let result = match &self.pool {
                Some(pool) => pool.acquire().await.map(DbConnection::Pooled),
                None => SqliteConnection::connect_with(&self.options)
                    .await
                    .map(DbConnection::Fresh),
            };

            match result {
                Ok(conn) => return Ok(conn),
                Err(source) if attempt >= self.attempts => {
                    return Err(StoreError::Unavailable {
                        attempts: self.attempts,
                        source,
                    });
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        "Unable to connect to the database, retrying... ({} retries left)",
                        self.attempts - attempt
                    );
                    sleep(self.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Acquire a connection and hand it straight back.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.acquire().await?;
        conn.release().await;
        Ok(())
    }

    /// Create the database and the expenses table if they do not exist yet.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        if !Sqlite::database_exists(&self.url).await.unwrap_or(false) {
            info!("Creating database {}", self.url);
            Sqlite::create_database(&self.url).await?;
        }

        let mut conn = self.acquire().await?;
        sqlx::query(CREATE_EXPENSES_TABLE)
            .execute(&mut *conn)
            .await?;
        conn.release().await;

        info!("Expenses table is ready");
        Ok(())
    }
}

impl DbConnection {
    /// Close a per-request connection or return a pooled one.
    pub async fn release(self) {
        match self {
            DbConnection::Fresh(conn) => {
                if let Err(err) = conn.close().await {
                    warn!(error = %err, "failed to close database connection");
                }
            }
            DbConnection::Pooled(conn) => {
                debug!("returning connection to pool");
                drop(conn);
            }
        }
    }
}

impl Deref for DbConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        match self {
            DbConnection::Fresh(conn) => conn,
            DbConnection::Pooled(conn) => &**conn,
        }
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        match self {
            DbConnection::Fresh(conn) => conn,
            DbConnection::Pooled(conn) => &mut **conn,
        }
    }
}
