//! SQLite session persistence for the Provizyon storefront.
//!
//! This crate stores independently-keyed JSON blobs (cart snapshot,
//! conversation log) that survive process restarts, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use session_store::{blob, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:provizyon.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     blob::save_blob(db.pool(), "proviz_cart", "[]").await?;
//!     let cart = blob::load_blob(db.pool(), "proviz_cart").await?;
//!     assert_eq!(cart.as_deref(), Some("[]"));
//!
//!     Ok(())
//! }
//! ```

pub mod blob;
pub mod error;

pub use error::{Result, StoreError};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    ///
    /// The storefront is single-owner so contention is low; a small pool
    /// covers overlapping persistence writes.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> session_store::Result<()> {
    /// // File database
    /// let db = session_store::Database::connect("sqlite:data/provizyon.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = session_store::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
