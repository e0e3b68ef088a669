//! Keyed blob storage for session snapshots.

use sqlx::SqlitePool;

use crate::Result;

/// Create or update a blob entry.
pub async fn save_blob(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO session_blobs (key, value)
        VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a blob entry by key. Absence of the key reads as `None`.
pub async fn load_blob(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let record = sqlx::query_scalar::<_, String>(
        r#"
        SELECT value
        FROM session_blobs
        WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Delete a blob entry.
pub async fn delete_blob(pool: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM session_blobs
        WHERE key = ?
        "#,
    )
    .bind(key)
    .execute(pool)
    .await?;

    Ok(())
}

/// Clear all blob entries.
pub async fn clear_all(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM session_blobs
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
