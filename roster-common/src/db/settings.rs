//! Settings database operations
//!
//! Key/value accessors for the settings table.

use rand::Rng;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::{Error, Result};

const TOKEN_SECRET_KEY: &str = "token_secret";

/// Load the token signing secret, generating and persisting one on first use
pub async fn get_or_init_token_secret(db: &Pool<Sqlite>) -> Result<String> {
    if let Some(secret) = get_setting::<String>(db, TOKEN_SECRET_KEY).await? {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }

    let secret = generate_secret();
    set_setting(db, TOKEN_SECRET_KEY, &secret).await?;
    info!("Generated new token signing secret");
    Ok(secret)
}

/// 32 random bytes, hex encoded
pub fn generate_secret() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Generic setting getter
pub async fn get_setting<T>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(Option<String>,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    match row {
        Some((Some(value),)) => {
            let parsed = value
                .parse::<T>()
                .map_err(|e| Error::Config(format!("Parse setting {key} failed: {e}")))?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

/// Generic setting setter (upsert)
pub async fn set_setting<T>(db: &Pool<Sqlite>, key: &str, value: T) -> Result<()>
where
    T: std::fmt::Display,
{
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
