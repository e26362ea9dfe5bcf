//! Record storage
//!
//! `RecordStore` is the seam between the HTTP layer and persistence. The
//! SQLite implementation keeps hobbies as a JSON array column and relies on
//! the UNIQUE index on `email` for duplicate detection.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::model::{Person, Record, RecordId};
use crate::{Error, Result};

/// Durable keyed storage for person records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record, in creation order
    async fn find_all(&self) -> Result<Vec<Record>>;

    /// Insert one candidate; `DuplicateKey` when its email is taken
    async fn insert_one(&self, candidate: Person) -> Result<Record>;

    /// Insert all candidates atomically, returning how many were written
    ///
    /// Any collision (against stored records or within the batch) aborts the
    /// whole insert with `DuplicateKey`.
    async fn insert_many(&self, candidates: Vec<Person>) -> Result<usize>;

    /// Delete by id, returning how many rows were removed; unknown ids are ignored
    async fn delete_by_ids(&self, ids: &[RecordId]) -> Result<usize>;
}

/// `RecordStore` backed by a SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(
            r#"
            SELECT guid, first_name, middle_name, last_name, email,
                   phone1, phone2, hobbies, place, gender
            FROM records
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn insert_one(&self, candidate: Person) -> Result<Record> {
        let record = Record::new(RecordId::new(), candidate.normalized());
        insert_record(&self.pool, &record).await?;

        info!(id = %record.id, "Inserted record");
        Ok(record)
    }

    async fn insert_many(&self, candidates: Vec<Person>) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for candidate in candidates.iter().cloned() {
            let record = Record::new(RecordId::new(), candidate.normalized());
            // Dropping `tx` on error rolls back every row inserted so far
            insert_record(&mut *tx, &record).await?;
        }

        tx.commit().await?;

        info!(count = candidates.len(), "Inserted record batch");
        Ok(candidates.len())
    }

    async fn delete_by_ids(&self, ids: &[RecordId]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0u64;

        for id in ids {
            let result = sqlx::query("DELETE FROM records WHERE guid = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await?;
            deleted += result.rows_affected();
        }

        tx.commit().await?;

        let deleted = usize::try_from(deleted).map_err(|e| Error::Internal(e.to_string()))?;
        info!(requested = ids.len(), deleted, "Deleted records");
        Ok(deleted)
    }
}

async fn insert_record<'e, E>(executor: E, record: &Record) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let p = &record.person;
    let hobbies = serde_json::to_string(&p.hobbies)
        .map_err(|e| Error::Internal(format!("Failed to encode hobbies: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO records (guid, first_name, middle_name, last_name, email,
                             phone1, phone2, hobbies, place, gender)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&p.first_name)
    .bind(&p.middle_name)
    .bind(&p.last_name)
    .bind(&p.email)
    .bind(&p.phone1)
    .bind(&p.phone2)
    .bind(hobbies)
    .bind(&p.place)
    .bind(&p.gender)
    .execute(executor)
    .await
    .map_err(|e| map_insert_error(e, &p.email))?;

    debug!(id = %record.id, "Wrote record row");
    Ok(())
}

fn map_insert_error(err: sqlx::Error, email: &str) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::DuplicateKey(format!("A record with email {email} already exists"))
        }
        _ => Error::Database(err),
    }
}

fn record_from_row(row: &SqliteRow) -> Result<Record> {
    let guid: String = row.try_get("guid")?;
    let id = guid
        .parse::<RecordId>()
        .map_err(|e| Error::Internal(format!("Stored record id {guid} is invalid: {e}")))?;

    let hobbies: String = row.try_get("hobbies")?;
    let hobbies: Vec<String> = serde_json::from_str(&hobbies)
        .map_err(|e| Error::Internal(format!("Stored hobbies for {guid} are invalid: {e}")))?;

    Ok(Record::new(
        id,
        Person {
            first_name: row.try_get("first_name")?,
            middle_name: row.try_get("middle_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone1: row.try_get("phone1")?,
            phone2: row.try_get("phone2")?,
            hobbies,
            place: row.try_get("place")?,
            gender: row.try_get("gender")?,
        },
    ))
}
