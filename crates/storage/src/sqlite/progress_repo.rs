use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{
    PROGRESS_KEY, ProgressRepository, StorageError, decode_progress_record,
    encode_progress_record,
};

use super::SqliteStore;

#[async_trait]
impl ProgressRepository for SqliteStore {
    async fn load(&self) -> Result<Vec<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM progress WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let raw: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        match decode_progress_record(&raw) {
            Some(ids) => Ok(ids),
            None => {
                tracing::warn!("discarding corrupt progress record");
                sqlx::query("DELETE FROM progress WHERE key = ?1")
                    .bind(PROGRESS_KEY)
                    .execute(&self.pool)
                    .await
                    .map_err(|err| StorageError::Connection(err.to_string()))?;
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, ids: &[String]) -> Result<(), StorageError> {
        let encoded = encode_progress_record(ids)?;
        sqlx::query(
            r"
            INSERT INTO progress (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(encoded)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
