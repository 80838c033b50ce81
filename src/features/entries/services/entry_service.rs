use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::entries::models::Entry;
use crate::modules::storage::PhotoStorageClient;
use crate::shared::constants::{DAILY_ENTRY_LIMIT, DAILY_LIMIT_MESSAGE};

/// A validated photo ready for upload
pub struct PhotoUpload {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
    /// Format string stored on the row (jpg, png, webp, gif)
    pub format: String,
}

/// Service for journal entry operations
pub struct EntryService {
    pool: PgPool,
    storage: Arc<PhotoStorageClient>,
}

impl EntryService {
    pub fn new(pool: PgPool, storage: Arc<PhotoStorageClient>) -> Self {
        Self { pool, storage }
    }

    /// Reject creation once the day already holds the limit.
    ///
    /// Runs before any storage traffic so a rejected attempt never uploads.
    fn check_daily_limit(count: i64) -> Result<()> {
        if count >= DAILY_ENTRY_LIMIT {
            return Err(AppError::Conflict(DAILY_LIMIT_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Order assigned to the next entry of a day holding `count` entries.
    ///
    /// 1-indexed, derived from the live count. Deleting earlier entries does
    /// not renumber survivors, so orders can repeat across time.
    fn next_entry_order(count: i64) -> i32 {
        (count + 1) as i32
    }

    /// Count existing entries for a (user, date) pair
    pub async fn count_entries_for_date(&self, user_id: &str, date: NaiveDate) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM entries WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Create a new entry for the given date
    ///
    /// Read-then-write admission sequence: count, reject at the limit,
    /// upload the photo, insert the row. There is deliberately no
    /// transaction around the count and insert; a same-user double-submit
    /// race is accepted.
    pub async fn create_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        caption: String,
        photo: PhotoUpload,
    ) -> Result<Entry> {
        let count = self.count_entries_for_date(user_id, date).await?;
        Self::check_daily_limit(count)?;
        let entry_order = Self::next_entry_order(count);

        let timestamp = Utc::now().timestamp_millis();
        let photo_size = photo.data.len() as i64;

        // Upload the photo first; a failed upload aborts with no row written.
        // The reverse failure (row insert after a successful upload) leaves
        // the object behind.
        let key = PhotoStorageClient::generate_object_key(user_id, timestamp, &photo.format);
        let photo_url = self
            .storage
            .upload(&key, photo.data, &photo.content_type)
            .await?;

        debug!("Photo uploaded for entry: {}", key);

        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (
                user_id, date, entry_order,
                photo_url, photo_filename, photo_size, photo_format,
                caption, timestamp
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(entry_order)
        .bind(&photo_url)
        .bind(&photo.filename)
        .bind(photo_size)
        .bind(&photo.format)
        .bind(&caption)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert entry: {:?}", e);
            AppError::Database(e)
        })?;

        info!(
            "Entry created: id={}, date={}, entry_order={}",
            entry.id, entry.date, entry.entry_order
        );

        Ok(entry)
    }

    /// All entries for a user, newest first
    pub async fn get_entries(&self, user_id: &str) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE user_id = $1 ORDER BY timestamp DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Entries for one date, in the order they were captured
    pub async fn get_entries_for_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT * FROM entries
            WHERE user_id = $1 AND date = $2
            ORDER BY entry_order ASC, timestamp ASC
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Per-date entry counts for one calendar month
    pub async fn get_calendar_counts(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::BadRequest("Invalid year/month".to_string()))?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| AppError::BadRequest("Invalid year/month".to_string()))?;

        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT date, COUNT(*) FROM entries
            WHERE user_id = $1 AND date >= $2 AND date < $3
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(user_id)
        .bind(first)
        .bind(next_month)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete one entry and its photo
    ///
    /// The photo delete is best-effort: a storage failure is logged and the
    /// row is removed anyway, matching the product's manual-retry stance.
    pub async fn delete_entry(&self, user_id: &str, entry_id: Uuid) -> Result<()> {
        let entry = sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE id = $1 AND user_id = $2",
        )
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;

        self.delete_photo_for(&entry).await;

        sqlx::query("DELETE FROM entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!("Entry deleted: id={}", entry_id);

        Ok(())
    }

    /// Delete every entry (and photo) a user has
    ///
    /// # Returns
    /// The number of entries removed
    pub async fn clear_entries(&self, user_id: &str) -> Result<i64> {
        let entries = sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        for entry in &entries {
            self.delete_photo_for(entry).await;
        }

        let result = sqlx::query("DELETE FROM entries WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() as i64;
        info!("Cleared {} entries for user", deleted);

        Ok(deleted)
    }

    /// Best-effort removal of an entry's photo, guarded by the owner prefix
    async fn delete_photo_for(&self, entry: &Entry) {
        let Some(key) = self.storage.extract_key_from_url(&entry.photo_url) else {
            warn!(
                "Photo URL does not match storage endpoints, skipping delete: {}",
                entry.photo_url
            );
            return;
        };

        if !PhotoStorageClient::is_owned_by(&key, &entry.user_id) {
            warn!("Photo key '{}' is outside the owner's prefix, skipping delete", key);
            return;
        }

        if let Err(e) = self.storage.delete(&key).await {
            warn!("Failed to delete photo '{}': {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_limit_admits_below_ten() {
        for count in 0..DAILY_ENTRY_LIMIT {
            assert!(EntryService::check_daily_limit(count).is_ok());
        }
    }

    #[test]
    fn test_daily_limit_rejects_eleventh_attempt() {
        let err = EntryService::check_daily_limit(10).unwrap_err();
        match err {
            AppError::Conflict(msg) => assert_eq!(msg, DAILY_LIMIT_MESSAGE),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_order_is_one_indexed() {
        assert_eq!(EntryService::next_entry_order(0), 1);
        assert_eq!(EntryService::next_entry_order(4), 5);
        assert_eq!(EntryService::next_entry_order(9), 10);
    }
}
