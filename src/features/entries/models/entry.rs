use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a journal entry
#[derive(Debug, Clone, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    /// Position of this entry within its day, 1-indexed and never compacted
    pub entry_order: i32,
    pub photo_url: String,
    pub photo_filename: String,
    pub photo_size: i64,
    pub photo_format: String,
    pub caption: String,
    /// Creation instant in epoch milliseconds
    pub timestamp: i64,
    pub created_at: DateTime<Utc>,
}
