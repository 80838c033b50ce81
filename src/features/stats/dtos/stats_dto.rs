use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate statistics over a user's full entry history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JournalStatsDto {
    /// Total number of entries
    pub total_entries: i64,
    /// Consecutive days with at least one entry, counted back from today
    /// (alive if today or yesterday has an entry)
    pub current_streak: i64,
    /// Longest run of consecutive calendar dates across all history
    pub longest_streak: i64,
    /// Mean whitespace-delimited word count per caption, rounded
    pub average_words_per_entry: i64,
}

impl JournalStatsDto {
    pub fn zero() -> Self {
        Self {
            total_entries: 0,
            current_streak: 0,
            longest_streak: 0,
            average_words_per_entry: 0,
        }
    }
}
