/// Maximum number of entries a user may create per calendar day
pub const DAILY_ENTRY_LIMIT: i64 = 10;

/// Fixed rejection message when the daily limit is reached
pub const DAILY_LIMIT_MESSAGE: &str = "Daily limit reached. You can add up to 10 photos per day.";

/// Maximum caption length in characters
pub const MAX_CAPTION_CHARS: u64 = 280;

/// Maximum photo size in bytes (10MB)
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;
