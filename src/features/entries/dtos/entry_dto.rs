use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::entries::models::Entry;
use crate::shared::constants::MAX_CAPTION_CHARS;
use crate::shared::validation::DATE_REGEX;

/// Create entry request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateEntryDto {
    /// The photo to attach to the entry
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photo: String,
    /// Free-text reflection, up to 280 characters
    #[schema(example = "Morning light on the kitchen table")]
    pub caption: Option<String>,
    /// Calendar date (YYYY-MM-DD); defaults to today
    #[schema(example = "2024-01-03")]
    pub date: Option<String>,
}

/// Validated text fields of the create-entry form
#[derive(Debug, Validate)]
pub struct CreateEntryForm {
    #[validate(length(
        max = MAX_CAPTION_CHARS,
        message = "Caption must be 280 characters or fewer"
    ))]
    pub caption: String,
    #[validate(regex(path = *DATE_REGEX, message = "Date must be in YYYY-MM-DD format"))]
    pub date: Option<String>,
}

/// Response DTO for a journal entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryResponseDto {
    /// Unique identifier for the entry
    pub id: Uuid,
    /// Calendar date of the entry (YYYY-MM-DD)
    pub date: String,
    /// Position within the day (1-10)
    pub entry_order: i32,
    /// Public URL of the photo
    pub photo_url: String,
    /// Original filename as uploaded
    pub photo_filename: String,
    /// Photo size in bytes
    pub photo_size: i64,
    /// Photo format (jpg, png, webp, gif)
    pub photo_format: String,
    /// Free-text reflection
    pub caption: String,
    /// Creation instant (epoch milliseconds)
    pub timestamp: i64,
}

impl From<Entry> for EntryResponseDto {
    fn from(e: Entry) -> Self {
        Self {
            id: e.id,
            date: e.date.format("%Y-%m-%d").to_string(),
            entry_order: e.entry_order,
            photo_url: e.photo_url,
            photo_filename: e.photo_filename,
            photo_size: e.photo_size,
            photo_format: e.photo_format,
            caption: e.caption,
            timestamp: e.timestamp,
        }
    }
}

/// One day of the calendar view: a date and how many entries it holds
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalendarDayDto {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Number of entries on that date
    pub entry_count: i64,
}

/// Response DTO for single-entry deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteEntryResponseDto {
    /// Confirmation that the entry was deleted
    pub deleted: bool,
}

/// Response DTO for clear-all
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearEntriesResponseDto {
    /// Number of entries removed
    pub deleted: i64,
}

/// Allowed MIME types for photo uploads
pub const ALLOWED_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Check if a MIME type is an allowed photo type
pub fn is_photo_type_allowed(content_type: &str) -> bool {
    ALLOWED_PHOTO_TYPES.contains(&content_type)
}

/// Get photo format (file extension) from content type
pub fn format_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_length_validation() {
        let ok = CreateEntryForm {
            caption: "a".repeat(280),
            date: None,
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateEntryForm {
            caption: "a".repeat(281),
            date: None,
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_date_shape_validation() {
        let ok = CreateEntryForm {
            caption: String::new(),
            date: Some("2024-01-03".to_string()),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateEntryForm {
            caption: String::new(),
            date: Some("03/01/2024".to_string()),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_photo_type_allowlist() {
        assert!(is_photo_type_allowed("image/jpeg"));
        assert!(is_photo_type_allowed("image/webp"));
        assert!(!is_photo_type_allowed("application/pdf"));
        assert!(!is_photo_type_allowed("video/mp4"));
    }

    #[test]
    fn test_format_from_content_type() {
        assert_eq!(format_from_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(format_from_content_type("image/png"), Some("png"));
        assert_eq!(format_from_content_type("text/plain"), None);
    }

    #[test]
    fn test_entry_response_date_formatting() {
        let entry = Entry {
            id: Uuid::nil(),
            user_id: "u".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            entry_order: 2,
            photo_url: "http://localhost:9000/journal-entries/u/1-a.jpg".to_string(),
            photo_filename: "a.jpg".to_string(),
            photo_size: 123,
            photo_format: "jpg".to_string(),
            caption: "hi".to_string(),
            timestamp: 1_704_240_000_000,
            created_at: chrono::Utc::now(),
        };

        let dto = EntryResponseDto::from(entry);
        assert_eq!(dto.date, "2024-01-03");
        assert_eq!(dto.entry_order, 2);
    }
}
