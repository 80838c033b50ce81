use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    Json,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::entries::dtos::{
    format_from_content_type, is_photo_type_allowed, CalendarDayDto, ClearEntriesResponseDto,
    CreateEntryDto, CreateEntryForm, DeleteEntryResponseDto, EntryResponseDto, ALLOWED_PHOTO_TYPES,
};
use crate::features::entries::services::{EntryService, PhotoUpload};
use crate::shared::constants::MAX_PHOTO_SIZE;
use crate::shared::types::{ApiResponse, Meta};

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", s)))
}

/// Create a journal entry
///
/// Accepts multipart/form-data with:
/// - `photo`: The photo to attach (required)
/// - `caption`: Free-text reflection, up to 280 characters (optional)
/// - `date`: Calendar date YYYY-MM-DD (optional, defaults to today)
///
/// A day holds at most 10 entries; the 11th attempt is rejected before any
/// photo bytes reach storage.
#[utoipa::path(
    post,
    path = "/api/entries",
    tag = "entries",
    request_body(
        content = CreateEntryDto,
        content_type = "multipart/form-data",
        description = "Entry form with photo, optional caption and date",
    ),
    responses(
        (status = 201, description = "Entry created", body = ApiResponse<EntryResponseDto>),
        (status = 400, description = "Invalid photo or validation error"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Daily entry limit reached"),
        (status = 413, description = "Photo too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_entry(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<EntryResponseDto>>), AppError> {
    let mut photo_data: Option<Vec<u8>> = None;
    let mut photo_filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut caption = String::new();
    let mut date_field: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "photo" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read photo bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read photo data: {}", e))
                })?;

                photo_data = Some(data.to_vec());
                photo_filename = Some(fname);
                content_type = Some(ct);
            }
            "caption" => {
                caption = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read caption field: {}", e))
                })?;
            }
            "date" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read date field: {}", e))
                })?;
                if !text.is_empty() {
                    date_field = Some(text);
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate text fields
    let form = CreateEntryForm {
        caption,
        date: date_field,
    };
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Validate the photo
    let photo_data =
        photo_data.ok_or_else(|| AppError::BadRequest("Photo is required".to_string()))?;
    let photo_filename =
        photo_filename.ok_or_else(|| AppError::BadRequest("Photo filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    if photo_data.len() > MAX_PHOTO_SIZE {
        return Err(AppError::BadRequest(format!(
            "Photo too large. Maximum size is {} bytes ({} MB)",
            MAX_PHOTO_SIZE,
            MAX_PHOTO_SIZE / 1024 / 1024
        )));
    }

    if !is_photo_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "Photo type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_PHOTO_TYPES.join(", ")
        )));
    }

    let format = format_from_content_type(&content_type)
        .ok_or_else(|| AppError::BadRequest("Unrecognized photo format".to_string()))?;

    let date = match &form.date {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let entry = service
        .create_entry(
            &user.user_id,
            date,
            form.caption,
            PhotoUpload {
                data: photo_data,
                filename: photo_filename,
                content_type,
                format: format.to_string(),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(entry.into()), None, None)),
    ))
}

/// List all entries for the caller, newest first
#[utoipa::path(
    get,
    path = "/api/entries",
    tag = "entries",
    responses(
        (status = 200, description = "All entries", body = ApiResponse<Vec<EntryResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_entries(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
) -> Result<Json<ApiResponse<Vec<EntryResponseDto>>>, AppError> {
    let entries = service.get_entries(&user.user_id).await?;
    let total = entries.len() as i64;
    let data: Vec<EntryResponseDto> = entries.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// List the caller's entries for one date, in capture order
#[utoipa::path(
    get,
    path = "/api/entries/date/{date}",
    tag = "entries",
    params(
        ("date" = String, Path, description = "Calendar date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Entries for the date", body = ApiResponse<Vec<EntryResponseDto>>),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_entries_for_date(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
    Path(date): Path<String>,
) -> Result<Json<ApiResponse<Vec<EntryResponseDto>>>, AppError> {
    let date = parse_date(&date)?;
    let entries = service.get_entries_for_date(&user.user_id, date).await?;
    let total = entries.len() as i64;
    let data: Vec<EntryResponseDto> = entries.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// List today's entries for the caller
#[utoipa::path(
    get,
    path = "/api/entries/today",
    tag = "entries",
    responses(
        (status = 200, description = "Today's entries", body = ApiResponse<Vec<EntryResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_today_entries(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
) -> Result<Json<ApiResponse<Vec<EntryResponseDto>>>, AppError> {
    let today = Utc::now().date_naive();
    let entries = service.get_entries_for_date(&user.user_id, today).await?;
    let total = entries.len() as i64;
    let data: Vec<EntryResponseDto> = entries.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Per-date entry counts for one month (calendar dots)
#[utoipa::path(
    get,
    path = "/api/entries/calendar/{year}/{month}",
    tag = "entries",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Calendar month (1-12)")
    ),
    responses(
        (status = 200, description = "Entry counts per date", body = ApiResponse<Vec<CalendarDayDto>>),
        (status = 400, description = "Invalid year/month"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_calendar(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<ApiResponse<Vec<CalendarDayDto>>>, AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::BadRequest(format!("Invalid month: {}", month)));
    }

    let rows = service
        .get_calendar_counts(&user.user_id, year, month)
        .await?;

    let data: Vec<CalendarDayDto> = rows
        .into_iter()
        .map(|(date, entry_count)| CalendarDayDto {
            date: date.format("%Y-%m-%d").to_string(),
            entry_count,
        })
        .collect();

    Ok(Json(ApiResponse::success(Some(data), None, None)))
}

/// Export the caller's full entry history as a JSON download
#[utoipa::path(
    get,
    path = "/api/entries/export",
    tag = "entries",
    responses(
        (status = 200, description = "Entry history export", body = Vec<EntryResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_entries(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
) -> Result<([(header::HeaderName, String); 1], Json<Vec<EntryResponseDto>>), AppError> {
    let entries = service.get_entries(&user.user_id).await?;
    let data: Vec<EntryResponseDto> = entries.into_iter().map(Into::into).collect();

    let filename = format!(
        "quietroom-entries-{}.json",
        Utc::now().date_naive().format("%Y-%m-%d")
    );

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )],
        Json(data),
    ))
}

/// Delete one entry and its photo
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    tag = "entries",
    params(
        ("id" = Uuid, Path, description = "Entry identifier")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = ApiResponse<DeleteEntryResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Entry not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_entry(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteEntryResponseDto>>, AppError> {
    service.delete_entry(&user.user_id, id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteEntryResponseDto { deleted: true }),
        Some("Entry deleted successfully".to_string()),
        None,
    )))
}

/// Delete every entry (and photo) the caller has
#[utoipa::path(
    delete,
    path = "/api/entries",
    tag = "entries",
    responses(
        (status = 200, description = "All entries deleted", body = ApiResponse<ClearEntriesResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn clear_entries(
    user: AuthenticatedUser,
    State(service): State<Arc<EntryService>>,
) -> Result<Json<ApiResponse<ClearEntriesResponseDto>>, AppError> {
    let deleted = service.clear_entries(&user.user_id).await?;

    Ok(Json(ApiResponse::success(
        Some(ClearEntriesResponseDto { deleted }),
        Some("All entries cleared".to_string()),
        None,
    )))
}
