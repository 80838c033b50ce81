use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::features::entries::handlers;
use crate::features::entries::services::EntryService;
use crate::shared::constants::MAX_PHOTO_SIZE;

/// Create routes for the entries feature
pub fn routes(service: Arc<EntryService>) -> Router {
    Router::new()
        .route(
            "/api/entries",
            post(handlers::create_entry)
                .get(handlers::list_entries)
                .delete(handlers::clear_entries),
        )
        .route("/api/entries/today", get(handlers::get_today_entries))
        .route("/api/entries/export", get(handlers::export_entries))
        .route("/api/entries/date/{date}", get(handlers::get_entries_for_date))
        .route(
            "/api/entries/calendar/{year}/{month}",
            get(handlers::get_calendar),
        )
        .route("/api/entries/{id}", delete(handlers::delete_entry))
        // Allow body size up to MAX_PHOTO_SIZE plus buffer for multipart overhead
        .layer(DefaultBodyLimit::max(MAX_PHOTO_SIZE + 1024 * 1024))
        .with_state(service)
}
