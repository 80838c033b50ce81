use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::stats::dtos::JournalStatsDto;
use crate::features::stats::services::StatsService;
use crate::shared::types::ApiResponse;

/// Streak and aggregate statistics over the caller's full history
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Journal statistics", body = ApiResponse<JournalStatsDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    user: AuthenticatedUser,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<JournalStatsDto>>> {
    let stats = service.get_stats(&user.user_id).await?;

    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
