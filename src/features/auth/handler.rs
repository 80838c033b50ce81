use axum::Json;

use crate::core::error::Result;
use crate::features::auth::dto::SessionResponseDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Inspect the current session
///
/// Echoes the standard claims of the validated bearer token. Useful for
/// verifying identity-provider wiring from a client.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current session claims", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(user: AuthenticatedUser) -> Result<Json<ApiResponse<SessionResponseDto>>> {
    Ok(Json(ApiResponse::success(
        Some(SessionResponseDto {
            user_id: user.user_id,
            role: user.role,
            expires_at: user.expires_at,
        }),
        None,
        None,
    )))
}
