use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response DTO for session introspection
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponseDto {
    /// Identity-provider subject for the caller
    pub user_id: String,
    /// Role claim from the session token
    pub role: Option<String>,
    /// Token expiry (epoch seconds)
    pub expires_at: u64,
}
