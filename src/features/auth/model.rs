use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity attached to a request after bearer-token validation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Identity-provider subject; owner key for all entry rows and photo keys
    pub user_id: String,
    /// Role claim from the session token, when the template sets one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Token expiry (epoch seconds)
    pub expires_at: u64,
}
