use axum::{routing::get, Router};

use crate::features::auth::handler;

/// Create routes for session introspection (mounted behind auth middleware)
pub fn routes() -> Router {
    Router::new().route("/api/auth/session", get(handler::get_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_test_auth;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_session_echoes_token_claims() {
        let server = TestServer::new(with_test_auth(routes())).unwrap();

        let response = server.get("/api/auth/session").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user_id"], "user_2x7Qt");
        assert_eq!(body["data"]["role"], "authenticated");
    }
}
