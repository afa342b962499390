use crate::models::api::ErrorResponse;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use tracing::debug;

pub async fn fallback_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "No route matched");

    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::body_json;

    #[tokio::test]
    async fn test_fallback_is_json_404() {
        let response = fallback_handler(Uri::from_static("/api/nope")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = body_json(response).await;
        assert!(!body.success);
        assert_eq!(body.error, "Not found");
    }
}
