use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use carrent_core::Entity;
use carrent_infra::repository::RepositoryError;

/// Every failure a controller can produce.
///
/// `NotFound` is a recovered outcome; `Repository` is an unhandled fault
/// surfaced as 500. Malformed requests never reach a handler: axum's extractor
/// rejections answer those.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Absent resource. `None` yields an empty 404 body.
    #[error("not found")]
    NotFound(Option<String>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    /// 404 carrying a diagnostic such as `booking 7 not found`.
    pub fn not_found_for<E: Entity>(id: &E::Id) -> Self {
        Self::NotFound(Some(format!("{} {} not found", E::KIND, id)))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(None) => StatusCode::NOT_FOUND.into_response(),
            ApiError::NotFound(Some(msg)) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Repository(err) => {
                tracing::error!(error = %err, "repository call failed");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "repository_error",
                    err.to_string(),
                )
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use carrent_bookings::Booking;
    use carrent_core::BookingId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn diagnostic_not_found_names_the_resource() {
        let response = ApiError::not_found_for::<Booking>(&BookingId::new(99)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "booking 99 not found");
    }

    #[tokio::test]
    async fn bare_not_found_has_empty_body() {
        let response = ApiError::NotFound(None).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn repository_faults_map_to_internal_error() {
        let err = RepositoryError::Storage("connection reset".to_string());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "repository_error");
        assert_eq!(body["message"], "storage error: connection reset");
    }
}
