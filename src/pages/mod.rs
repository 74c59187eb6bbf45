pub(crate) mod article;
pub(crate) mod home;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::partials;

/// Route-level failure, rendered by the boundary partials.
#[derive(Debug)]
pub(crate) enum PageError {
    /// Unknown folder or failed article load.
    NotFound,
    /// The load task panicked.
    Internal,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (
                StatusCode::NOT_FOUND,
                partials::boundary::not_found(StatusCode::NOT_FOUND),
            )
                .into_response(),
            PageError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                partials::boundary::error(),
            )
                .into_response(),
        }
    }
}

/// Fallback for routes nothing else matched.
pub(crate) async fn not_found() -> PageError {
    PageError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_response() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("reading body");
        let body = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(body.contains("Article was not found"));
        assert!(body.contains("404 Not Found"));
    }

    #[tokio::test]
    async fn internal_response_discloses_nothing() {
        let response = PageError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("reading body");
        let body = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(body.contains("Something went wrong."));
    }
}
