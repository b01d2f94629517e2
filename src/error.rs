use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};

use crate::http::pages;

/// Request-level error taxonomy. Notification failures never appear here;
/// they are swallowed inside the notifier after being logged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed intake field; nothing was written.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// Store unreachable or write failure; reported generically to the client.
    #[error("database error: {0}")]
    Persistence(#[from] DbErr),

    /// Unknown record id on an admin page.
    #[error("no such request: {0}")]
    NotFound(i64),

    /// No privileged session; admin routes redirect to the login prompt
    /// instead of failing with an error status.
    #[error("admin session required")]
    AuthRequired,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(reason) => {
                // Like persistence failures, the cause stays server-side;
                // the submitter sees a generic prompt.
                warn!("Rejected submission: {reason}");
                (
                    StatusCode::BAD_REQUEST,
                    Html(pages::error_page(
                        "We couldn't accept that submission",
                        "Please check the required fields and try again.",
                    )),
                )
                    .into_response()
            }
            ApiError::Persistence(err) => {
                // Cause stays server-side; the client sees a generic message.
                error!("Persistence failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(pages::error_page(
                        "Something went wrong",
                        "Please try again in a moment.",
                    )),
                )
                    .into_response()
            }
            ApiError::NotFound(id) => {
                warn!("Unknown request id {id}");
                (
                    StatusCode::NOT_FOUND,
                    Html(pages::error_page(
                        "Not found",
                        "That request does not exist.",
                    )),
                )
                    .into_response()
            }
            ApiError::AuthRequired => Redirect::to("/admin/login").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::LOCATION;

    #[tokio::test]
    async fn validation_response_hides_the_field_level_cause() {
        let response =
            ApiError::Validation("The name field is required.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("accept that submission"));
        assert!(body.contains("check the required fields"));
        assert!(!body.contains("name field"));
    }

    #[test]
    fn auth_error_redirects_to_login_instead_of_failing() {
        let response = ApiError::AuthRequired.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/admin/login");
    }
}
