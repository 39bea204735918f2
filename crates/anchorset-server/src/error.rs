// HTTP error mapping for the Anchorset server
// AnchorsetError lives in anchorset-common; the actix wrapper has to live here

use std::fmt::{Display, Formatter};

use actix_web::{HttpResponse, http::StatusCode, http::header};

pub use anchorset_common::AnchorsetError;

use crate::model::response::{ErrorResult, json_response};

pub const STORE_NOT_CONFIGURED: &str = "Store not configured.";
pub const BASIC_REALM: &str = "Basic realm=\"Calculator Admin\"";

// Local wrapper for application errors to implement actix-web error handling
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<AnchorsetError> for AppError {
    fn from(value: AnchorsetError) -> Self {
        AppError {
            inner: anyhow::Error::from(value),
        }
    }
}

impl AppError {
    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// `{error, detail}` for failures the caller cannot fix: the outermost
    /// context names the operation, the root cause is the store message
    fn internal_error_body(&self) -> ErrorResult {
        ErrorResult::with_detail(self.inner.to_string(), self.inner.root_cause().to_string())
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.downcast_ref::<AnchorsetError>() {
            Some(AnchorsetError::IllegalArgument(_)) => StatusCode::BAD_REQUEST,
            Some(AnchorsetError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(AnchorsetError::AuthError(_)) => StatusCode::UNAUTHORIZED,
            Some(AnchorsetError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Some(AnchorsetError::DatabaseError(_)) | Some(AnchorsetError::InternalError(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if let Some(e) = self.downcast_ref::<AnchorsetError>()
            && e.is_client_error()
        {
            tracing::debug!(status = status.as_u16(), error = %e, "Request rejected");
        }
        match self.downcast_ref::<AnchorsetError>() {
            Some(AnchorsetError::IllegalArgument(message))
            | Some(AnchorsetError::NotFound(message)) => {
                json_response(status, ErrorResult::new(message))
            }
            Some(AnchorsetError::AuthError(message)) => HttpResponse::Unauthorized()
                .insert_header((header::CACHE_CONTROL, crate::model::response::NO_STORE))
                .insert_header((header::WWW_AUTHENTICATE, BASIC_REALM))
                .json(ErrorResult::new(message)),
            Some(AnchorsetError::StoreUnavailable(reason)) => {
                tracing::warn!(reason = %reason, "Mutation rejected without a store");
                json_response(status, ErrorResult::new(STORE_NOT_CONFIGURED))
            }
            _ => {
                let body = self.internal_error_body();
                tracing::error!(error = %body.error, detail = ?body.detail, "Request failed");
                json_response(status, body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use anyhow::Context;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AnchorsetError::illegal_argument("bad"), StatusCode::BAD_REQUEST),
            (AnchorsetError::not_found("gone"), StatusCode::NOT_FOUND),
            (
                AnchorsetError::AuthError("Invalid credentials.".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AnchorsetError::StoreUnavailable("none".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AnchorsetError::DatabaseError("locked".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let app_err = AppError::from(err);
            assert_eq!(app_err.status_code(), status);
            assert_eq!(app_err.error_response().status(), status);
        }
    }

    #[test]
    fn test_context_keeps_typed_error() {
        let err: anyhow::Result<()> =
            Err(AnchorsetError::not_found("Product PE not found.")).context("Unable to update.");
        let app_err = AppError::from(err.unwrap_err());
        assert_eq!(app_err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_carries_detail() {
        let err: anyhow::Result<()> =
            Err(anyhow::anyhow!("database is locked")).context("Unable to update anchor.");
        let app_err = AppError::from(err.unwrap_err());

        let body = app_err.internal_error_body();
        assert_eq!(body.error, "Unable to update anchor.");
        assert_eq!(body.detail.as_deref(), Some("database is locked"));
        assert_eq!(app_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unauthorized_challenge() {
        let resp =
            AppError::from(AnchorsetError::AuthError("Authentication required.".to_string()))
                .error_response();
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_REALM
        );
    }
}
