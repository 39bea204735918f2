// HTTP Basic authentication gate for the admin API
// Credentials come from AppState; when none are configured the gate is open

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{Method, header},
    web::Data,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use futures::future::LocalBoxFuture;

use crate::{
    error::{AnchorsetError, AppError},
    model::{AdminCredentials, AppState},
};

const BASIC_PREFIX: &str = "Basic ";

pub const AUTHENTICATION_REQUIRED: &str = "Authentication required.";
pub const INVALID_AUTHORIZATION_HEADER: &str = "Invalid authorization header.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Check an `Authorization` header value against the configured credentials
pub fn authorize(
    authorization: Option<&str>,
    credentials: &AdminCredentials,
) -> Result<(), &'static str> {
    if credentials.is_open() {
        return Ok(());
    }

    let encoded = authorization
        .and_then(|value| value.strip_prefix(BASIC_PREFIX))
        .ok_or(AUTHENTICATION_REQUIRED)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| INVALID_AUTHORIZATION_HEADER)?;
    let decoded = String::from_utf8_lossy(&decoded);

    // A header without ':' is a bare username with an empty password
    let (username, password) = decoded.split_once(':').unwrap_or((decoded.as_ref(), ""));

    if credentials.matches(username, password) {
        Ok(())
    } else {
        Err(INVALID_CREDENTIALS)
    }
}

// Basic authentication middleware transformer
pub struct BasicAuthentication;

impl<S, B> Transform<S, ServiceRequest> for BasicAuthentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BasicAuthenticationMiddleware { service })
    }
}

pub struct BasicAuthenticationMiddleware<S> {
    service: S,
}

fn check(req: &ServiceRequest) -> Result<(), AnchorsetError> {
    let Some(app_state) = req.app_data::<Data<AppState>>() else {
        tracing::error!("AppState not found in request app_data");
        return Err(AnchorsetError::InternalError(
            "application state is not configured".to_string(),
        ));
    };

    // A header that is not visible ASCII cannot carry base64 credentials
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AnchorsetError::AuthError(INVALID_AUTHORIZATION_HEADER.to_string()))?,
        ),
        None => None,
    };

    authorize(authorization, &app_state.admin_credentials).map_err(|message| {
        tracing::warn!(
            method = %req.method(),
            path = %req.path(),
            reason = message,
            "Admin request rejected"
        );
        AnchorsetError::AuthError(message.to_string())
    })
}

impl<S, B> Service<ServiceRequest> for BasicAuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if Method::OPTIONS != *req.method()
            && let Err(err) = check(&req)
        {
            let response = AppError::from(err).error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let res = self.service.call(req);

        Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(user_pass))
    }

    fn credentials() -> AdminCredentials {
        AdminCredentials::new("admin", "s3cret:with:colons")
    }

    #[test]
    fn test_open_when_unconfigured() {
        assert_eq!(authorize(None, &AdminCredentials::default()), Ok(()));
        assert_eq!(
            authorize(Some("Basic !!!"), &AdminCredentials::default()),
            Ok(())
        );
    }

    #[test]
    fn test_missing_or_non_basic_header() {
        assert_eq!(authorize(None, &credentials()), Err(AUTHENTICATION_REQUIRED));
        assert_eq!(
            authorize(Some("Bearer abc"), &credentials()),
            Err(AUTHENTICATION_REQUIRED)
        );
    }

    #[test]
    fn test_undecodable_header() {
        assert_eq!(
            authorize(Some("Basic %%%"), &credentials()),
            Err(INVALID_AUTHORIZATION_HEADER)
        );
    }

    #[test]
    fn test_password_may_contain_colons() {
        let header = basic("admin:s3cret:with:colons");
        assert_eq!(authorize(Some(&header), &credentials()), Ok(()));
    }

    #[test]
    fn test_wrong_credentials() {
        let header = basic("admin:nope");
        assert_eq!(authorize(Some(&header), &credentials()), Err(INVALID_CREDENTIALS));

        let header = basic("admin");
        assert_eq!(authorize(Some(&header), &credentials()), Err(INVALID_CREDENTIALS));
    }
}
