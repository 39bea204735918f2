//! HTTP response types for the Anchorset server
//!
//! Every JSON response carries `Cache-Control: no-store`; only stored product
//! images are cacheable.

use actix_web::{
    HttpResponse, HttpResponseBuilder,
    http::{StatusCode, header},
};
use serde::{Deserialize, Serialize};

pub const NO_STORE: &str = "no-store";
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=3600";
pub const INVALID_JSON_BODY: &str = "Invalid JSON body.";
pub const INVALID_FORM_DATA: &str = "Invalid form data.";

/// JSON response with the no-store cache policy
pub fn json_response(status: StatusCode, body: impl Serialize) -> HttpResponse {
    HttpResponseBuilder::new(status)
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .json(body)
}

/// Envelope for a successful mutation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MutationResult<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<T>,
}

impl<T: Serialize> MutationResult<T> {
    pub fn with_config(config: T) -> Self {
        MutationResult {
            ok: true,
            config: Some(config),
        }
    }

    pub fn http_ok(config: T) -> HttpResponse {
        json_response(StatusCode::OK, Self::with_config(config))
    }

    pub fn http_created(config: T) -> HttpResponse {
        json_response(StatusCode::CREATED, Self::with_config(config))
    }
}

impl MutationResult<()> {
    /// `{ "ok": true }` for mutations that do not return the configuration
    pub fn http_ack() -> HttpResponse {
        json_response(
            StatusCode::OK,
            MutationResult::<()> {
                ok: true,
                config: None,
            },
        )
    }
}

/// Error body: `{ "error": ... }`, plus `detail` for store failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResult {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        ErrorResult {
            error: error.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn http_response(status: StatusCode, error: impl Into<String>) -> HttpResponse {
        json_response(status, ErrorResult::new(error))
    }

    pub fn http_bad_request(error: impl Into<String>) -> HttpResponse {
        Self::http_response(StatusCode::BAD_REQUEST, error)
    }
}
