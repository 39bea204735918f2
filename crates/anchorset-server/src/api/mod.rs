//! HTTP API
//!
//! - `/api/config`: public configuration snapshot
//! - `/api/assets/product-image`: stored product artwork or a redirect
//! - `/api/admin/*`: Basic-auth protected administration
//! - `/health`: store health

pub mod admin;
pub mod assets;
pub mod config;
pub mod health;

use actix_web::{HttpRequest, error, web};

use crate::model::response::{ErrorResult, INVALID_JSON_BODY};

/// Bodies are parsed as JSON whatever their content type; any failure is a
/// plain 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err: error::JsonPayloadError, req: &HttpRequest| {
            tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
            error::InternalError::from_response(err, ErrorResult::http_bad_request(INVALID_JSON_BODY))
                .into()
        })
}

/// Register every route of the server
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(config::routes())
            .service(assets::routes())
            .service(admin::routes()),
    )
    .service(health::health);
}
