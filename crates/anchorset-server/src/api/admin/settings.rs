//! Formula constants, usage factors, theme and ETA assignments

use actix_web::{HttpResponse, get, http::StatusCode, put, web};

use anchorset_config::{
    get_config,
    service::admin,
    validation::{ConstantPayload, EtaPayload, ThemePayload, UsageFactorPayload},
};

use crate::{
    error::AppError,
    model::{
        AppState,
        response::{MutationResult, json_response},
    },
};

#[get("/constants")]
pub async fn find_constants(data: web::Data<AppState>) -> HttpResponse {
    json_response(StatusCode::OK, get_config(data.store()).await.constants)
}

#[put("/constants")]
pub async fn upsert_constant(
    data: web::Data<AppState>,
    payload: web::Json<ConstantPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::upsert_constant(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[get("/usage-factors")]
pub async fn find_usage_factors(data: web::Data<AppState>) -> HttpResponse {
    json_response(StatusCode::OK, get_config(data.store()).await.usage_factors)
}

#[put("/usage-factors")]
pub async fn upsert_usage_factor(
    data: web::Data<AppState>,
    payload: web::Json<UsageFactorPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::upsert_usage_factor(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[get("/theme")]
pub async fn find_theme(data: web::Data<AppState>) -> HttpResponse {
    json_response(StatusCode::OK, get_config(data.store()).await.theme)
}

#[put("/theme")]
pub async fn update_theme(
    data: web::Data<AppState>,
    payload: web::Json<ThemePayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::update_theme(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[get("/eta")]
pub async fn find_eta_assignments(data: web::Data<AppState>) -> HttpResponse {
    json_response(StatusCode::OK, get_config(data.store()).await.eta_assignments)
}

#[put("/eta")]
pub async fn upsert_eta(
    data: web::Data<AppState>,
    payload: web::Json<EtaPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::upsert_eta(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(find_constants)
        .service(upsert_constant)
        .service(find_usage_factors)
        .service(upsert_usage_factor)
        .service(find_theme)
        .service(update_theme)
        .service(find_eta_assignments)
        .service(upsert_eta);
}
