//! Products, groups, anchors and cartridges

use actix_web::{HttpResponse, delete, get, http::StatusCode, post, put, web};

use anchorset_config::{
    get_config,
    service::admin,
    validation::{AnchorPayload, CartridgePayload, GroupPayload, ProductPayload},
};

use crate::{
    error::AppError,
    model::{
        AppState,
        response::{MutationResult, json_response},
    },
};

/// Full snapshot; the admin UI edits catalog entries in place
async fn snapshot(data: &AppState) -> HttpResponse {
    json_response(StatusCode::OK, get_config(data.store()).await)
}

#[get("/anchors")]
pub async fn find_anchors(data: web::Data<AppState>) -> HttpResponse {
    snapshot(&data).await
}

#[put("/anchors")]
pub async fn upsert_anchor(
    data: web::Data<AppState>,
    payload: web::Json<AnchorPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::upsert_anchor(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[get("/cartridges")]
pub async fn find_cartridges(data: web::Data<AppState>) -> HttpResponse {
    snapshot(&data).await
}

#[put("/cartridges")]
pub async fn upsert_cartridge(
    data: web::Data<AppState>,
    payload: web::Json<CartridgePayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::upsert_cartridge(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[delete("/cartridges")]
pub async fn delete_cartridge(
    data: web::Data<AppState>,
    payload: web::Json<CartridgePayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::delete_cartridge(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[put("/groups")]
pub async fn register_group(
    data: web::Data<AppState>,
    payload: web::Json<GroupPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::register_group(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[get("/products")]
pub async fn find_products(data: web::Data<AppState>) -> HttpResponse {
    snapshot(&data).await
}

#[post("/products")]
pub async fn create_product(
    data: web::Data<AppState>,
    payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::create_product(data.store(), payload.into_inner()).await?;
    Ok(MutationResult::http_created(config))
}

#[put("/products/{code}")]
pub async fn update_product(
    data: web::Data<AppState>,
    code: web::Path<String>,
    payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
    let config = admin::update_product(data.store(), &code, payload.into_inner()).await?;
    Ok(MutationResult::http_ok(config))
}

#[delete("/products/{code}")]
pub async fn delete_product(
    data: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let config = admin::delete_product(data.store(), &code).await?;
    Ok(MutationResult::http_ok(config))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(find_anchors)
        .service(upsert_anchor)
        .service(find_cartridges)
        .service(upsert_cartridge)
        .service(delete_cartridge)
        .service(register_group)
        .service(find_products)
        .service(create_product)
        .service(update_product)
        .service(delete_product);
}
