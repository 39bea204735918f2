//! Public configuration endpoint

use actix_web::{HttpResponse, Scope, get, http::StatusCode, web};

use anchorset_config::get_config;

use crate::model::{AppState, response::json_response};

#[get("")]
pub async fn find_config(data: web::Data<AppState>) -> HttpResponse {
    json_response(StatusCode::OK, get_config(data.store()).await)
}

pub fn routes() -> Scope {
    web::scope("/config").service(find_config)
}
