//! Product artwork served to the calculator

use actix_web::{
    HttpResponse, Scope, get,
    http::header::{self, ContentType},
    web,
};
use serde::Deserialize;

use anchorset_config::service::image::find_image;

use crate::model::{
    AppState,
    response::{IMAGE_CACHE_CONTROL, NO_STORE},
};

pub const MISSING_PRODUCT_OR_NOMINAL: &str = "Missing product or nominal.";

#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    pub product: Option<String>,
    pub nominal: Option<String>,
}

/// Static artwork shipped with the front end
pub fn fallback_location(prefix: &str, product: &str, nominal: &str) -> String {
    format!("{}/{}-{}-min.png", prefix, product, nominal)
}

#[get("/product-image")]
pub async fn product_image(
    data: web::Data<AppState>,
    params: web::Query<ImageQuery>,
) -> HttpResponse {
    let (Some(product), Some(nominal)) = (
        params.product.as_deref().filter(|p| !p.is_empty()),
        params.nominal.as_deref().filter(|n| !n.is_empty()),
    ) else {
        return HttpResponse::BadRequest()
            .insert_header((header::CACHE_CONTROL, NO_STORE))
            .content_type(ContentType::plaintext())
            .body(MISSING_PRODUCT_OR_NOMINAL);
    };

    match find_image(data.store(), product, nominal).await {
        Some(image) => HttpResponse::Ok()
            .content_type(image.content_type)
            .insert_header((header::CACHE_CONTROL, IMAGE_CACHE_CONTROL))
            .body(image.data),
        None => HttpResponse::Found()
            .insert_header((
                header::LOCATION,
                fallback_location(&data.fallback_prefix, product, nominal),
            ))
            .insert_header((header::CACHE_CONTROL, NO_STORE))
            .finish(),
    }
}

pub fn routes() -> Scope {
    web::scope("/assets").service(product_image)
}
