//! Admin API. Every route sits behind HTTP Basic authentication.

pub mod catalog;
pub mod image;
pub mod settings;

use actix_web::{dev::HttpServiceFactory, web};

use crate::middleware::auth::BasicAuthentication;

pub fn routes() -> impl HttpServiceFactory {
    web::scope("/admin")
        .wrap(BasicAuthentication)
        .configure(catalog::configure)
        .configure(settings::configure)
        .configure(image::configure)
}
