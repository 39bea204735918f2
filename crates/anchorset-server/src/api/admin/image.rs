//! Product image upload and removal

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, delete, put, web};
use futures::StreamExt;
use serde::Deserialize;
use tracing::warn;

use anchorset_config::service::image::{self, ImageUpload};

use crate::{
    error::AppError,
    model::{
        AppState,
        response::{ErrorResult, INVALID_FORM_DATA, MutationResult},
    },
};

const PRODUCT_CODE_FIELD: &str = "productCode";
const NOMINAL_FIELD: &str = "nominal";
const FILE_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize)]
pub struct ImageKeyQuery {
    pub product: Option<String>,
    pub nominal: Option<String>,
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, actix_multipart::MultipartError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
    }
    Ok(bytes)
}

/// Collect the upload form. Unknown parts are drained and ignored.
async fn read_upload(mut payload: Multipart) -> Result<ImageUpload, actix_multipart::MultipartError> {
    let mut upload = ImageUpload::default();

    while let Some(field_result) = payload.next().await {
        let mut field = field_result?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(str::to_string);

        match name.as_deref() {
            Some(FILE_FIELD) => {
                upload.content_type = field.content_type().map(|mime| mime.to_string());
                upload.file = Some(read_field(&mut field).await?);
            }
            Some(PRODUCT_CODE_FIELD) => {
                let value = read_field(&mut field).await?;
                upload.product_code = Some(String::from_utf8_lossy(&value).into_owned());
            }
            Some(NOMINAL_FIELD) => {
                let value = read_field(&mut field).await?;
                upload.nominal = Some(String::from_utf8_lossy(&value).into_owned());
            }
            _ => {
                read_field(&mut field).await?;
            }
        }
    }

    Ok(upload)
}

#[put("/product-images")]
pub async fn upload_image(
    data: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let upload = match read_upload(payload).await {
        Ok(upload) => upload,
        Err(e) => {
            warn!(error = %e, "Failed to read multipart upload");
            return Ok(ErrorResult::http_bad_request(INVALID_FORM_DATA));
        }
    };

    image::upload_image(data.store(), upload).await?;
    Ok(MutationResult::http_ack())
}

#[delete("/product-images")]
pub async fn delete_image(
    data: web::Data<AppState>,
    params: web::Query<ImageKeyQuery>,
) -> Result<HttpResponse, AppError> {
    image::delete_image(
        data.store(),
        params.product.as_deref(),
        params.nominal.as_deref(),
    )
    .await?;
    Ok(MutationResult::http_ack())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_image).service(delete_image);
}
