//! Product image storage

use anyhow::Context;
use tracing::{debug, error, info};

use anchorset_persistence::{CalculatorPersistence, ProductImageData};

use super::require_store;
use crate::validation::{
    DEFAULT_IMAGE_CONTENT_TYPE, into_illegal_argument, validate_image_key, validate_image_upload,
};

/// Parts of a multipart image upload
#[derive(Debug, Default)]
pub struct ImageUpload {
    pub product_code: Option<String>,
    pub nominal: Option<String>,
    pub content_type: Option<String>,
    pub file: Option<Vec<u8>>,
}

pub async fn upload_image(
    store: Option<&dyn CalculatorPersistence>,
    upload: ImageUpload,
) -> anyhow::Result<()> {
    let (product_code, nominal) = validate_image_upload(
        upload.product_code.as_deref(),
        upload.nominal.as_deref(),
        upload.file.is_some(),
    )
    .map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    let content_type = upload
        .content_type
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string());
    let data = upload.file.unwrap_or_default();
    let size = data.len();

    store
        .image_upsert(&product_code, nominal, &ProductImageData { content_type, data })
        .await
        .context("Unable to store product image.")?;

    info!(product = %product_code, nominal, size, "Product image stored");
    Ok(())
}

pub async fn delete_image(
    store: Option<&dyn CalculatorPersistence>,
    product: Option<&str>,
    nominal: Option<&str>,
) -> anyhow::Result<()> {
    let (product_code, nominal) =
        validate_image_key(product, nominal, "product and nominal are required.")
            .map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    let deleted = store
        .image_delete(&product_code, nominal)
        .await
        .context("Unable to delete product image.")?;
    if deleted {
        info!(product = %product_code, nominal, "Product image deleted");
    } else {
        debug!(product = %product_code, nominal, "No product image to delete");
    }
    Ok(())
}

/// Stored image for the asset endpoint. Lookup failures are logged and read
/// as "no image" so the caller can redirect to the static asset.
pub async fn find_image(
    store: Option<&dyn CalculatorPersistence>,
    product_code: &str,
    nominal: &str,
) -> Option<ProductImageData> {
    let store = store?;
    let nominal = nominal.trim().parse::<i32>().ok()?;
    match store.image_find_one(product_code, nominal).await {
        Ok(image) => image.filter(|i| !i.data.is_empty()),
        Err(e) => {
            error!(product = %product_code, nominal, error = %e, "Failed to load product image");
            None
        }
    }
}
