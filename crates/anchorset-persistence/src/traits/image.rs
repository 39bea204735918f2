//! Product image persistence trait

use async_trait::async_trait;

use crate::model::ProductImageData;

#[async_trait]
pub trait ImagePersistence: Send + Sync {
    async fn image_find_one(
        &self,
        product_code: &str,
        nominal: i32,
    ) -> anyhow::Result<Option<ProductImageData>>;

    /// Insert or replace the image for (product, nominal)
    async fn image_upsert(
        &self,
        product_code: &str,
        nominal: i32,
        image: &ProductImageData,
    ) -> anyhow::Result<()>;

    /// Returns false if there was nothing to delete
    async fn image_delete(&self, product_code: &str, nominal: i32) -> anyhow::Result<bool>;
}
