//! Catalog persistence trait
//!
//! Products, groups, anchors and cartridges.

use async_trait::async_trait;

use crate::model::{AnchorRow, CartridgeRow, ProductRow, ProductUpdate, ProductUpdateOutcome};

#[async_trait]
pub trait CatalogPersistence: Send + Sync {
    /// All products ordered by display name
    async fn product_find_all(&self) -> anyhow::Result<Vec<ProductRow>>;

    async fn product_find_one(&self, code: &str) -> anyhow::Result<Option<ProductRow>>;

    /// Insert a new product. Fails if the code already exists.
    async fn product_create(&self, product: &ProductRow) -> anyhow::Result<()>;

    /// Apply a partial update. A group change drops the product's ETA rows
    /// in the same transaction.
    async fn product_update(
        &self,
        code: &str,
        update: &ProductUpdate,
    ) -> anyhow::Result<ProductUpdateOutcome>;

    /// Delete a product together with its ETA rows. Returns false if absent.
    async fn product_delete(&self, code: &str) -> anyhow::Result<bool>;

    /// All group keys in ascending order
    async fn group_find_all(&self) -> anyhow::Result<Vec<String>>;

    async fn group_exists(&self, key: &str) -> anyhow::Result<bool>;

    /// Register a group. Returns false if it already existed.
    async fn group_create(&self, key: &str) -> anyhow::Result<bool>;

    /// All anchors ordered by group, bar type, hef and id
    async fn anchor_find_all(&self) -> anyhow::Result<Vec<AnchorRow>>;

    /// Insert or fully replace an anchor keyed by (group, bar type, id)
    async fn anchor_upsert(&self, anchor: &AnchorRow) -> anyhow::Result<()>;

    /// All cartridges ordered by group and nominal
    async fn cartridge_find_all(&self) -> anyhow::Result<Vec<CartridgeRow>>;

    async fn cartridge_upsert(&self, cartridge: &CartridgeRow) -> anyhow::Result<()>;

    /// Returns false if no such cartridge existed
    async fn cartridge_delete(&self, group_key: &str, nominal: i32) -> anyhow::Result<bool>;
}
