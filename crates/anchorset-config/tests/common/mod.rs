//! Shared fixtures for config service tests

use async_trait::async_trait;

use anchorset_persistence::sea_orm::{ConnectOptions, Database};
use anchorset_persistence::*;

/// Fresh in-memory SQLite store with the schema created
pub async fn sqlite_store() -> SqlPersistService {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory SQLite");
    bootstrap_schema(&db)
        .await
        .expect("Schema bootstrap failed");
    SqlPersistService::new(db)
}

/// Store double with no rows whose reads can be made to fail
#[derive(Default)]
pub struct StubStore {
    /// Every read fails
    pub fail_reads: bool,
    /// Only the theme read fails
    pub fail_theme: bool,
    /// Product inserts hit an existing primary key, as when a concurrent
    /// create wins between lookup and insert
    pub duplicate_on_create: bool,
    pub theme_rows: Vec<ThemeRow>,
}

impl StubStore {
    fn read<T>(&self) -> anyhow::Result<Vec<T>> {
        if self.fail_reads {
            anyhow::bail!("connection refused");
        }
        Ok(Vec::new())
    }
}

#[async_trait]
impl CatalogPersistence for StubStore {
    async fn product_find_all(&self) -> anyhow::Result<Vec<ProductRow>> {
        self.read()
    }

    async fn product_find_one(&self, _code: &str) -> anyhow::Result<Option<ProductRow>> {
        Ok(None)
    }

    async fn product_create(&self, product: &ProductRow) -> anyhow::Result<()> {
        if self.duplicate_on_create {
            return Err(anchorset_common::AnchorsetError::illegal_argument(format!(
                "Product {} already exists.",
                product.code
            ))
            .into());
        }
        anyhow::bail!("read-only store")
    }

    async fn product_update(
        &self,
        _code: &str,
        _update: &ProductUpdate,
    ) -> anyhow::Result<ProductUpdateOutcome> {
        anyhow::bail!("read-only store")
    }

    async fn product_delete(&self, _code: &str) -> anyhow::Result<bool> {
        anyhow::bail!("read-only store")
    }

    async fn group_find_all(&self) -> anyhow::Result<Vec<String>> {
        self.read()
    }

    async fn group_exists(&self, _key: &str) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn group_create(&self, _key: &str) -> anyhow::Result<bool> {
        anyhow::bail!("read-only store")
    }

    async fn anchor_find_all(&self) -> anyhow::Result<Vec<AnchorRow>> {
        self.read()
    }

    async fn anchor_upsert(&self, _anchor: &AnchorRow) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }

    async fn cartridge_find_all(&self) -> anyhow::Result<Vec<CartridgeRow>> {
        self.read()
    }

    async fn cartridge_upsert(&self, _cartridge: &CartridgeRow) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }

    async fn cartridge_delete(&self, _group_key: &str, _nominal: i32) -> anyhow::Result<bool> {
        anyhow::bail!("read-only store")
    }
}

#[async_trait]
impl SettingsPersistence for StubStore {
    async fn constant_find_all(&self) -> anyhow::Result<Vec<ConstantRow>> {
        self.read()
    }

    async fn constant_upsert(&self, _constant: &ConstantRow) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }

    async fn usage_factor_find_all(&self) -> anyhow::Result<Vec<UsageFactorRow>> {
        self.read()
    }

    async fn usage_factor_upsert(&self, _factor: &UsageFactorRow) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }

    async fn theme_find_all(&self) -> anyhow::Result<Vec<ThemeRow>> {
        if self.fail_reads || self.fail_theme {
            anyhow::bail!("no such table: theme_settings");
        }
        Ok(self.theme_rows.clone())
    }

    async fn theme_upsert(&self, _entries: &[ThemeRow]) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }
}

#[async_trait]
impl EtaPersistence for StubStore {
    async fn eta_find_all(&self) -> anyhow::Result<Vec<EtaRow>> {
        self.read()
    }

    async fn eta_upsert(&self, _row: &EtaRow) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }

    async fn eta_seed_placeholders(&self, _scope: &EtaSeedScope) -> anyhow::Result<u64> {
        anyhow::bail!("read-only store")
    }
}

#[async_trait]
impl ImagePersistence for StubStore {
    async fn image_find_one(
        &self,
        _product_code: &str,
        _nominal: i32,
    ) -> anyhow::Result<Option<ProductImageData>> {
        if self.fail_reads {
            anyhow::bail!("connection refused");
        }
        Ok(None)
    }

    async fn image_upsert(
        &self,
        _product_code: &str,
        _nominal: i32,
        _image: &ProductImageData,
    ) -> anyhow::Result<()> {
        anyhow::bail!("read-only store")
    }

    async fn image_delete(&self, _product_code: &str, _nominal: i32) -> anyhow::Result<bool> {
        anyhow::bail!("read-only store")
    }
}

#[async_trait]
impl CalculatorPersistence for StubStore {
    fn storage_backend(&self) -> StorageBackend {
        StorageBackend::Sqlite
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        if self.fail_reads {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}
