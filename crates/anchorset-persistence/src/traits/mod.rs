//! Persistence traits for the calculator store
//!
//! The store is split by category so that each admin area only depends on
//! the operations it needs. `CalculatorPersistence` ties them together.

pub mod catalog;
pub mod eta;
pub mod image;
pub mod settings;

pub use catalog::CatalogPersistence;
pub use eta::EtaPersistence;
pub use image::ImagePersistence;
pub use settings::SettingsPersistence;

use async_trait::async_trait;

use crate::model::StorageBackend;

/// Unified persistence service trait
#[async_trait]
pub trait CalculatorPersistence:
    CatalogPersistence + SettingsPersistence + EtaPersistence + ImagePersistence + Send + Sync
{
    /// SQL dialect of the connected store
    fn storage_backend(&self) -> StorageBackend;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
