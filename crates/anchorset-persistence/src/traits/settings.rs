//! Settings persistence trait
//!
//! Formula constants, usage factors and theme settings.

use async_trait::async_trait;

use crate::model::{ConstantRow, ThemeRow, UsageFactorRow};

#[async_trait]
pub trait SettingsPersistence: Send + Sync {
    async fn constant_find_all(&self) -> anyhow::Result<Vec<ConstantRow>>;

    /// Upsert a constant. A `None` description keeps the stored one.
    async fn constant_upsert(&self, constant: &ConstantRow) -> anyhow::Result<()>;

    /// All usage factors ordered by sort order
    async fn usage_factor_find_all(&self) -> anyhow::Result<Vec<UsageFactorRow>>;

    /// Upsert a usage factor. When it is marked default, every other row
    /// loses its default flag in the same transaction.
    async fn usage_factor_upsert(&self, factor: &UsageFactorRow) -> anyhow::Result<()>;

    async fn theme_find_all(&self) -> anyhow::Result<Vec<ThemeRow>>;

    /// Upsert the given theme entries atomically
    async fn theme_upsert(&self, entries: &[ThemeRow]) -> anyhow::Result<()>;
}
