//! ETA assignment persistence trait

use async_trait::async_trait;

use crate::model::{EtaRow, EtaSeedScope};

#[async_trait]
pub trait EtaPersistence: Send + Sync {
    async fn eta_find_all(&self) -> anyhow::Result<Vec<EtaRow>>;

    async fn eta_upsert(&self, row: &EtaRow) -> anyhow::Result<()>;

    /// Insert disabled rows for every product/anchor pair in `scope` that has
    /// no row yet. Existing rows are never touched. Returns the number of
    /// rows inserted.
    async fn eta_seed_placeholders(&self, scope: &EtaSeedScope) -> anyhow::Result<u64>;
}
