//! Shared fixtures for persistence integration tests

use anchorset_persistence::sea_orm::{ConnectOptions, Database};
use anchorset_persistence::{
    AnchorRow, CatalogPersistence, ProductRow, SqlPersistService, bootstrap_schema,
};

/// Fresh in-memory SQLite store with the schema created.
///
/// The pool is pinned to one connection since every SQLite memory
/// connection opens its own database.
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

pub fn anchor(group: &str, bar_type: &str, id: &str, d0: f64, hef: f64) -> AnchorRow {
    AnchorRow {
        group_key: group.to_string(),
        bar_type: bar_type.to_string(),
        id: id.to_string(),
        d0,
        da: None,
        hef,
        hmin: None,
        hmax: None,
        is_active: Some(true),
    }
}

pub fn product(code: &str, group: &str) -> ProductRow {
    ProductRow {
        code: code.to_string(),
        display_name: format!("F.{}", code),
        group_key: group.to_string(),
        eta_approved: false,
    }
}

/// Registers group `A` with two threaded and one rebar anchor
#[allow(dead_code)]
pub async fn seed_group_a(store: &SqlPersistService) {
    store.group_create("A").await.unwrap();
    store
        .anchor_upsert(&anchor("A", "threaded", "M8", 10.0, 80.0))
        .await
        .unwrap();
    store
        .anchor_upsert(&anchor("A", "threaded", "M10", 12.0, 90.0))
        .await
        .unwrap();
    store
        .anchor_upsert(&anchor("A", "rebar", "Φ8", 12.0, 80.0))
        .await
        .unwrap();
}
