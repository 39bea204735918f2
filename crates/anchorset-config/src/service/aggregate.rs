//! Configuration aggregation
//!
//! Reads every category concurrently, applies the row mappers and returns one
//! snapshot. Only the theme read is allowed to fail; it degrades to no rows.

use tracing::{error, warn};

use anchorset_persistence::CalculatorPersistence;

use crate::mapper;
use crate::model::CalculatorConfig;
use crate::static_config::static_config;

/// Build the snapshot from the store. Errors are returned to the caller.
pub async fn aggregate(store: &dyn CalculatorPersistence) -> anyhow::Result<CalculatorConfig> {
    let theme_read = async {
        let rows = match store.theme_find_all().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Unable to load theme settings, using defaults");
                Vec::new()
            }
        };
        Ok::<_, anyhow::Error>(rows)
    };

    let (products, groups, anchors, cartridges, constants, usage_factors, theme, eta) = tokio::try_join!(
        store.product_find_all(),
        store.group_find_all(),
        store.anchor_find_all(),
        store.cartridge_find_all(),
        store.constant_find_all(),
        store.usage_factor_find_all(),
        theme_read,
        store.eta_find_all(),
    )?;

    let products = mapper::map_products(products);
    let eta_assignments = mapper::map_eta_assignments(&products, eta);

    Ok(CalculatorConfig {
        groups: mapper::map_groups(groups, anchors, cartridges),
        constants: mapper::map_constants(constants),
        usage_factors: mapper::map_usage_factors(usage_factors),
        theme: mapper::map_theme(theme),
        eta_assignments,
        products,
    })
}

/// Snapshot for read paths. Without a store, or when aggregation fails, the
/// bundled defaults are served instead.
pub async fn get_config(store: Option<&dyn CalculatorPersistence>) -> CalculatorConfig {
    let Some(store) = store else {
        return static_config().clone();
    };

    match aggregate(store).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load config from store, serving bundled defaults");
            static_config().clone()
        }
    }
}
