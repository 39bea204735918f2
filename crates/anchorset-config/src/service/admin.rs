//! Admin mutations
//!
//! Every operation validates its input before touching the store, applies a
//! single-category change and returns a fresh snapshot from [`aggregate`].
//! Store failures carry a context message naming the failed operation.

use anyhow::Context;
use tracing::{debug, info};

use anchorset_common::AnchorsetError;
use anchorset_persistence::{CalculatorPersistence, EtaSeedScope, ProductUpdateOutcome};

use super::aggregate::aggregate;
use super::require_store;
use crate::model::CalculatorConfig;
use crate::validation::*;

async fn refresh(store: &dyn CalculatorPersistence) -> anyhow::Result<CalculatorConfig> {
    aggregate(store)
        .await
        .context("Unable to load configuration after update.")
}

async fn ensure_group(store: &dyn CalculatorPersistence, group_key: &str) -> anyhow::Result<()> {
    let exists = store
        .group_exists(group_key)
        .await
        .context("Unable to look up group.")?;
    if !exists {
        return Err(AnchorsetError::not_found(format!("Group {} not found.", group_key)).into());
    }
    Ok(())
}

pub async fn upsert_anchor(
    store: Option<&dyn CalculatorPersistence>,
    payload: AnchorPayload,
) -> anyhow::Result<CalculatorConfig> {
    let row = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;
    ensure_group(store, &row.group_key).await?;

    store
        .anchor_upsert(&row)
        .await
        .context("Unable to update anchor.")?;

    let seeded = store
        .eta_seed_placeholders(&EtaSeedScope::Anchor {
            group_key: row.group_key.clone(),
            bar_type: row.bar_type.clone(),
            anchor_id: row.id.clone(),
        })
        .await
        .context("Unable to create ETA placeholders.")?;

    info!(
        group = %row.group_key,
        bar_type = %row.bar_type,
        id = %row.id,
        seeded,
        "Anchor upserted"
    );
    refresh(store).await
}

pub async fn upsert_cartridge(
    store: Option<&dyn CalculatorPersistence>,
    payload: CartridgePayload,
) -> anyhow::Result<CalculatorConfig> {
    let row = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;
    ensure_group(store, &row.group_key).await?;

    store
        .cartridge_upsert(&row)
        .await
        .context("Unable to update cartridge.")?;

    info!(group = %row.group_key, nominal = row.nominal, "Cartridge upserted");
    refresh(store).await
}

pub async fn delete_cartridge(
    store: Option<&dyn CalculatorPersistence>,
    payload: CartridgePayload,
) -> anyhow::Result<CalculatorConfig> {
    let (group_key, nominal) = payload.validate_key().map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    let deleted = store
        .cartridge_delete(&group_key, nominal)
        .await
        .context("Unable to delete cartridge.")?;
    if !deleted {
        return Err(AnchorsetError::not_found(format!(
            "Cartridge {} ml for group {} not found.",
            nominal, group_key
        ))
        .into());
    }

    info!(group = %group_key, nominal, "Cartridge deleted");
    refresh(store).await
}

pub async fn upsert_constant(
    store: Option<&dyn CalculatorPersistence>,
    payload: ConstantPayload,
) -> anyhow::Result<CalculatorConfig> {
    let row = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    store
        .constant_upsert(&row)
        .await
        .context("Unable to update constant.")?;

    info!(key = %row.key, value = row.value, "Formula constant upserted");
    refresh(store).await
}

pub async fn upsert_usage_factor(
    store: Option<&dyn CalculatorPersistence>,
    payload: UsageFactorPayload,
) -> anyhow::Result<CalculatorConfig> {
    let row = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    store
        .usage_factor_upsert(&row)
        .await
        .context("Unable to update usage factor.")?;

    info!(code = %row.code, is_default = row.is_default, "Usage factor upserted");
    refresh(store).await
}

pub async fn update_theme(
    store: Option<&dyn CalculatorPersistence>,
    payload: ThemePayload,
) -> anyhow::Result<CalculatorConfig> {
    let rows = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    store
        .theme_upsert(&rows)
        .await
        .context("Unable to update theme.")?;

    info!(keys = rows.len(), "Theme updated");
    refresh(store).await
}

pub async fn upsert_eta(
    store: Option<&dyn CalculatorPersistence>,
    payload: EtaPayload,
) -> anyhow::Result<CalculatorConfig> {
    let row = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    store
        .eta_upsert(&row)
        .await
        .context("Unable to update ETA assignment.")?;

    info!(
        product = %row.product_code,
        bar_type = %row.bar_type,
        anchor = %row.anchor_id,
        enabled = row.eta_enabled,
        "ETA assignment upserted"
    );
    refresh(store).await
}

pub async fn create_product(
    store: Option<&dyn CalculatorPersistence>,
    payload: ProductPayload,
) -> anyhow::Result<CalculatorConfig> {
    let row = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;
    ensure_group(store, &row.group_key).await?;

    let existing = store
        .product_find_one(&row.code)
        .await
        .context("Unable to create product.")?;
    if existing.is_some() {
        return Err(
            AnchorsetError::illegal_argument(format!("Product {} already exists.", row.code))
                .into(),
        );
    }

    store
        .product_create(&row)
        .await
        .context("Unable to create product.")?;

    let seeded = store
        .eta_seed_placeholders(&EtaSeedScope::Product {
            product_code: row.code.clone(),
            group_key: row.group_key.clone(),
        })
        .await
        .context("Unable to create ETA placeholders.")?;

    info!(code = %row.code, group = %row.group_key, seeded, "Product created");
    refresh(store).await
}

pub async fn update_product(
    store: Option<&dyn CalculatorPersistence>,
    code: &str,
    payload: ProductPayload,
) -> anyhow::Result<CalculatorConfig> {
    let code = validate_product_code(code).map_err(into_illegal_argument)?;
    let update = payload.validate_update().map_err(into_illegal_argument)?;
    let store = require_store(store)?;
    if let Some(group_key) = &update.group_key {
        ensure_group(store, group_key).await?;
    }

    let outcome = store
        .product_update(&code, &update)
        .await
        .context("Unable to update product.")?;

    match outcome {
        ProductUpdateOutcome::NotFound => {
            Err(AnchorsetError::not_found(format!("Product {} not found.", code)).into())
        }
        ProductUpdateOutcome::Updated { group_changed } => {
            info!(code = %code, group_changed, "Product updated");
            refresh(store).await
        }
    }
}

pub async fn delete_product(
    store: Option<&dyn CalculatorPersistence>,
    code: &str,
) -> anyhow::Result<CalculatorConfig> {
    let code = validate_product_code(code).map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    let deleted = store
        .product_delete(&code)
        .await
        .context("Unable to delete product.")?;
    if !deleted {
        return Err(AnchorsetError::not_found(format!("Product {} not found.", code)).into());
    }

    info!(code = %code, "Product deleted");
    refresh(store).await
}

pub async fn register_group(
    store: Option<&dyn CalculatorPersistence>,
    payload: GroupPayload,
) -> anyhow::Result<CalculatorConfig> {
    let key = payload.validate().map_err(into_illegal_argument)?;
    let store = require_store(store)?;

    let created = store
        .group_create(&key)
        .await
        .context("Unable to register group.")?;
    if created {
        info!(group = %key, "Group registered");
    } else {
        debug!(group = %key, "Group already registered");
    }
    refresh(store).await
}
