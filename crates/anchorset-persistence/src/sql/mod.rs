//! SQL-based persistence backend (SQLite/MySQL/PostgreSQL via SeaORM)
//!
//! Implements every calculator persistence trait over a pooled
//! `DatabaseConnection`. Multi-row mutations run in a single transaction.

use anchorset_common::AnchorsetError;
use async_trait::async_trait;
use sea_orm::{prelude::Expr, sea_query::OnConflict, *};

use crate::entity::{
    anchor, cartridge, formula_constant, group, product, product_eta, product_image,
    theme_setting, usage_factor,
};
use crate::model::*;
use crate::traits::*;

/// External database persistence service
pub struct SqlPersistService {
    db: DatabaseConnection,
}

impl SqlPersistService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Insert disabled ETA rows for every pair in `scope` that does not exist yet.
///
/// Shared by the explicit reconciliation call and by product group changes,
/// which run it inside their own transaction.
async fn seed_placeholders<C: ConnectionTrait>(
    conn: &C,
    scope: &EtaSeedScope,
) -> anyhow::Result<u64> {
    let pairs: Vec<(String, String, String)> = match scope {
        EtaSeedScope::Product {
            product_code,
            group_key,
        } => anchor::Entity::find()
            .filter(anchor::Column::GroupKey.eq(group_key.as_str()))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| (product_code.clone(), a.bar_type, a.id))
            .collect(),
        EtaSeedScope::Anchor {
            group_key,
            bar_type,
            anchor_id,
        } => product::Entity::find()
            .filter(product::Column::GroupKey.eq(group_key.as_str()))
            .all(conn)
            .await?
            .into_iter()
            .map(|p| (p.code, bar_type.clone(), anchor_id.clone()))
            .collect(),
    };

    if pairs.is_empty() {
        return Ok(0);
    }

    let models = pairs
        .into_iter()
        .map(|(product_code, bar_type, anchor_id)| product_eta::ActiveModel {
            product_code: Set(product_code),
            bar_type: Set(bar_type),
            anchor_id: Set(anchor_id),
            eta_enabled: Set(false),
        });

    let inserted = product_eta::Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([
                product_eta::Column::ProductCode,
                product_eta::Column::BarType,
                product_eta::Column::AnchorId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(inserted)
}

// ============================================================================
// CalculatorPersistence implementation
// ============================================================================

#[async_trait]
impl CalculatorPersistence for SqlPersistService {
    fn storage_backend(&self) -> StorageBackend {
        self.db.get_database_backend().into()
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        group::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "health")
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;
        Ok(())
    }
}

// ============================================================================
// CatalogPersistence implementation
// ============================================================================

impl From<product::Model> for ProductRow {
    fn from(m: product::Model) -> Self {
        Self {
            code: m.code,
            display_name: m.display_name,
            group_key: m.group_key,
            eta_approved: m.eta_approved,
        }
    }
}

impl From<anchor::Model> for AnchorRow {
    fn from(m: anchor::Model) -> Self {
        Self {
            group_key: m.group_key,
            bar_type: m.bar_type,
            id: m.id,
            d0: m.d0,
            da: m.da,
            hef: m.hef,
            hmin: m.hmin,
            hmax: m.hmax,
            is_active: m.is_active,
        }
    }
}

#[async_trait]
impl CatalogPersistence for SqlPersistService {
    async fn product_find_all(&self) -> anyhow::Result<Vec<ProductRow>> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::DisplayName)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(ProductRow::from).collect())
    }

    async fn product_find_one(&self, code: &str) -> anyhow::Result<Option<ProductRow>> {
        Ok(product::Entity::find_by_id(code)
            .one(&self.db)
            .await?
            .map(ProductRow::from))
    }

    async fn product_create(&self, row: &ProductRow) -> anyhow::Result<()> {
        let model = product::ActiveModel {
            code: Set(row.code.clone()),
            display_name: Set(row.display_name.clone()),
            group_key: Set(row.group_key.clone()),
            eta_approved: Set(row.eta_approved),
        };
        match product::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AnchorsetError::illegal_argument(format!(
                    "Product {} already exists.",
                    row.code
                ))
                .into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn product_update(
        &self,
        code: &str,
        update: &ProductUpdate,
    ) -> anyhow::Result<ProductUpdateOutcome> {
        let tx = self.db.begin().await?;

        let existing = match product::Entity::find_by_id(code).one(&tx).await? {
            Some(existing) => existing,
            None => {
                tx.rollback().await?;
                return Ok(ProductUpdateOutcome::NotFound);
            }
        };

        let group_changed = update
            .group_key
            .as_deref()
            .is_some_and(|g| g != existing.group_key);

        let mut model: product::ActiveModel = existing.into();
        if let Some(display_name) = &update.display_name {
            model.display_name = Set(display_name.clone());
        }
        if let Some(group_key) = &update.group_key {
            model.group_key = Set(group_key.clone());
        }
        if let Some(eta_approved) = update.eta_approved {
            model.eta_approved = Set(eta_approved);
        }
        if model.is_changed() {
            model.update(&tx).await?;
        }

        if group_changed && let Some(group_key) = &update.group_key {
            product_eta::Entity::delete_many()
                .filter(product_eta::Column::ProductCode.eq(code))
                .exec(&tx)
                .await?;
            seed_placeholders(
                &tx,
                &EtaSeedScope::Product {
                    product_code: code.to_string(),
                    group_key: group_key.clone(),
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(ProductUpdateOutcome::Updated { group_changed })
    }

    async fn product_delete(&self, code: &str) -> anyhow::Result<bool> {
        let tx = self.db.begin().await?;

        product_eta::Entity::delete_many()
            .filter(product_eta::Column::ProductCode.eq(code))
            .exec(&tx)
            .await?;
        let result = product::Entity::delete_by_id(code).exec(&tx).await?;

        if result.rows_affected == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn group_find_all(&self) -> anyhow::Result<Vec<String>> {
        let rows = group::Entity::find()
            .order_by_asc(group::Column::Key)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|g| g.key).collect())
    }

    async fn group_exists(&self, key: &str) -> anyhow::Result<bool> {
        let count = group::Entity::find_by_id(key).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn group_create(&self, key: &str) -> anyhow::Result<bool> {
        let model = group::ActiveModel {
            key: Set(key.to_string()),
        };
        let inserted = group::Entity::insert(model)
            .on_conflict(
                OnConflict::column(group::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(inserted > 0)
    }

    async fn anchor_find_all(&self) -> anyhow::Result<Vec<AnchorRow>> {
        let rows = anchor::Entity::find()
            .order_by_asc(anchor::Column::GroupKey)
            .order_by_asc(anchor::Column::BarType)
            .order_by_asc(anchor::Column::Hef)
            .order_by_asc(anchor::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(AnchorRow::from).collect())
    }

    async fn anchor_upsert(&self, row: &AnchorRow) -> anyhow::Result<()> {
        let model = anchor::ActiveModel {
            group_key: Set(row.group_key.clone()),
            bar_type: Set(row.bar_type.clone()),
            id: Set(row.id.clone()),
            d0: Set(row.d0),
            da: Set(row.da),
            hef: Set(row.hef),
            hmin: Set(row.hmin),
            hmax: Set(row.hmax),
            is_active: Set(row.is_active),
        };
        anchor::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    anchor::Column::GroupKey,
                    anchor::Column::BarType,
                    anchor::Column::Id,
                ])
                .update_columns([
                    anchor::Column::D0,
                    anchor::Column::Da,
                    anchor::Column::Hef,
                    anchor::Column::Hmin,
                    anchor::Column::Hmax,
                    anchor::Column::IsActive,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn cartridge_find_all(&self) -> anyhow::Result<Vec<CartridgeRow>> {
        let rows = cartridge::Entity::find()
            .order_by_asc(cartridge::Column::GroupKey)
            .order_by_asc(cartridge::Column::Nominal)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|c| CartridgeRow {
                group_key: c.group_key,
                nominal: c.nominal,
                net: c.net,
            })
            .collect())
    }

    async fn cartridge_upsert(&self, row: &CartridgeRow) -> anyhow::Result<()> {
        let model = cartridge::ActiveModel {
            group_key: Set(row.group_key.clone()),
            nominal: Set(row.nominal),
            net: Set(row.net),
        };
        cartridge::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([cartridge::Column::GroupKey, cartridge::Column::Nominal])
                    .update_column(cartridge::Column::Net)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn cartridge_delete(&self, group_key: &str, nominal: i32) -> anyhow::Result<bool> {
        let result = cartridge::Entity::delete_many()
            .filter(cartridge::Column::GroupKey.eq(group_key))
            .filter(cartridge::Column::Nominal.eq(nominal))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// ============================================================================
// SettingsPersistence implementation
// ============================================================================

#[async_trait]
impl SettingsPersistence for SqlPersistService {
    async fn constant_find_all(&self) -> anyhow::Result<Vec<ConstantRow>> {
        let rows = formula_constant::Entity::find()
            .order_by_asc(formula_constant::Column::Key)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|c| ConstantRow {
                key: c.key,
                value: c.value,
                description: c.description,
            })
            .collect())
    }

    async fn constant_upsert(&self, row: &ConstantRow) -> anyhow::Result<()> {
        let model = formula_constant::ActiveModel {
            key: Set(row.key.clone()),
            value: Set(row.value),
            description: Set(row.description.clone()),
        };

        let mut on_conflict = OnConflict::column(formula_constant::Column::Key);
        if row.description.is_some() {
            on_conflict.update_columns([
                formula_constant::Column::Value,
                formula_constant::Column::Description,
            ]);
        } else {
            on_conflict.update_column(formula_constant::Column::Value);
        }

        formula_constant::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn usage_factor_find_all(&self) -> anyhow::Result<Vec<UsageFactorRow>> {
        let rows = usage_factor::Entity::find()
            .order_by_asc(usage_factor::Column::SortOrder)
            .order_by_asc(usage_factor::Column::Code)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|u| UsageFactorRow {
                code: u.code,
                label_tr: u.label_tr,
                label_en: u.label_en,
                percentage: u.percentage,
                sort_order: u.sort_order,
                is_default: u.is_default,
            })
            .collect())
    }

    async fn usage_factor_upsert(&self, row: &UsageFactorRow) -> anyhow::Result<()> {
        let tx = self.db.begin().await?;

        let model = usage_factor::ActiveModel {
            code: Set(row.code.clone()),
            label_tr: Set(row.label_tr.clone()),
            label_en: Set(row.label_en.clone()),
            percentage: Set(row.percentage),
            sort_order: Set(row.sort_order),
            is_default: Set(row.is_default),
        };
        usage_factor::Entity::insert(model)
            .on_conflict(
                OnConflict::column(usage_factor::Column::Code)
                    .update_columns([
                        usage_factor::Column::LabelTr,
                        usage_factor::Column::LabelEn,
                        usage_factor::Column::Percentage,
                        usage_factor::Column::SortOrder,
                        usage_factor::Column::IsDefault,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&tx)
            .await?;

        if row.is_default {
            usage_factor::Entity::update_many()
                .col_expr(usage_factor::Column::IsDefault, Expr::value(false))
                .filter(usage_factor::Column::Code.ne(row.code.as_str()))
                .exec(&tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn theme_find_all(&self) -> anyhow::Result<Vec<ThemeRow>> {
        let rows = theme_setting::Entity::find().all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|t| ThemeRow {
                key: t.key,
                value: t.value,
            })
            .collect())
    }

    async fn theme_upsert(&self, entries: &[ThemeRow]) -> anyhow::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let tx = self.db.begin().await?;
        for entry in entries {
            let model = theme_setting::ActiveModel {
                key: Set(entry.key.clone()),
                value: Set(entry.value.clone()),
            };
            theme_setting::Entity::insert(model)
                .on_conflict(
                    OnConflict::column(theme_setting::Column::Key)
                        .update_column(theme_setting::Column::Value)
                        .to_owned(),
                )
                .exec_without_returning(&tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// EtaPersistence implementation
// ============================================================================

#[async_trait]
impl EtaPersistence for SqlPersistService {
    async fn eta_find_all(&self) -> anyhow::Result<Vec<EtaRow>> {
        let rows = product_eta::Entity::find().all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|e| EtaRow {
                product_code: e.product_code,
                bar_type: e.bar_type,
                anchor_id: e.anchor_id,
                eta_enabled: e.eta_enabled,
            })
            .collect())
    }

    async fn eta_upsert(&self, row: &EtaRow) -> anyhow::Result<()> {
        let model = product_eta::ActiveModel {
            product_code: Set(row.product_code.clone()),
            bar_type: Set(row.bar_type.clone()),
            anchor_id: Set(row.anchor_id.clone()),
            eta_enabled: Set(row.eta_enabled),
        };
        product_eta::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    product_eta::Column::ProductCode,
                    product_eta::Column::BarType,
                    product_eta::Column::AnchorId,
                ])
                .update_column(product_eta::Column::EtaEnabled)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn eta_seed_placeholders(&self, scope: &EtaSeedScope) -> anyhow::Result<u64> {
        seed_placeholders(&self.db, scope).await
    }
}

// ============================================================================
// ImagePersistence implementation
// ============================================================================

#[async_trait]
impl ImagePersistence for SqlPersistService {
    async fn image_find_one(
        &self,
        product_code: &str,
        nominal: i32,
    ) -> anyhow::Result<Option<ProductImageData>> {
        Ok(
            product_image::Entity::find_by_id((product_code.to_string(), nominal))
                .one(&self.db)
                .await?
                .map(|m| ProductImageData {
                    content_type: m.content_type,
                    data: m.data,
                }),
        )
    }

    async fn image_upsert(
        &self,
        product_code: &str,
        nominal: i32,
        image: &ProductImageData,
    ) -> anyhow::Result<()> {
        let model = product_image::ActiveModel {
            product_code: Set(product_code.to_string()),
            nominal: Set(nominal),
            content_type: Set(image.content_type.clone()),
            data: Set(image.data.clone()),
            updated_at: Set(chrono::Utc::now().naive_utc()),
        };
        product_image::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    product_image::Column::ProductCode,
                    product_image::Column::Nominal,
                ])
                .update_columns([
                    product_image::Column::ContentType,
                    product_image::Column::Data,
                    product_image::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn image_delete(&self, product_code: &str, nominal: i32) -> anyhow::Result<bool> {
        let result = product_image::Entity::delete_by_id((product_code.to_string(), nominal))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
