//! Schema bootstrap
//!
//! Creates every calculator table from its entity definition when missing.

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

use crate::entity::{
    anchor, cartridge, formula_constant, group, product, product_eta, product_image,
    theme_setting, usage_factor,
};

fn create_table<E: EntityTrait>(
    schema: &Schema,
    entity: E,
) -> sea_orm::sea_query::TableCreateStatement {
    schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned()
}

/// Create all tables that do not exist yet. Existing tables are left as they are.
pub async fn bootstrap_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        create_table(&schema, group::Entity),
        create_table(&schema, product::Entity),
        create_table(&schema, anchor::Entity),
        create_table(&schema, cartridge::Entity),
        create_table(&schema, formula_constant::Entity),
        create_table(&schema, usage_factor::Entity),
        create_table(&schema, theme_setting::Entity),
        create_table(&schema, product_eta::Entity),
        create_table(&schema, product_image::Entity),
    ];

    for statement in &statements {
        db.execute(backend.build(statement)).await?;
    }

    info!(backend = ?backend, tables = statements.len(), "Schema bootstrap complete");
    Ok(())
}
