//! Anchorset Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions for the calculator tables
//! - Persistence trait abstractions, split by category
//! - The SQL backend and schema bootstrap
//! - Row types exchanged with the config service

pub mod entity;
pub mod model;
pub mod schema;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export persistence traits
pub use traits::{
    CalculatorPersistence, CatalogPersistence, EtaPersistence, ImagePersistence,
    SettingsPersistence,
};

// Re-export SQL backend
pub use schema::bootstrap_schema;
pub use sql::SqlPersistService;

// Re-export model types
pub use model::{
    AnchorRow, CartridgeRow, ConstantRow, EtaRow, EtaSeedScope, ProductImageData, ProductRow,
    ProductUpdate, ProductUpdateOutcome, StorageBackend, ThemeRow, UsageFactorRow,
};
