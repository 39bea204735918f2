//! Row types exchanged between the persistence layer and the config service
//!
//! These mirror the stored columns one-to-one. Raw strings (bar types, theme
//! keys) are kept as stored; the mappers decide what to do with unknown values.

use serde::{Deserialize, Serialize};

/// SQL dialect behind the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    Sqlite,
    MySql,
    Postgres,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::MySql => write!(f, "mysql"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "mysql" => Ok(StorageBackend::MySql),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

impl From<sea_orm::DbBackend> for StorageBackend {
    fn from(value: sea_orm::DbBackend) -> Self {
        match value {
            sea_orm::DbBackend::Sqlite => StorageBackend::Sqlite,
            sea_orm::DbBackend::MySql => StorageBackend::MySql,
            sea_orm::DbBackend::Postgres => StorageBackend::Postgres,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    pub code: String,
    pub display_name: String,
    pub group_key: String,
    pub eta_approved: bool,
}

/// Partial product update; `None` leaves the column untouched
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub display_name: Option<String>,
    pub group_key: Option<String>,
    pub eta_approved: Option<bool>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.group_key.is_none() && self.eta_approved.is_none()
    }
}

/// Outcome of a product update
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductUpdateOutcome {
    NotFound,
    Updated { group_changed: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorRow {
    pub group_key: String,
    pub bar_type: String,
    pub id: String,
    pub d0: f64,
    pub da: Option<f64>,
    pub hef: f64,
    pub hmin: Option<f64>,
    pub hmax: Option<f64>,
    /// `None` when the column is null, which reads as active
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartridgeRow {
    pub group_key: String,
    pub nominal: i32,
    pub net: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantRow {
    pub key: String,
    pub value: f64,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageFactorRow {
    pub code: String,
    pub label_tr: String,
    pub label_en: String,
    pub percentage: f64,
    pub sort_order: i32,
    pub is_default: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRow {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaRow {
    pub product_code: String,
    pub bar_type: String,
    pub anchor_id: String,
    pub eta_enabled: bool,
}

/// Which product/anchor pairs should receive a disabled ETA placeholder
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EtaSeedScope {
    /// Every anchor of `group_key` paired with one product
    Product {
        product_code: String,
        group_key: String,
    },
    /// One anchor paired with every product of its group
    Anchor {
        group_key: String,
        bar_type: String,
        anchor_id: String,
    },
}

/// Stored image payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductImageData {
    pub content_type: String,
    pub data: Vec<u8>,
}
