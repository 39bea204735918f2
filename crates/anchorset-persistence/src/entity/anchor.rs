//! Anchor entity
//!
//! Anchors are identified by `(group_key, bar_type, id)`. Dimensions are in mm.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anchors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub group_key: String,
    /// `threaded` or `rebar`
    #[sea_orm(primary_key, auto_increment = false)]
    pub bar_type: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Hole diameter
    pub d0: f64,
    /// Bar diameter
    pub da: Option<f64>,
    /// Effective embedment depth
    pub hef: f64,
    pub hmin: Option<f64>,
    pub hmax: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
