//! Number record entity.
//!
//! Denormalized aggregate keyed by normalized MoMo number, maintained so a
//! lookup can answer "is this number flagged" in one read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "number_record")]
pub struct Model {
    /// Normalized MoMo number (leading-zero 10-digit local form)
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: String,

    /// Running report count (denormalized)
    #[sea_orm(default_value = 0)]
    pub reports_count: i32,

    pub first_reported_at: DateTimeWithTimeZone,

    pub last_reported_at: DateTimeWithTimeZone,

    /// IDs of reports referencing this number
    #[sea_orm(column_type = "JsonBinary")]
    pub report_ids: Json,

    /// Flagged as soon as the first report lands
    #[sea_orm(default_value = true)]
    pub flagged: bool,

    /// Auto-verified when reported
    #[sea_orm(default_value = true)]
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
