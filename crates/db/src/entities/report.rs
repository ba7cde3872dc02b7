//! Fraud report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Report status.
///
/// Reports go live immediately when submitted; there is no review workflow.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReportStatus {
    #[sea_orm(string_value = "active")]
    Active,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Reported MoMo number (normalized 10-digit local form)
    #[sea_orm(indexed)]
    pub number: String,

    /// Carrier name (MTN, AirtelTigo, Telecel, or free text for "Other")
    pub carrier: String,

    /// Type of fraud (free text, 3-50 characters)
    pub fraud_type: String,

    /// Category (mirrors `fraud_type`, kept for data compatibility)
    pub category: String,

    /// What happened (free text, 10-1000 characters)
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Submitting user ID
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Report status
    pub status: ReportStatus,

    /// Auto-verified when reported
    #[sea_orm(default_value = true)]
    pub verified: bool,

    /// Upvote count (present in schema, no read path consumes it)
    #[sea_orm(default_value = 0)]
    pub upvotes: i32,

    /// Downvote count (present in schema, no read path consumes it)
    #[sea_orm(default_value = 0)]
    pub downvotes: i32,

    /// Comment count (denormalized)
    #[sea_orm(default_value = 0)]
    pub comments_count: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
