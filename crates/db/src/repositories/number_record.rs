//! Number record repository.

use std::sync::Arc;

use crate::entities::{NumberRecord, number_record};
use chrono::Utc;
use guardmogo_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use serde_json::json;

/// Number record repository for database operations.
#[derive(Clone)]
pub struct NumberRecordRepository {
    db: Arc<DatabaseConnection>,
}

impl NumberRecordRepository {
    /// Create a new number record repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a record by normalized number.
    pub async fn find_by_number(&self, number: &str) -> AppResult<Option<number_record::Model>> {
        NumberRecord::find_by_id(number)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fold a new report into the record for its number.
    ///
    /// Runs a single atomic UPDATE that bumps `reports_count`, appends the
    /// report ID to `report_ids` and refreshes `last_reported_at`. When no
    /// record exists yet the UPDATE touches zero rows and a fresh record is
    /// inserted instead. Callers pass the transaction that also carries the
    /// report insert, so either both writes land or neither does.
    pub async fn apply_report<C: ConnectionTrait>(
        &self,
        conn: &C,
        number: &str,
        report_id: &str,
    ) -> AppResult<number_record::Model> {
        let now = Utc::now();

        let updated = NumberRecord::update_many()
            .col_expr(
                number_record::Column::ReportsCount,
                Expr::col(number_record::Column::ReportsCount).add(1),
            )
            .col_expr(
                number_record::Column::ReportIds,
                Expr::cust_with_values("report_ids || $1", [json!([report_id])]),
            )
            .col_expr(
                number_record::Column::LastReportedAt,
                Expr::value(sea_orm::Value::from(now)),
            )
            .col_expr(number_record::Column::Flagged, Expr::value(true))
            .col_expr(number_record::Column::Verified, Expr::value(true))
            .filter(number_record::Column::Number.eq(number))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            let model = number_record::ActiveModel {
                number: Set(number.to_string()),
                reports_count: Set(1),
                first_reported_at: Set(now.into()),
                last_reported_at: Set(now.into()),
                report_ids: Set(json!([report_id])),
                flagged: Set(true),
                verified: Set(true),
            };

            return model
                .insert(conn)
                .await
                .map_err(|e| AppError::Database(e.to_string()));
        }

        NumberRecord::find_by_id(number)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NumberNotFound(number.to_string()))
    }

    /// Get the most reported numbers.
    pub async fn find_top(&self, limit: u64) -> AppResult<Vec<number_record::Model>> {
        NumberRecord::find()
            .order_by_desc(number_record::Column::ReportsCount)
            .order_by_desc(number_record::Column::LastReportedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all tracked numbers.
    pub async fn count(&self) -> AppResult<u64> {
        NumberRecord::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
