//! Report repository.

use std::sync::Arc;

use crate::entities::{Report, report};
use guardmogo_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<report::Model>> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<report::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))
    }

    /// Create a new report.
    pub async fn create(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new report on the given connection.
    ///
    /// Used by the submission path so the report insert and the number
    /// record upsert land in the same transaction.
    pub async fn create_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: report::ActiveModel,
    ) -> AppResult<report::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get reports for a normalized number (newest first).
    pub async fn find_by_number(&self, number: &str) -> AppResult<Vec<report::Model>> {
        Report::find()
            .filter(report::Column::Number.eq(number))
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get recent reports across all numbers (paginated, newest first).
    pub async fn find_recent(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<report::Model>> {
        let mut query = Report::find()
            .order_by_desc(report::Column::Id)
            .limit(limit);

        if let Some(until) = until_id {
            query = query.filter(report::Column::Id.lt(until));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get reports submitted by a user (paginated, newest first).
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<report::Model>> {
        let mut query = Report::find()
            .filter(report::Column::UserId.eq(user_id))
            .order_by_desc(report::Column::Id)
            .limit(limit);

        if let Some(until) = until_id {
            query = query.filter(report::Column::Id.lt(until));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all reports.
    pub async fn count(&self) -> AppResult<u64> {
        Report::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count reports with the given status.
    pub async fn count_by_status(&self, status: report::ReportStatus) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment comment count atomically (single UPDATE query, no fetch).
    pub async fn increment_comments_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        report_id: &str,
    ) -> AppResult<()> {
        Report::update_many()
            .col_expr(
                report::Column::CommentsCount,
                Expr::col(report::Column::CommentsCount).add(1),
            )
            .filter(report::Column::Id.eq(report_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_report(id: &str, number: &str, user_id: &str) -> report::Model {
        report::Model {
            id: id.to_string(),
            number: number.to_string(),
            carrier: "MTN".to_string(),
            fraud_type: "Fake prize scam".to_string(),
            category: "Fake prize scam".to_string(),
            description: "Caller claimed I had won a promotion prize".to_string(),
            user_id: user_id.to_string(),
            status: report::ReportStatus::Active,
            verified: true,
            upvotes: 0,
            downvotes: 0,
            comments_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let report = create_test_report("report1", "0241234567", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[report.clone()]])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let result = repo.find_by_id("report1").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, "report1");
        assert_eq!(found.number, "0241234567");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<report::Model>::new()])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::ReportNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected ReportNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_number() {
        let report1 = create_test_report("report1", "0241234567", "user1");
        let report2 = create_test_report("report2", "0241234567", "user2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[report1, report2]])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let result = repo.find_by_number("0241234567").await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.number == "0241234567"));
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let report1 = create_test_report("report1", "0241234567", "user1");
        let report2 = create_test_report("report2", "0551112222", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[report1, report2]])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let result = repo.find_by_user("user1", 10, None).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_increment_comments_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ReportRepository::new(db.clone());
        let result = repo.increment_comments_count(db.as_ref(), "report1").await;

        assert!(result.is_ok());
    }
}
