//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use guardmogo_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new comment on the given connection.
    ///
    /// Callers pass the transaction that also bumps the parent report's
    /// comment count.
    pub async fn create_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: comment::ActiveModel,
    ) -> AppResult<comment::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get comments for a report (newest first).
    pub async fn find_by_report(
        &self,
        report_id: &str,
        limit: u64,
    ) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::ReportId.eq(report_id))
            .order_by_desc(comment::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_comment(id: &str, report_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            report_id: report_id.to_string(),
            user_id: "user1".to_string(),
            text: "This number called me too".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_report() {
        let comment1 = create_test_comment("comment1", "report1");
        let comment2 = create_test_comment("comment2", "report1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment1, comment2]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_report("report1", 50).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.report_id == "report1"));
    }

    #[tokio::test]
    async fn test_find_by_report_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_report("report1", 50).await.unwrap();

        assert!(result.is_empty());
    }
}
