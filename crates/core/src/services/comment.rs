//! Comment service.

use std::sync::Arc;

use guardmogo_common::{AppError, AppResult, IdGenerator};
use guardmogo_db::{
    entities::comment,
    repositories::{CommentRepository, ReportRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    db: Arc<DatabaseConnection>,
    comment_repo: CommentRepository,
    report_repo: ReportRepository,
    id_gen: IdGenerator,
}

/// Input for creating a comment on a report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub report_id: String,

    #[validate(length(min = 1, max = 500))]
    pub text: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        comment_repo: CommentRepository,
        report_repo: ReportRepository,
    ) -> Self {
        Self {
            db,
            comment_repo,
            report_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a comment to a report.
    ///
    /// The comment insert and the report's comment counter update run in one
    /// transaction.
    pub async fn create(&self, user_id: &str, input: CreateCommentInput) -> AppResult<comment::Model> {
        input.validate()?;

        let report = self.report_repo.get_by_id(&input.report_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            report_id: Set(report.id.clone()),
            user_id: Set(user_id.to_string()),
            text: Set(input.text.trim().to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let comment = self.comment_repo.create_on(&txn, model).await?;
        self.report_repo
            .increment_comments_count(&txn, &report.id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(comment)
    }

    /// List comments on a report (newest first).
    pub async fn list(&self, report_id: &str, limit: u64) -> AppResult<Vec<comment::Model>> {
        // 404 for comments on a report that does not exist
        self.report_repo.get_by_id(report_id).await?;
        self.comment_repo.find_by_report(report_id, limit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use guardmogo_db::entities::report::{self, ReportStatus};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_report(id: &str) -> report::Model {
        report::Model {
            id: id.to_string(),
            number: "0241234567".to_string(),
            carrier: "MTN".to_string(),
            fraud_type: "Fake prize scam".to_string(),
            category: "Fake prize scam".to_string(),
            description: "Caller claimed I had won a promotion prize".to_string(),
            user_id: "user1".to_string(),
            status: ReportStatus::Active,
            verified: true,
            upvotes: 0,
            downvotes: 0,
            comments_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_service(reports: Vec<report::Model>) -> CommentService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([reports])
                .into_connection(),
        );
        CommentService::new(
            db.clone(),
            CommentRepository::new(db.clone()),
            ReportRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_empty_text() {
        let service = test_service(vec![]);

        let result = service
            .create(
                "user1",
                CreateCommentInput {
                    report_id: "report1".to_string(),
                    text: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_on_missing_report_is_not_found() {
        let service = test_service(vec![]);

        let result = service
            .create(
                "user1",
                CreateCommentInput {
                    report_id: "missing".to_string(),
                    text: "This number called me too".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ReportNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_on_missing_report_is_not_found() {
        let service = test_service(vec![]);

        let result = service.list("missing", 50).await;

        assert!(matches!(result, Err(AppError::ReportNotFound(_))));
    }
}
