//! Report service.

use std::sync::Arc;

use crate::phone::{self, Carrier};
use guardmogo_common::{AppError, AppResult, IdGenerator};
use guardmogo_db::{
    entities::report::{self, ReportStatus},
    repositories::{NumberRecordRepository, ReportRepository, UserRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

/// Report service for business logic.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DatabaseConnection>,
    report_repo: ReportRepository,
    number_repo: NumberRecordRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for submitting a fraud report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportInput {
    #[validate(length(min = 1, max = 32))]
    pub number: String,

    /// Carrier selection: `MTN`, `AirtelTigo`, `Telecel`, or `Other`.
    #[validate(length(min = 1, max = 64))]
    pub carrier: String,

    /// Carrier name when `Other` is selected.
    #[validate(length(max = 64))]
    pub carrier_name: Option<String>,

    #[validate(length(min = 3, max = 50))]
    pub fraud_type: String,

    #[validate(length(min = 10, max = 1000))]
    pub description: String,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        report_repo: ReportRepository,
        number_repo: NumberRecordRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            db,
            report_repo,
            number_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a fraud report.
    ///
    /// The report insert and the number record update run in one transaction;
    /// a lookup never sees a report without its number record or vice versa.
    /// The submitter's report counter is bumped after commit as a best-effort
    /// step whose failure is logged but does not fail the submission.
    pub async fn create(&self, user_id: &str, input: CreateReportInput) -> AppResult<report::Model> {
        input.validate()?;

        let (carrier_name, known_carrier) = resolve_carrier(&input)?;
        let number = phone::validate(&input.number, known_carrier)?;

        // Reports must be attributable to an account.
        let user = self.user_repo.get_by_id(user_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let report_id = self.id_gen.generate();
        let model = report::ActiveModel {
            id: Set(report_id.clone()),
            number: Set(number.clone()),
            carrier: Set(carrier_name),
            fraud_type: Set(input.fraud_type.trim().to_string()),
            category: Set(input.fraud_type.trim().to_string()),
            description: Set(input.description.trim().to_string()),
            user_id: Set(user.id.clone()),
            status: Set(ReportStatus::Active),
            verified: Set(true),
            upvotes: Set(0),
            downvotes: Set(0),
            comments_count: Set(0),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let report = self.report_repo.create_on(&txn, model).await?;
        self.number_repo
            .apply_report(&txn, &number, &report_id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Err(e) = self.user_repo.increment_reports_count(&user.id).await {
            tracing::warn!(
                user_id = %user.id,
                report_id = %report_id,
                error = %e,
                "Failed to update user report counter"
            );
        }

        tracing::info!(report_id = %report_id, number = %report.number, "Report submitted");

        Ok(report)
    }

    /// Get a report by ID.
    pub async fn get(&self, id: &str) -> AppResult<report::Model> {
        self.report_repo.get_by_id(id).await
    }

    /// List recent reports (newest first).
    pub async fn list_recent(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_recent(limit, until_id).await
    }

    /// List a user's reports (newest first).
    pub async fn list_by_user(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_by_user(user_id, limit, until_id).await
    }
}

/// Resolve the stored carrier name and the carrier to prefix-check against.
fn resolve_carrier(input: &CreateReportInput) -> AppResult<(String, Option<Carrier>)> {
    if let Some(carrier) = Carrier::from_name(&input.carrier) {
        return Ok((carrier.name().to_string(), Some(carrier)));
    }

    if input.carrier.trim() == "Other" {
        let name = input
            .carrier_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        if name.chars().count() < 2 {
            return Err(AppError::Validation(
                "Carrier name must be at least 2 characters".to_string(),
            ));
        }

        return Ok((name.to_string(), None));
    }

    Err(AppError::Validation(format!(
        "Unknown carrier: {}",
        input.carrier
    )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use guardmogo_db::entities::user;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_service(results: Vec<Vec<user::Model>>) -> ReportService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        );
        ReportService::new(
            db.clone(),
            ReportRepository::new(db.clone()),
            NumberRecordRepository::new(db.clone()),
            UserRepository::new(db),
        )
    }

    fn valid_input() -> CreateReportInput {
        CreateReportInput {
            number: "0244123456".to_string(),
            carrier: "MTN".to_string(),
            carrier_name: None,
            fraud_type: "Fake prize scam".to_string(),
            description: "Caller claimed I had won a promotion and asked for a fee".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_short_fraud_type() {
        let service = test_service(vec![]);
        let input = CreateReportInput {
            fraud_type: "ab".to_string(),
            ..valid_input()
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_short_description() {
        let service = test_service(vec![]);
        let input = CreateReportInput {
            description: "too short".to_string(),
            ..valid_input()
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_accepts_description_boundaries() {
        // 10 and 1000 characters pass the derive validation; 9 and 1001 fail.
        for (len, ok) in [(9, false), (10, true), (1000, true), (1001, false)] {
            let input = CreateReportInput {
                description: "x".repeat(len),
                ..valid_input()
            };
            assert_eq!(input.validate().is_ok(), ok, "length {len}");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_carrier_prefix_mismatch() {
        let service = test_service(vec![]);
        let input = CreateReportInput {
            // Telecel prefix submitted as MTN
            number: "0201234567".to_string(),
            ..valid_input()
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_other_carrier_without_name() {
        let service = test_service(vec![]);
        let input = CreateReportInput {
            carrier: "Other".to_string(),
            carrier_name: Some("G".to_string()),
            ..valid_input()
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_single_multibyte_carrier_name() {
        // One character, two bytes; still below the two-character minimum
        let service = test_service(vec![]);
        let input = CreateReportInput {
            carrier: "Other".to_string(),
            carrier_name: Some("Ω".to_string()),
            ..valid_input()
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_resolve_carrier_other_with_name() {
        let input = CreateReportInput {
            carrier: "Other".to_string(),
            carrier_name: Some(" Glo Mobile ".to_string()),
            ..valid_input()
        };

        let (name, known) = resolve_carrier(&input).unwrap();

        assert_eq!(name, "Glo Mobile");
        assert!(known.is_none());
    }

    #[test]
    fn test_resolve_carrier_known() {
        let (name, known) = resolve_carrier(&valid_input()).unwrap();

        assert_eq!(name, "MTN");
        assert_eq!(known, Some(Carrier::Mtn));
    }

    #[tokio::test]
    async fn test_create_unknown_user_is_rejected() {
        let service = test_service(vec![vec![]]);

        let result = service.create("ghost", valid_input()).await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }
}
