//! Number lookup service.

use crate::phone;
use guardmogo_common::AppResult;
use guardmogo_db::{
    entities::{number_record, report},
    repositories::{NumberRecordRepository, ReportRepository},
};
use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Number lookup service.
#[derive(Clone)]
pub struct NumberService {
    number_repo: NumberRecordRepository,
    report_repo: ReportRepository,
}

/// Outcome of a number lookup.
pub struct NumberCheckResult {
    /// The normalized number that was queried.
    pub number: String,
    /// Whether anything is known about this number.
    pub found: bool,
    pub flagged: bool,
    pub verified: bool,
    /// Count taken from the fetched reports, not the cached counter.
    pub reports_count: usize,
    pub first_reported_at: Option<DateTimeWithTimeZone>,
    pub last_reported_at: Option<DateTimeWithTimeZone>,
    /// Reports for this number, newest first.
    pub reports: Vec<report::Model>,
}

impl NumberService {
    /// Create a new number service.
    #[must_use]
    pub const fn new(number_repo: NumberRecordRepository, report_repo: ReportRepository) -> Self {
        Self {
            number_repo,
            report_repo,
        }
    }

    /// Look up a number.
    ///
    /// The query input goes through the same normalization as report
    /// submission, so `+233 24 ...` and `024...` hit the same record. When
    /// reports exist without a number record the verdict is synthesized from
    /// the reports themselves.
    pub async fn check(&self, input: &str) -> AppResult<NumberCheckResult> {
        let number = phone::normalize(input);

        let reports = self.report_repo.find_by_number(&number).await?;
        let record = self.number_repo.find_by_number(&number).await?;

        if let Some(record) = record {
            return Ok(NumberCheckResult {
                number,
                found: true,
                flagged: record.flagged,
                verified: record.verified,
                reports_count: reports.len(),
                first_reported_at: Some(record.first_reported_at),
                last_reported_at: Some(record.last_reported_at),
                reports,
            });
        }

        if !reports.is_empty() {
            // Reports are newest first, so the range is last..first.
            let first_reported_at = reports.last().map(|r| r.created_at);
            let last_reported_at = reports.first().map(|r| r.created_at);

            return Ok(NumberCheckResult {
                number,
                found: true,
                flagged: true,
                verified: true,
                reports_count: reports.len(),
                first_reported_at,
                last_reported_at,
                reports,
            });
        }

        Ok(NumberCheckResult {
            number,
            found: false,
            flagged: false,
            verified: false,
            reports_count: 0,
            first_reported_at: None,
            last_reported_at: None,
            reports: vec![],
        })
    }

    /// Most reported numbers.
    pub async fn top(&self, limit: u64) -> AppResult<Vec<number_record::Model>> {
        self.number_repo.find_top(limit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use guardmogo_db::entities::report::ReportStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_report(id: &str, number: &str) -> report::Model {
        report::Model {
            id: id.to_string(),
            number: number.to_string(),
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

    fn create_test_record(number: &str, reports_count: i32) -> number_record::Model {
        number_record::Model {
            number: number.to_string(),
            reports_count,
            first_reported_at: Utc::now().into(),
            last_reported_at: Utc::now().into(),
            report_ids: json!(["report1"]),
            flagged: true,
            verified: true,
        }
    }

    fn test_service(
        reports: Vec<report::Model>,
        records: Vec<number_record::Model>,
    ) -> NumberService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([reports])
                .append_query_results([records])
                .into_connection(),
        );
        NumberService::new(NumberRecordRepository::new(db.clone()), ReportRepository::new(db))
    }

    #[tokio::test]
    async fn test_check_with_record_counts_actual_reports() {
        // Record claims 5 but only 2 reports exist; the list wins.
        let reports = vec![
            create_test_report("report2", "0241234567"),
            create_test_report("report1", "0241234567"),
        ];
        let service = test_service(reports, vec![create_test_record("0241234567", 5)]);

        let result = service.check("0241234567").await.unwrap();

        assert!(result.found);
        assert!(result.flagged);
        assert_eq!(result.reports_count, 2);
        assert_eq!(result.reports.len(), 2);
    }

    #[tokio::test]
    async fn test_check_reports_without_record_is_flagged() {
        let reports = vec![create_test_report("report1", "0241234567")];
        let service = test_service(reports, vec![]);

        let result = service.check("0241234567").await.unwrap();

        assert!(result.found);
        assert!(result.flagged);
        assert_eq!(result.reports_count, 1);
        assert!(result.first_reported_at.is_some());
    }

    #[tokio::test]
    async fn test_check_unknown_number_is_clean() {
        let service = test_service(vec![], vec![]);

        let result = service.check("0209999999").await.unwrap();

        assert!(!result.found);
        assert!(!result.flagged);
        assert_eq!(result.reports_count, 0);
        assert!(result.reports.is_empty());
    }

    #[tokio::test]
    async fn test_check_normalizes_query_input() {
        let service = test_service(vec![], vec![]);

        let result = service.check("+233 24 123 4567").await.unwrap();

        assert_eq!(result.number, "0241234567");
    }
}
