//! Dashboard statistics service.

use guardmogo_common::AppResult;
use guardmogo_db::{
    entities::{number_record, report::ReportStatus},
    repositories::{NumberRecordRepository, ReportRepository},
};

/// Number of top reported numbers shown on the dashboard.
const TOP_NUMBERS_LIMIT: u64 = 5;

/// Dashboard statistics service.
#[derive(Clone)]
pub struct DashboardService {
    report_repo: ReportRepository,
    number_repo: NumberRecordRepository,
}

/// Aggregated dashboard statistics, computed exactly at call time.
pub struct DashboardStats {
    pub total_reports: u64,
    pub total_numbers: u64,
    pub active_reports: u64,
    pub top_numbers: Vec<number_record::Model>,
}

impl DashboardService {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(report_repo: ReportRepository, number_repo: NumberRecordRepository) -> Self {
        Self {
            report_repo,
            number_repo,
        }
    }

    /// Compute dashboard statistics.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let total_reports = self.report_repo.count().await?;
        let total_numbers = self.number_repo.count().await?;
        let active_reports = self
            .report_repo
            .count_by_status(ReportStatus::Active)
            .await?;
        let top_numbers = self.number_repo.find_top(TOP_NUMBERS_LIMIT).await?;

        Ok(DashboardStats {
            total_reports,
            total_numbers,
            active_reports,
            top_numbers,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn count_result(count: i64) -> Vec<std::collections::BTreeMap<&'static str, sea_orm::Value>> {
        vec![std::collections::BTreeMap::from([(
            "num_items",
            sea_orm::Value::BigInt(Some(count)),
        )])]
    }

    #[tokio::test]
    async fn test_stats_aggregates_counts() {
        let record = number_record::Model {
            number: "0241234567".to_string(),
            reports_count: 12,
            first_reported_at: Utc::now().into(),
            last_reported_at: Utc::now().into(),
            report_ids: json!(["report1"]),
            flagged: true,
            verified: true,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([count_result(42)])
                .append_query_results([count_result(17)])
                .append_query_results([count_result(42)])
                .append_query_results([vec![record]])
                .into_connection(),
        );

        let service = DashboardService::new(
            ReportRepository::new(db.clone()),
            NumberRecordRepository::new(db),
        );

        let stats = service.stats().await.unwrap();

        assert_eq!(stats.total_reports, 42);
        assert_eq!(stats.total_numbers, 17);
        assert_eq!(stats.active_reports, 42);
        assert_eq!(stats.top_numbers.len(), 1);
    }
}
