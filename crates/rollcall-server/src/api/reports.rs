//! Report endpoints: aggregate figures over the archived history.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use rollcall_core::repository::{HistoryFilter, HistoryRepository, Pagination};
use rollcall_ledger::reports::{
    self, ClassComparison, StatusDistribution, SummaryStats, WeekdayBreakdown,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::extract::ActiveSession;
use crate::state::AppState;

/// Aggregation window: at most one year of class-days per request.
const REPORT_WINDOW: u64 = 365;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(summary))
}

#[derive(Debug, Deserialize)]
struct ReportParams {
    class_id: Option<Uuid>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct ReportsResponse {
    summary: SummaryStats,
    classes: Vec<ClassComparison>,
    distribution: StatusDistribution,
    weekdays: Vec<WeekdayBreakdown>,
}

async fn summary(
    State(state): State<AppState>,
    _session: ActiveSession,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let filter = HistoryFilter {
        class_id: params.class_id,
        query: None,
        from: params.from,
        to: params.to,
    };
    let page = state
        .history
        .list(
            filter,
            Pagination {
                offset: 0,
                limit: REPORT_WINDOW,
            },
        )
        .await?;

    Ok(Json(ReportsResponse {
        summary: reports::summary_stats(&page.items),
        classes: reports::class_comparison(&page.items),
        distribution: reports::status_distribution(&page.items),
        weekdays: reports::weekday_breakdown(&page.items),
    }))
}
