//! Attendance history endpoints.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use rollcall_core::repository::{HistoryFilter, HistoryRepository, Pagination};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::extract::ActiveSession;
use crate::api::responses::{DaySummaryResponse, HistoryResponse};
use crate::state::AppState;

/// Page size the history view uses unless the client asks otherwise.
const DEFAULT_PAGE_SIZE: u64 = 15;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    class_id: Option<Uuid>,
    q: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    #[serde(default)]
    offset: u64,
    limit: Option<u64>,
}

async fn list(
    State(state): State<AppState>,
    _session: ActiveSession,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let filter = HistoryFilter {
        class_id: params.class_id,
        query: params.q,
        from: params.from,
        to: params.to,
    };
    let pagination = Pagination {
        offset: params.offset,
        limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state.history.list(filter, pagination).await?;
    Ok(Json(HistoryResponse {
        items: page.items.into_iter().map(DaySummaryResponse::from).collect(),
        total: page.total,
        offset: page.offset,
        limit: page.limit,
    }))
}
