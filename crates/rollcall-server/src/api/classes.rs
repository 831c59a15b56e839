//! Class catalog and scanning-session endpoints.

use std::collections::hash_map::Entry;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rollcall_core::models::class::ClassInfo;
use rollcall_ledger::{AttendanceLedger, MarkSource};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::extract::ActiveSession;
use crate::api::responses::{
    DaySummaryResponse, MarkResponse, RosterResponse, ScanResponse, StudentResponse,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes))
        .route("/{class_id}/roster", get(roster))
        .route("/{class_id}/scan", post(scan))
        .route("/{class_id}/search", get(search))
        .route("/{class_id}/recent", get(recent))
        .route("/{class_id}/close", post(close))
}

async fn list_classes(
    State(state): State<AppState>,
    _session: ActiveSession,
) -> Result<Json<Vec<ClassInfo>>, ApiError> {
    Ok(Json(state.rosters.list_classes().await?))
}

/// Run `f` against the class's open ledger, opening a fresh scanning
/// session first if none exists. The map lock serializes marking per
/// roster.
async fn with_ledger<T>(
    state: &AppState,
    class_id: Uuid,
    f: impl FnOnce(&mut AttendanceLedger) -> T,
) -> Result<T, ApiError> {
    let mut ledgers = state.ledgers.lock().await;
    let ledger = match ledgers.entry(class_id) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            let ledger = AttendanceLedger::open(class_id, &state.rosters).await?;
            entry.insert(ledger)
        }
    };
    Ok(f(ledger))
}

async fn roster(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(class_id): Path<Uuid>,
) -> Result<Json<RosterResponse>, ApiError> {
    let response = with_ledger(&state, class_id, |ledger| {
        let roster = ledger.roster();
        RosterResponse {
            class_id: roster.class_id,
            class_name: roster.class_name.clone(),
            subject_code: roster.subject_code.clone(),
            counts: ledger.counts(),
            students: roster.students.iter().map(StudentResponse::from).collect(),
        }
    })
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ScanRequest {
    /// Decoded QR payload or the id picked through manual search.
    student_id: String,
    #[serde(default)]
    source: MarkSource,
}

async fn scan(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(class_id): Path<Uuid>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<MarkResponse>, ApiError> {
    let result = with_ledger(&state, class_id, |ledger| {
        let record = ledger.mark_attendance(&body.student_id, body.source)?;
        Ok::<_, ApiError>(MarkResponse {
            student: StudentResponse::from(&record),
            counts: ledger.counts(),
        })
    })
    .await??;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(class_id): Path<Uuid>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let matches = with_ledger(&state, class_id, |ledger| {
        ledger
            .search_roster(&params.q)
            .map(StudentResponse::from)
            .collect::<Vec<_>>()
    })
    .await?;
    Ok(Json(matches))
}

async fn recent(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<ScanResponse>>, ApiError> {
    let scans = with_ledger(&state, class_id, |ledger| {
        ledger.recent_scans().map(ScanResponse::from).collect::<Vec<_>>()
    })
    .await?;
    Ok(Json(scans))
}

/// End the scanning session and archive today's counts.
async fn close(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(class_id): Path<Uuid>,
) -> Result<Json<DaySummaryResponse>, ApiError> {
    let ledger = state
        .ledgers
        .lock()
        .await
        .remove(&class_id)
        .ok_or_else(|| ApiError::not_found("no open scanning session for this class"))?;

    let summary = state.history.append(ledger.close()).await?;
    Ok(Json(summary.into()))
}
