use crate::calendar::{self, month_view, parse_month_anchor, records_in_month};
use crate::errors::AppError;
use crate::models::{
    AttendanceHistory, CalendarRequest, CalendarView, ClassifyRequest, ClassifyResponse,
    ImportResponse, MemberEntry, MonthQuery,
};
use crate::state::AppState;
use crate::status::{self, LegendEntry};
use crate::storage::persist_store;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

pub async fn index() -> Html<String> {
    let today = calendar::today();
    Html(render_index(&format!("{:04}-{:02}", today.year(), today.month())))
}

pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(status::legend())
}

pub async fn classify(Json(payload): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let status = payload.status.as_deref();
    Json(ClassifyResponse {
        normalized: status::normalize(status),
        style: status::classify(status),
        label: status::label(status),
        bucket: status::bucket(status),
        status: payload.status,
    })
}

pub async fn build_calendar(Json(payload): Json<CalendarRequest>) -> Result<Json<CalendarView>, AppError> {
    if calendar::days_in_month(payload.year, payload.month).is_none() {
        return Err(AppError::bad_request("month must be 1-12 for a valid year"));
    }
    let today = match payload.today.as_deref() {
        Some(raw) => parse_today(raw)?,
        None => calendar::today(),
    };
    if payload.summary.is_some() {
        debug!("ignoring server-supplied summary");
    }

    Ok(Json(month_view(&payload.records, payload.year, payload.month, today)))
}

pub async fn list_members(State(state): State<AppState>) -> Json<Vec<MemberEntry>> {
    let store = state.store.lock().await;
    let members = store
        .members
        .iter()
        .map(|(member, records)| MemberEntry {
            member: member.clone(),
            records: records.len(),
        })
        .collect();
    Json(members)
}

pub async fn member_calendar(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarView>, AppError> {
    let member = member_id(&member)?;
    let today = calendar::today();
    let (year, month) = match query.month.as_deref() {
        Some(anchor) => parse_month_anchor(anchor)
            .ok_or_else(|| AppError::bad_request("month must look like YYYY-MM-01"))?,
        None => (today.year(), today.month()),
    };

    let store = state.store.lock().await;
    let history = store
        .members
        .get(&member)
        .ok_or_else(|| AppError::not_found(format!("no attendance history for {member}")))?;

    let records = records_in_month(history, year, month);
    Ok(Json(month_view(&records, year, month, today)))
}

pub async fn import_records(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Json(history): Json<AttendanceHistory>,
) -> Result<Json<ImportResponse>, AppError> {
    let member = member_id(&member)?;
    let received = history.records.len();

    let mut store = state.store.lock().await;
    let mut updated = store.clone();
    let records = updated.merge(&member, history.records);
    persist_store(&state.data_path, &updated).await?;
    *store = updated;

    info!(%member, received, records, "imported attendance records");
    Ok(Json(ImportResponse {
        member,
        received,
        records,
    }))
}

fn member_id(raw: &str) -> Result<String, AppError> {
    let member = raw.trim();
    if member.is_empty() {
        return Err(AppError::bad_request("member id must not be blank"));
    }
    Ok(member.to_string())
}

fn parse_today(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("today must look like YYYY-MM-DD"))
}
