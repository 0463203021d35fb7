use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::{NaiveDate, Utc};
use entity::{status::RequestStatus, vacation_requests};
use platform_api::{ApiError, ApiResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    prelude::DateTimeWithTimeZone,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::http::{AppState, db_error};
use crate::identity;
use crate::requests::{self, EmployeeSummary, ReviewPayload, Scope};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVacation {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationNode {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: i32,
    pub reason: Option<String>,
    pub status: &'static str,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub employee: Option<EmployeeSummary>,
}

impl VacationNode {
    fn new(model: vacation_requests::Model, employee: Option<EmployeeSummary>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            start_date: model.start_date,
            end_date: model.end_date,
            days_requested: model.days_requested,
            reason: model.reason,
            status: model.status.as_str(),
            created_at: model.created_at,
            updated_at: model.updated_at,
            employee,
        }
    }
}

/// Inclusive day count; weekends count like any other day.
pub(crate) fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn parse_date(raw: &str, label: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Invalid {label}")))
}

fn validate(
    payload: &CreateVacation,
    today: NaiveDate,
) -> ApiResult<(NaiveDate, NaiveDate, i32, Option<String>)> {
    let (Some(start_raw), Some(end_raw)) = (
        requests::required_text(&payload.start_date),
        requests::required_text(&payload.end_date),
    ) else {
        return Err(ApiError::validation("Start date and end date are required"));
    };
    let start = parse_date(&start_raw, "start date")?;
    let end = parse_date(&end_raw, "end date")?;
    if start >= end {
        return Err(ApiError::validation("End date must be after start date"));
    }
    if start < today {
        return Err(ApiError::validation("Start date cannot be in the past"));
    }
    let reason = requests::required_text(&payload.reason);
    Ok((start, end, inclusive_days(start, end) as i32, reason))
}

pub async fn list_requests(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<Json<Value>> {
    let user = identity::authenticate(&state, &jar).await?;
    let scope = requests::visibility(&user)?;
    let mut query = vacation_requests::Entity::find();
    if let Scope::Employee(employee_id) = scope {
        query = query.filter(vacation_requests::Column::EmployeeId.eq(employee_id));
    }
    let rows = query
        .order_by_desc(vacation_requests::Column::CreatedAt)
        .order_by_desc(vacation_requests::Column::Id)
        .all(&state.pool)
        .await
        .map_err(db_error)?;
    let employee_ids: Vec<Uuid> = rows.iter().map(|row| row.employee_id).collect();
    let summaries = requests::employee_summaries(&state.pool, &employee_ids).await?;
    let nodes: Vec<VacationNode> = rows
        .into_iter()
        .map(|row| {
            let employee = summaries.get(&row.employee_id).cloned();
            VacationNode::new(row, employee)
        })
        .collect();
    Ok(Json(json!({ "requests": nodes })))
}

pub async fn create_request(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(payload): Json<CreateVacation>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user = identity::authenticate(&state, &jar).await?;
    let employee_id = requests::require_owner(&user)?;
    let today = Utc::now().date_naive();
    let (start, end, days, reason) = validate(&payload, today)?;

    let now: DateTimeWithTimeZone = Utc::now().into();
    let model = vacation_requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(employee_id),
        start_date: Set(start),
        end_date: Set(end),
        days_requested: Set(days),
        reason: Set(reason),
        status: Set(RequestStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.pool)
    .await
    .map_err(db_error)?;

    let employee = requests::owner_summary(&state.pool, employee_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "request": VacationNode::new(model, employee) })),
    ))
}

pub async fn review_request(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> ApiResult<Json<Value>> {
    let user = identity::authenticate(&state, &jar).await?;
    requests::require_reviewer(&user)?;
    let status = requests::parse_review_status(&payload)?;
    let model = vacation_requests::Entity::find_by_id(id)
        .one(&state.pool)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::NotFound)?;
    let mut active: vacation_requests::ActiveModel = model.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.pool).await.map_err(db_error)?;
    let employee = requests::owner_summary(&state.pool, updated.employee_id).await?;
    Ok(Json(
        json!({ "request": VacationNode::new(updated, employee) }),
    ))
}
