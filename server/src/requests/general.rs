use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::Utc;
use entity::{
    general_requests::{self, Priority},
    status::RequestStatus,
};
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
pub struct CreateGeneral {
    pub request_type: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralNode {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub request_type: String,
    pub subject: String,
    pub description: String,
    pub priority: &'static str,
    pub status: &'static str,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub employee: Option<EmployeeSummary>,
}

impl GeneralNode {
    fn new(model: general_requests::Model, employee: Option<EmployeeSummary>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            request_type: model.request_type,
            subject: model.subject,
            description: model.description,
            priority: model.priority.as_str(),
            status: model.status.as_str(),
            created_at: model.created_at,
            updated_at: model.updated_at,
            employee,
        }
    }
}

fn validate(payload: &CreateGeneral) -> ApiResult<(String, String, String, Priority)> {
    let (Some(request_type), Some(subject), Some(description)) = (
        requests::required_text(&payload.request_type),
        requests::required_text(&payload.subject),
        requests::required_text(&payload.description),
    ) else {
        return Err(ApiError::validation(
            "Request type, subject, and description are required",
        ));
    };
    let priority = match payload.priority.as_deref().map(str::trim) {
        None => Priority::Medium,
        Some(raw) => Priority::from_str(raw)
            .ok_or_else(|| ApiError::validation("Invalid priority level"))?,
    };
    Ok((request_type, subject, description, priority))
}

pub async fn list_requests(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<Json<Value>> {
    let user = identity::authenticate(&state, &jar).await?;
    let scope = requests::visibility(&user)?;
    let mut query = general_requests::Entity::find();
    if let Scope::Employee(employee_id) = scope {
        query = query.filter(general_requests::Column::EmployeeId.eq(employee_id));
    }
    let rows = query
        .order_by_desc(general_requests::Column::CreatedAt)
        .order_by_desc(general_requests::Column::Id)
        .all(&state.pool)
        .await
        .map_err(db_error)?;
    let employee_ids: Vec<Uuid> = rows.iter().map(|row| row.employee_id).collect();
    let summaries = requests::employee_summaries(&state.pool, &employee_ids).await?;
    let nodes: Vec<GeneralNode> = rows
        .into_iter()
        .map(|row| {
            let employee = summaries.get(&row.employee_id).cloned();
            GeneralNode::new(row, employee)
        })
        .collect();
    Ok(Json(json!({ "requests": nodes })))
}

pub async fn create_request(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(payload): Json<CreateGeneral>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user = identity::authenticate(&state, &jar).await?;
    let employee_id = requests::require_owner(&user)?;
    let (request_type, subject, description, priority) = validate(&payload)?;

    let now: DateTimeWithTimeZone = Utc::now().into();
    let model = general_requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(employee_id),
        request_type: Set(request_type),
        subject: Set(subject),
        description: Set(description),
        priority: Set(priority),
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
        Json(json!({ "request": GeneralNode::new(model, employee) })),
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
    let model = general_requests::Entity::find_by_id(id)
        .one(&state.pool)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::NotFound)?;
    let mut active: general_requests::ActiveModel = model.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.pool).await.map_err(db_error)?;
    let employee = requests::owner_summary(&state.pool, updated.employee_id).await?;
    Ok(Json(
        json!({ "request": GeneralNode::new(updated, employee) }),
    ))
}
