use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::Utc;
use entity::{
    fund_requests::{self, FundType},
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
pub struct CreateFund {
    pub fund_type: Option<String>,
    pub amount: Option<Value>,
    pub reason: Option<String>,
    pub request_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundNode {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub fund_type: &'static str,
    pub amount: f64,
    pub reason: String,
    pub request_type: String,
    pub status: &'static str,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub employee: Option<EmployeeSummary>,
}

impl FundNode {
    fn new(model: fund_requests::Model, employee: Option<EmployeeSummary>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            fund_type: model.fund_type.as_str(),
            amount: model.amount,
            reason: model.reason,
            request_type: model.request_type,
            status: model.status.as_str(),
            created_at: model.created_at,
            updated_at: model.updated_at,
            employee,
        }
    }
}

fn validate(payload: &CreateFund) -> ApiResult<(FundType, f64, String, String)> {
    let fund_type_raw = requests::required_text(&payload.fund_type);
    let reason = requests::required_text(&payload.reason);
    let request_type = requests::required_text(&payload.request_type);
    let (Some(fund_type_raw), Some(amount_raw), Some(reason), Some(request_type)) = (
        fund_type_raw,
        payload.amount.as_ref(),
        reason,
        request_type,
    ) else {
        return Err(ApiError::validation("All fields are required"));
    };
    let fund_type = FundType::from_str(&fund_type_raw)
        .ok_or_else(|| ApiError::validation("Invalid fund type"))?;
    let amount = requests::parse_amount(amount_raw)
        .filter(|value| *value > 0.0)
        .ok_or_else(|| ApiError::validation("Amount must be a positive number"))?;
    Ok((fund_type, amount, reason, request_type))
}

pub async fn list_requests(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<Json<Value>> {
    let user = identity::authenticate(&state, &jar).await?;
    let scope = requests::visibility(&user)?;
    let mut query = fund_requests::Entity::find();
    if let Scope::Employee(employee_id) = scope {
        query = query.filter(fund_requests::Column::EmployeeId.eq(employee_id));
    }
    let rows = query
        .order_by_desc(fund_requests::Column::CreatedAt)
        .order_by_desc(fund_requests::Column::Id)
        .all(&state.pool)
        .await
        .map_err(db_error)?;
    let employee_ids: Vec<Uuid> = rows.iter().map(|row| row.employee_id).collect();
    let summaries = requests::employee_summaries(&state.pool, &employee_ids).await?;
    let nodes: Vec<FundNode> = rows
        .into_iter()
        .map(|row| {
            let employee = summaries.get(&row.employee_id).cloned();
            FundNode::new(row, employee)
        })
        .collect();
    Ok(Json(json!({ "requests": nodes })))
}

pub async fn create_request(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(payload): Json<CreateFund>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user = identity::authenticate(&state, &jar).await?;
    let employee_id = requests::require_owner(&user)?;
    let (fund_type, amount, reason, request_type) = validate(&payload)?;

    let now: DateTimeWithTimeZone = Utc::now().into();
    let model = fund_requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(employee_id),
        fund_type: Set(fund_type),
        amount: Set(amount),
        reason: Set(reason),
        request_type: Set(request_type),
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
        Json(json!({ "request": FundNode::new(model, employee) })),
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
    let model = fund_requests::Entity::find_by_id(id)
        .one(&state.pool)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::NotFound)?;
    let mut active: fund_requests::ActiveModel = model.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.pool).await.map_err(db_error)?;
    let employee = requests::owner_summary(&state.pool, updated.employee_id).await?;
    Ok(Json(json!({ "request": FundNode::new(updated, employee) })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(fund_type: &str, amount: Value) -> CreateFund {
        CreateFund {
            fund_type: Some(fund_type.into()),
            amount: Some(amount),
            reason: Some("conference travel".into()),
            request_type: Some("reimbursement".into()),
        }
    }

    #[test]
    fn accepts_numeric_strings_for_amount() {
        let (fund_type, amount, _, _) = validate(&payload("TRAVEL", json!("250.75"))).unwrap();
        assert_eq!(fund_type, FundType::Travel);
        assert_eq!(amount, 250.75);
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for bad in [json!(0), json!(-10), json!("0"), json!("-2.5")] {
            let err = validate(&payload("TRAVEL", bad)).unwrap_err();
            assert_eq!(err.to_string(), "Amount must be a positive number");
        }
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        let err = validate(&payload("TRAVEL", json!("lots"))).unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a positive number");
    }

    #[test]
    fn rejects_unknown_fund_types() {
        let err = validate(&payload("YACHT", json!(100))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid fund type");
    }

    #[test]
    fn missing_fields_fail_before_domain_checks() {
        let err = validate(&CreateFund {
            fund_type: Some("YACHT".into()),
            amount: None,
            reason: Some("r".into()),
            request_type: Some("t".into()),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
    }
}
