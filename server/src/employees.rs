//! Employee profile administration. Onboarding creates the user account and
//! its profile in one transaction; profiles are never reassigned.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::{NaiveDate, Utc};
use entity::{employees, users};
use platform_api::{ApiError, ApiResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    prelude::DateTimeWithTimeZone,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::authz::{Action, manages_employees, role_allows};
use crate::http::{AppState, db_error};
use crate::identity::{self, hash_password};
use crate::requests::{parse_amount, required_text};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeNode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<&'static str>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl EmployeeNode {
    fn new(profile: employees::Model, user: Option<users::Model>) -> Self {
        let (name, email, role) = match user {
            Some(user) => (Some(user.name), Some(user.email), Some(user.role.as_str())),
            None => (None, None, None),
        };
        Self {
            id: profile.id,
            user_id: profile.user_id,
            employee_code: profile.employee_code,
            first_name: profile.first_name,
            last_name: profile.last_name,
            position: profile.position,
            department: profile.department,
            hire_date: profile.hire_date,
            salary: profile.salary,
            phone: profile.phone,
            address: profile.address,
            emergency_contact: profile.emergency_contact,
            name,
            email,
            role,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

pub async fn list_employees(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<Json<Value>> {
    let user = identity::authenticate(&state, &jar).await?;
    if !role_allows(user.role, Action::ReadAll) {
        return Err(ApiError::Forbidden);
    }
    let rows = employees::Entity::find()
        .find_also_related(users::Entity)
        .order_by_asc(employees::Column::EmployeeCode)
        .all(&state.pool)
        .await
        .map_err(db_error)?;
    let nodes: Vec<EmployeeNode> = rows
        .into_iter()
        .map(|(profile, user)| EmployeeNode::new(profile, user))
        .collect();
    Ok(Json(json!({ "employees": nodes })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub employee_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<Value>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

struct ValidatedEmployee {
    email: String,
    name: String,
    password: String,
    role: users::Role,
    employee_code: String,
    first_name: String,
    last_name: String,
    position: String,
    department: String,
    hire_date: NaiveDate,
    salary: f64,
    phone: Option<String>,
    address: Option<String>,
    emergency_contact: Option<String>,
}

fn validate_create(payload: &CreateEmployee) -> ApiResult<ValidatedEmployee> {
    let mut missing = Vec::new();
    let mut field = |name: &'static str, value: &Option<String>| {
        let resolved = required_text(value);
        if resolved.is_none() {
            missing.push(name);
        }
        resolved
    };
    let email = field("email", &payload.email);
    let name = field("name", &payload.name);
    let password = field("password", &payload.password);
    let employee_code = field("employeeCode", &payload.employee_code);
    let first_name = field("firstName", &payload.first_name);
    let last_name = field("lastName", &payload.last_name);
    let position = field("position", &payload.position);
    let department = field("department", &payload.department);
    let hire_date_raw = field("hireDate", &payload.hire_date);
    if payload.salary.is_none() {
        missing.push("salary");
    }
    if !missing.is_empty() {
        return Err(ApiError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    let (
        Some(email),
        Some(name),
        Some(password),
        Some(employee_code),
        Some(first_name),
        Some(last_name),
        Some(position),
        Some(department),
        Some(hire_date_raw),
    ) = (
        email,
        name,
        password,
        employee_code,
        first_name,
        last_name,
        position,
        department,
        hire_date_raw,
    )
    else {
        return Err(ApiError::validation("Missing required fields"));
    };

    let role = match payload.role.as_deref().map(str::trim) {
        None => users::Role::Employee,
        Some(raw) => {
            users::Role::from_str(raw).ok_or_else(|| ApiError::validation("Invalid role"))?
        }
    };
    let hire_date = NaiveDate::parse_from_str(hire_date_raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Invalid hire date"))?;
    let salary = payload
        .salary
        .as_ref()
        .and_then(parse_amount)
        .filter(|value| *value >= 0.0)
        .ok_or_else(|| ApiError::validation("Salary must be a non-negative number"))?;

    Ok(ValidatedEmployee {
        email: email.to_lowercase(),
        name,
        password,
        role,
        employee_code,
        first_name,
        last_name,
        position,
        department,
        hire_date,
        salary,
        phone: required_text(&payload.phone),
        address: required_text(&payload.address),
        emergency_contact: required_text(&payload.emergency_contact),
    })
}

pub async fn create_employee(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(payload): Json<CreateEmployee>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let caller = identity::authenticate(&state, &jar).await?;
    if !manages_employees(caller.role) {
        return Err(ApiError::Forbidden);
    }
    let input = validate_create(&payload)?;

    if platform_db::find_user_by_email(&state.pool, &input.email)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(ApiError::validation("Email already in use"));
    }
    let code_taken = employees::Entity::find()
        .filter(employees::Column::EmployeeCode.eq(input.employee_code.clone()))
        .one(&state.pool)
        .await
        .map_err(db_error)?
        .is_some();
    if code_taken {
        return Err(ApiError::validation("Employee code already in use"));
    }

    let password_hash = hash_password(&input.password)?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let user_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();

    let txn = state.pool.begin().await.map_err(db_error)?;
    let user = users::ActiveModel {
        id: Set(user_id),
        email: Set(input.email),
        name: Set(input.name),
        password_hash: Set(password_hash),
        role: Set(input.role),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(db_error)?;
    let profile = employees::ActiveModel {
        id: Set(employee_id),
        user_id: Set(user_id),
        employee_code: Set(input.employee_code),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        position: Set(input.position),
        department: Set(input.department),
        hire_date: Set(input.hire_date),
        salary: Set(input.salary),
        phone: Set(input.phone),
        address: Set(input.address),
        emergency_contact: Set(input.emergency_contact),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(db_error)?;
    txn.commit().await.map_err(db_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "employee": EmployeeNode::new(profile, Some(user)) })),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<Value>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

pub async fn update_employee(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployee>,
) -> ApiResult<Json<Value>> {
    let caller = identity::authenticate(&state, &jar).await?;
    if !manages_employees(caller.role) {
        return Err(ApiError::Forbidden);
    }
    let profile = employees::Entity::find_by_id(id)
        .one(&state.pool)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::NotFound)?;

    let mut active: employees::ActiveModel = profile.into();
    if let Some(first_name) = required_text(&payload.first_name) {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = required_text(&payload.last_name) {
        active.last_name = Set(last_name);
    }
    if let Some(position) = required_text(&payload.position) {
        active.position = Set(position);
    }
    if let Some(department) = required_text(&payload.department) {
        active.department = Set(department);
    }
    if let Some(raw) = payload.salary.as_ref() {
        let salary = parse_amount(raw)
            .filter(|value| *value >= 0.0)
            .ok_or_else(|| ApiError::validation("Salary must be a non-negative number"))?;
        active.salary = Set(salary);
    }
    if payload.phone.is_some() {
        active.phone = Set(required_text(&payload.phone));
    }
    if payload.address.is_some() {
        active.address = Set(required_text(&payload.address));
    }
    if payload.emergency_contact.is_some() {
        active.emergency_contact = Set(required_text(&payload.emergency_contact));
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.pool).await.map_err(db_error)?;

    let user = users::Entity::find_by_id(updated.user_id)
        .one(&state.pool)
        .await
        .map_err(db_error)?;
    Ok(Json(json!({ "employee": EmployeeNode::new(updated, user) })))
}
