//! Credential login and DB-backed sessions. Everything downstream of this
//! module receives a resolved [`AuthUser`] by value; handlers never reach
//! into ambient session state.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use chrono::{Duration, Utc};
use entity::{employees, sessions, users};
use platform_api::{ApiError, ApiResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::Duration as TimeDuration;
use uuid::Uuid;

use crate::http::{AppState, db_error};

pub const SESSION_COOKIE: &str = "__Host-hr_session";

/// Identity resolved from the session boundary. The domain layer trusts
/// this value completely.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: users::Role,
    pub employee: Option<employees::Model>,
}

impl AuthUser {
    pub fn employee_id(&self) -> Option<Uuid> {
        self.employee.as_ref().map(|profile| profile.id)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: &'static str,
    pub employee: Option<EmployeeBrief>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBrief {
    pub id: Uuid,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
}

impl From<&AuthUser> for IdentityPayload {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.user_id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str(),
            employee: user.employee.as_ref().map(|profile| EmployeeBrief {
                id: profile.id,
                employee_code: profile.employee_code.clone(),
                first_name: profile.first_name.clone(),
                last_name: profile.last_name.clone(),
                position: profile.position.clone(),
                department: profile.department.clone(),
            }),
        }
    }
}

pub fn hash_password(plain: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApiError::internal(anyhow::anyhow!("password hashing failed: {err}")))
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Resolve the caller's identity from the session cookie.
pub async fn authenticate(state: &AppState, jar: &PrivateCookieJar) -> ApiResult<AuthUser> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(ApiError::Unauthorized)?;
    let session_id =
        Uuid::parse_str(cookie.value()).map_err(|_| ApiError::Unauthorized)?;
    let session = sessions::Entity::find_by_id(session_id)
        .one(&state.pool)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::Unauthorized)?;
    if session.expires_at.with_timezone(&Utc) < Utc::now() {
        let _ = sessions::Entity::delete_by_id(session_id)
            .exec(&state.pool)
            .await;
        return Err(ApiError::Unauthorized);
    }
    let (user, employee) = platform_db::load_identity(&state.pool, session.user_id)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::Unauthorized)?;
    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
        employee,
    })
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<(PrivateCookieJar, Json<IdentityPayload>)> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::validation("Email and password are required"));
    };
    let email = email.trim().to_lowercase();
    let user = platform_db::find_user_by_email(&state.pool, &email)
        .await
        .map_err(db_error)?;
    let Some(user) = user else {
        return Err(ApiError::Unauthorized);
    };
    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    let ttl_days = state.config.session_ttl_days;
    let session_id = Uuid::new_v4();
    let now = Utc::now();
    sessions::ActiveModel {
        id: Set(session_id),
        user_id: Set(user.id),
        created_at: Set(now.into()),
        expires_at: Set((now + Duration::days(ttl_days)).into()),
    }
    .insert(&state.pool)
    .await
    .map_err(db_error)?;

    let employee = employees::Entity::find()
        .filter(employees::Column::UserId.eq(user.id))
        .one(&state.pool)
        .await
        .map_err(db_error)?;
    let auth_user = AuthUser {
        user_id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
        employee,
    };

    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::days(ttl_days))
        .build();
    Ok((jar.add(cookie), Json(IdentityPayload::from(&auth_user))))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<(PrivateCookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(session_id) = Uuid::parse_str(cookie.value()) {
            let _ = sessions::Entity::delete_by_id(session_id)
                .exec(&state.pool)
                .await;
        }
    }
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn me_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<Json<Value>> {
    let user = authenticate(&state, &jar).await?;
    Ok(Json(json!({ "user": IdentityPayload::from(&user) })))
}
