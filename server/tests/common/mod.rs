#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use axum_extra::extract::cookie::Key;
use chrono::Utc;
use entity::{employees, users};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, EntityTrait, QueryFilter, Set,
    prelude::DateTimeWithTimeZone,
};
use serde_json::Value;
use server::{
    config::AppConfig,
    http::{AppState, build_router},
    identity::hash_password,
    seed,
};
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
}

/// In-memory database, migrated and seeded with the demo fixtures.
pub async fn spawn() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).sqlx_logging(false);
    let pool = Database::connect(options).await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    seed::run(&pool).await.unwrap();

    let config = AppConfig {
        cookie_key: Key::derive_from(&[7u8; 64]),
        cors_allowed_origins: vec![],
        session_ttl_days: 30,
    };
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    };
    TestApp {
        router: build_router(state),
        pool,
    }
}

pub async fn send_raw(
    app: &TestApp,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send_raw(app, method, uri, cookie, body).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Log in and return the session cookie pair (`name=value`).
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = send_raw(
        app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login failed for {email}");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// Insert a bare user account (no employee profile).
pub async fn insert_user(pool: &DbPool, email: &str, role: users::Role, password: &str) -> Uuid {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let user_id = Uuid::new_v4();
    users::ActiveModel {
        id: Set(user_id),
        email: Set(email.into()),
        name: Set(email.into()),
        password_hash: Set(hash_password(password).unwrap()),
        role: Set(role),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(pool)
    .await
    .unwrap();
    user_id
}

/// Employee id for a seeded account, looked up by email.
pub async fn employee_id_for(pool: &DbPool, email: &str) -> Uuid {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(pool)
        .await
        .unwrap()
        .expect("user not seeded");
    employees::Entity::find()
        .filter(employees::Column::UserId.eq(user.id))
        .one(pool)
        .await
        .unwrap()
        .expect("employee profile not seeded")
        .id
}
