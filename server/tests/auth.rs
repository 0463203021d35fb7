mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_resolves_the_full_identity() {
    let app = common::spawn().await;
    let (status, body) = common::send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "hr@company.com", "password": "hr123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "HR");
    assert_eq!(body["email"], "hr@company.com");
    assert_eq!(body["employee"]["employeeCode"], "HR001");
    assert_eq!(body["employee"]["department"], "Human Resources");
}

#[tokio::test]
async fn me_round_trips_the_session_cookie() {
    let app = common::spawn().await;
    let cookie = common::login(&app, "john.doe@company.com", "employee123").await;

    let (status, body) = common::send(&app, "GET", "/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "EMPLOYEE");
    assert_eq!(body["user"]["name"], "John Doe");
    assert_eq!(body["user"]["employee"]["employeeCode"], "EMP001");
}

#[tokio::test]
async fn admin_identity_has_no_employee_profile() {
    let app = common::spawn().await;
    let cookie = common::login(&app, "admin@company.com", "admin123").await;

    let (status, body) = common::send(&app, "GET", "/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "ADMIN");
    assert!(body["user"]["employee"].is_null());
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = common::spawn().await;
    for payload in [
        json!({ "email": "hr@company.com", "password": "wrong" }),
        json!({ "email": "nobody@company.com", "password": "hr123" }),
    ] {
        let (status, body) = common::send(&app, "POST", "/auth/login", None, Some(payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn me_without_a_cookie_is_unauthorized() {
    let app = common::spawn().await;
    let (status, _) = common::send(&app, "GET", "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = common::spawn().await;
    let cookie = common::login(&app, "hr@company.com", "hr123").await;

    let (status, _) = common::send(&app, "POST", "/auth/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The cookie still decrypts, but its session row is gone.
    let (status, _) = common::send(&app, "GET", "/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
