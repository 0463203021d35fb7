mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn listing_profiles_requires_a_privileged_role() {
    let app = common::spawn().await;

    let hr = common::login(&app, "hr@company.com", "hr123").await;
    let (status, body) = common::send(&app, "GET", "/api/employees", Some(&hr), None).await;
    assert_eq!(status, StatusCode::OK);
    let employees = body["employees"].as_array().unwrap();
    // Seeded profiles: HR001, MGR001, EMP001, EMP002 (admin has none).
    assert_eq!(employees.len(), 4);
    assert_eq!(employees[0]["employeeCode"], "EMP001");

    let employee = common::login(&app, "john.doe@company.com", "employee123").await;
    let (status, _) = common::send(&app, "GET", "/api/employees", Some(&employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn onboarding_creates_the_account_and_profile_together() {
    let app = common::spawn().await;
    let hr = common::login(&app, "hr@company.com", "hr123").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/employees",
        Some(&hr),
        Some(json!({
            "email": "Nina.Park@Company.com",
            "name": "Nina Park",
            "password": "welcome123",
            "employeeCode": "EMP003",
            "firstName": "Nina",
            "lastName": "Park",
            "position": "Data Analyst",
            "department": "Analytics",
            "hireDate": "2026-02-01",
            "salary": "68000",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let employee = &body["employee"];
    assert_eq!(employee["employeeCode"], "EMP003");
    assert_eq!(employee["email"], "nina.park@company.com");
    assert_eq!(employee["role"], "EMPLOYEE");
    assert_eq!(employee["salary"], 68000.0);

    // The new account can log in and file requests right away.
    let cookie = common::login(&app, "nina.park@company.com", "welcome123").await;
    let (status, body) = common::send(
        &app,
        "POST",
        "/api/requests/general",
        Some(&cookie),
        Some(json!({
            "requestType": "equipment",
            "subject": "Laptop",
            "description": "A laptop for the new desk.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["request"]["employee"]["employeeCode"], "EMP003");
}

#[tokio::test]
async fn onboarding_names_missing_fields() {
    let app = common::spawn().await;
    let hr = common::login(&app, "hr@company.com", "hr123").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/employees",
        Some(&hr),
        Some(json!({ "email": "x@company.com", "name": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Missing required fields:"));
    assert!(message.contains("password"));
    assert!(message.contains("employeeCode"));
    assert!(message.contains("hireDate"));
}

#[tokio::test]
async fn duplicate_email_or_code_is_rejected() {
    let app = common::spawn().await;
    let hr = common::login(&app, "hr@company.com", "hr123").await;

    let valid = json!({
        "email": "john.doe@company.com",
        "name": "Duplicate",
        "password": "pw123456",
        "employeeCode": "EMP009",
        "firstName": "Dup",
        "lastName": "Licate",
        "position": "Tester",
        "department": "QA",
        "hireDate": "2026-01-01",
        "salary": 1000,
    });
    let (status, body) = common::send(&app, "POST", "/api/employees", Some(&hr), Some(valid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already in use");

    let code_clash = json!({
        "email": "fresh@company.com",
        "name": "Fresh",
        "password": "pw123456",
        "employeeCode": "EMP001",
        "firstName": "Fresh",
        "lastName": "Hire",
        "position": "Tester",
        "department": "QA",
        "hireDate": "2026-01-01",
        "salary": 1000,
    });
    let (status, body) =
        common::send(&app, "POST", "/api/employees", Some(&hr), Some(code_clash)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Employee code already in use");
}

#[tokio::test]
async fn managers_cannot_administer_profiles() {
    let app = common::spawn().await;
    let manager = common::login(&app, "manager@company.com", "manager123").await;
    let john = common::employee_id_for(&app.pool, "john.doe@company.com").await;

    let (status, _) = common::send(
        &app,
        "PATCH",
        &format!("/api/employees/{john}"),
        Some(&manager),
        Some(json!({ "position": "Principal Engineer" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn hr_updates_profile_fields_in_place() {
    let app = common::spawn().await;
    let hr = common::login(&app, "hr@company.com", "hr123").await;
    let john = common::employee_id_for(&app.pool, "john.doe@company.com").await;

    let (status, body) = common::send(
        &app,
        "PATCH",
        &format!("/api/employees/{john}"),
        Some(&hr),
        Some(json!({
            "position": "Senior Software Developer",
            "salary": 82000,
            "phone": "+1-555-0999",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let employee = &body["employee"];
    assert_eq!(employee["position"], "Senior Software Developer");
    assert_eq!(employee["salary"], 82000.0);
    assert_eq!(employee["phone"], "+1-555-0999");
    // Untouched fields survive.
    assert_eq!(employee["department"], "Engineering");
    assert_eq!(employee["employeeCode"], "EMP001");
}
