mod common;

use axum::http::StatusCode;
use chrono::{NaiveDate, TimeZone, Utc};
use entity::{status::RequestStatus, users::Role, vacation_requests};
use sea_orm::{ActiveModelTrait, Set, prelude::DateTimeWithTimeZone};
use serde_json::json;
use uuid::Uuid;

async fn insert_vacation(
    pool: &platform_db::DbPool,
    employee_id: Uuid,
    created_at: DateTimeWithTimeZone,
) -> Uuid {
    let id = Uuid::new_v4();
    vacation_requests::ActiveModel {
        id: Set(id),
        employee_id: Set(employee_id),
        start_date: Set(NaiveDate::from_ymd_opt(2027, 5, 1).unwrap()),
        end_date: Set(NaiveDate::from_ymd_opt(2027, 5, 5).unwrap()),
        days_requested: Set(5),
        reason: Set(None),
        status: Set(RequestStatus::Pending),
        created_at: Set(created_at),
        updated_at: Set(created_at),
    }
    .insert(pool)
    .await
    .unwrap();
    id
}

fn at(day: u32, hour: u32) -> DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap().into()
}

#[tokio::test]
async fn an_account_without_a_profile_cannot_create_or_list() {
    let app = common::spawn().await;
    common::insert_user(&app.pool, "intern@company.com", Role::Employee, "intern123").await;
    let cookie = common::login(&app, "intern@company.com", "intern123").await;

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/requests/vacation",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee profile not found");
    assert_eq!(body["code"], "PROFILE_MISSING");

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/requests/vacation",
        Some(&cookie),
        Some(json!({ "startDate": "2030-01-01", "endDate": "2030-01-05" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee profile not found");
}

#[tokio::test]
async fn employees_see_only_their_own_requests_newest_first() {
    let app = common::spawn().await;
    let john = common::employee_id_for(&app.pool, "john.doe@company.com").await;
    let jane = common::employee_id_for(&app.pool, "jane.smith@company.com").await;

    let older = insert_vacation(&app.pool, john, at(1, 9)).await;
    let newer = insert_vacation(&app.pool, john, at(2, 9)).await;
    insert_vacation(&app.pool, jane, at(3, 9)).await;

    let cookie = common::login(&app, "john.doe@company.com", "employee123").await;
    let (status, body) = common::send(
        &app,
        "GET",
        "/api/requests/vacation",
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let requests = body["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["id"], newer.to_string());
    assert_eq!(requests[1]["id"], older.to_string());
    for request in requests {
        assert_eq!(request["employeeId"], john.to_string());
    }
}

#[tokio::test]
async fn privileged_roles_see_every_request() {
    let app = common::spawn().await;
    let john = common::employee_id_for(&app.pool, "john.doe@company.com").await;
    let jane = common::employee_id_for(&app.pool, "jane.smith@company.com").await;

    insert_vacation(&app.pool, john, at(1, 10)).await;
    insert_vacation(&app.pool, jane, at(2, 10)).await;
    insert_vacation(&app.pool, jane, at(3, 10)).await;

    for (email, password) in [
        ("manager@company.com", "manager123"),
        ("hr@company.com", "hr123"),
        ("admin@company.com", "admin123"),
    ] {
        let cookie = common::login(&app, email, password).await;
        let (status, body) = common::send(
            &app,
            "GET",
            "/api/requests/vacation",
            Some(&cookie),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "listing failed for {email}");
        assert_eq!(body["requests"].as_array().unwrap().len(), 3);
    }
}

#[tokio::test]
async fn listings_are_enriched_with_owner_identity_only() {
    let app = common::spawn().await;
    let jane = common::employee_id_for(&app.pool, "jane.smith@company.com").await;
    insert_vacation(&app.pool, jane, at(4, 9)).await;

    let cookie = common::login(&app, "manager@company.com", "manager123").await;
    let (_, body) = common::send(
        &app,
        "GET",
        "/api/requests/vacation",
        Some(&cookie),
        None,
    )
    .await;

    let employee = &body["requests"][0]["employee"];
    assert_eq!(employee["name"], "Jane Smith");
    assert_eq!(employee["email"], "jane.smith@company.com");
    assert_eq!(employee["employeeCode"], "EMP002");
    assert!(employee.get("salary").is_none());
    assert!(employee.get("address").is_none());
    assert!(employee.get("emergencyContact").is_none());
}

#[tokio::test]
async fn listing_without_a_session_is_unauthorized() {
    let app = common::spawn().await;
    let (status, _) = common::send(&app, "GET", "/api/requests/fund", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
