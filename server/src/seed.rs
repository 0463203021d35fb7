//! Demo fixtures: one account per role plus two plain employees, matching
//! the onboarding flow (user + profile in one transaction).

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use entity::{employees, users};
use platform_db::DbPool;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait, prelude::DateTimeWithTimeZone};
use tracing::info;
use uuid::Uuid;

use crate::identity::hash_password;

struct SeedProfile {
    code: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    position: &'static str,
    department: &'static str,
    hire_date: &'static str,
    salary: f64,
    phone: &'static str,
    address: &'static str,
    emergency_contact: &'static str,
}

struct SeedAccount {
    email: &'static str,
    name: &'static str,
    role: users::Role,
    password: &'static str,
    profile: Option<SeedProfile>,
}

fn fixtures() -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            email: "admin@company.com",
            name: "System Administrator",
            role: users::Role::Admin,
            password: "admin123",
            profile: None,
        },
        SeedAccount {
            email: "hr@company.com",
            name: "HR Manager",
            role: users::Role::Hr,
            password: "hr123",
            profile: Some(SeedProfile {
                code: "HR001",
                first_name: "Sarah",
                last_name: "Johnson",
                position: "HR Manager",
                department: "Human Resources",
                hire_date: "2020-01-15",
                salary: 75_000.0,
                phone: "+1-555-0101",
                address: "123 Main St, City, State 12345",
                emergency_contact: "John Johnson - +1-555-0102",
            }),
        },
        SeedAccount {
            email: "manager@company.com",
            name: "Team Manager",
            role: users::Role::Manager,
            password: "manager123",
            profile: Some(SeedProfile {
                code: "MGR001",
                first_name: "Michael",
                last_name: "Smith",
                position: "Engineering Manager",
                department: "Engineering",
                hire_date: "2019-03-10",
                salary: 95_000.0,
                phone: "+1-555-0201",
                address: "456 Oak Ave, City, State 12345",
                emergency_contact: "Lisa Smith - +1-555-0202",
            }),
        },
        SeedAccount {
            email: "john.doe@company.com",
            name: "John Doe",
            role: users::Role::Employee,
            password: "employee123",
            profile: Some(SeedProfile {
                code: "EMP001",
                first_name: "John",
                last_name: "Doe",
                position: "Software Developer",
                department: "Engineering",
                hire_date: "2021-06-01",
                salary: 70_000.0,
                phone: "+1-555-0301",
                address: "789 Pine St, City, State 12345",
                emergency_contact: "Jane Doe - +1-555-0302",
            }),
        },
        SeedAccount {
            email: "jane.smith@company.com",
            name: "Jane Smith",
            role: users::Role::Employee,
            password: "employee123",
            profile: Some(SeedProfile {
                code: "EMP002",
                first_name: "Jane",
                last_name: "Smith",
                position: "UX Designer",
                department: "Design",
                hire_date: "2021-08-15",
                salary: 65_000.0,
                phone: "+1-555-0401",
                address: "321 Elm St, City, State 12345",
                emergency_contact: "Bob Smith - +1-555-0402",
            }),
        },
    ]
}

/// Insert the demo accounts, skipping any email that already exists.
pub async fn run(pool: &DbPool) -> Result<()> {
    for account in fixtures() {
        if platform_db::find_user_by_email(pool, account.email)
            .await?
            .is_some()
        {
            info!(email = account.email, "seed account already present");
            continue;
        }

        let password_hash = hash_password(account.password)?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let user_id = Uuid::new_v4();

        let txn = pool.begin().await?;
        users::ActiveModel {
            id: Set(user_id),
            email: Set(account.email.into()),
            name: Set(account.name.into()),
            password_hash: Set(password_hash),
            role: Set(account.role),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if let Some(profile) = &account.profile {
            let hire_date = NaiveDate::parse_from_str(profile.hire_date, "%Y-%m-%d")
                .context("invalid fixture hire date")?;
            employees::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                employee_code: Set(profile.code.into()),
                first_name: Set(profile.first_name.into()),
                last_name: Set(profile.last_name.into()),
                position: Set(profile.position.into()),
                department: Set(profile.department.into()),
                hire_date: Set(hire_date),
                salary: Set(profile.salary),
                phone: Set(Some(profile.phone.into())),
                address: Set(Some(profile.address.into())),
                emergency_contact: Set(Some(profile.emergency_contact.into())),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;
        info!(
            email = account.email,
            role = account.role.as_str(),
            "seeded account"
        );
    }
    Ok(())
}
