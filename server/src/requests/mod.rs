//! Request lifecycle plumbing shared by the three request kinds. Each kind
//! keeps its own payload validation and table; visibility, ownership, and
//! review rules live here so the role branching exists exactly once.

pub mod fund;
pub mod general;
pub mod vacation;

use std::collections::{HashMap, HashSet};

use entity::{employees, status::RequestStatus, users};
use platform_api::{ApiError, ApiResult};
use platform_db::DbPool;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::{Action, role_allows};
use crate::http::db_error;
use crate::identity::AuthUser;

/// Which rows a caller may see.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Scope {
    All,
    Employee(Uuid),
}

/// Privileged roles see every request; everyone else is scoped to their own
/// employee profile and fails if no profile is linked.
pub(crate) fn visibility(user: &AuthUser) -> ApiResult<Scope> {
    if role_allows(user.role, Action::ReadAll) {
        return Ok(Scope::All);
    }
    user.employee_id()
        .map(Scope::Employee)
        .ok_or(ApiError::ProfileMissing)
}

/// Creation requires a linked employee profile; requests are always filed
/// under the caller's own employee id.
pub(crate) fn require_owner(user: &AuthUser) -> ApiResult<Uuid> {
    user.employee_id().ok_or(ApiError::ProfileMissing)
}

pub(crate) fn require_reviewer(user: &AuthUser) -> ApiResult<()> {
    if role_allows(user.role, Action::Review) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// The read-side join every listed request carries: the owner's display
/// identity, never the sensitive profile fields.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub email: String,
}

impl EmployeeSummary {
    fn from_models(profile: employees::Model, user: Option<users::Model>) -> Self {
        let (name, email) = user
            .map(|u| (u.name, u.email))
            .unwrap_or_default();
        Self {
            id: profile.id,
            employee_code: profile.employee_code,
            first_name: profile.first_name,
            last_name: profile.last_name,
            name,
            email,
        }
    }
}

/// Batch-load owner summaries for a set of employee ids.
pub(crate) async fn employee_summaries(
    pool: &DbPool,
    ids: &[Uuid],
) -> ApiResult<HashMap<Uuid, EmployeeSummary>> {
    let unique: HashSet<Uuid> = ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = employees::Entity::find()
        .filter(employees::Column::Id.is_in(unique.into_iter().collect::<Vec<_>>()))
        .find_also_related(users::Entity)
        .all(pool)
        .await
        .map_err(db_error)?;
    Ok(rows
        .into_iter()
        .map(|(profile, user)| (profile.id, EmployeeSummary::from_models(profile, user)))
        .collect())
}

pub(crate) async fn owner_summary(
    pool: &DbPool,
    employee_id: Uuid,
) -> ApiResult<Option<EmployeeSummary>> {
    let mut summaries = employee_summaries(pool, &[employee_id]).await?;
    Ok(summaries.remove(&employee_id))
}

#[derive(Deserialize)]
pub struct ReviewPayload {
    pub status: Option<String>,
}

/// Review overwrites the status unconditionally; the only validation is
/// enum membership. No prior-state precondition, last write wins.
pub(crate) fn parse_review_status(payload: &ReviewPayload) -> ApiResult<RequestStatus> {
    let raw = payload
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Status is required"))?;
    RequestStatus::from_str(raw).ok_or_else(|| ApiError::validation("Invalid status"))
}

/// A present, non-empty text field; treats whitespace-only input as absent.
pub(crate) fn required_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accepts a JSON number or a numeric string, rejecting anything that does
/// not parse to a finite float.
pub(crate) fn parse_amount(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_status_requires_a_known_value() {
        let payload = ReviewPayload {
            status: Some("APPROVED".into()),
        };
        assert_eq!(
            parse_review_status(&payload).unwrap(),
            RequestStatus::Approved
        );

        let bad = ReviewPayload {
            status: Some("SHIPPED".into()),
        };
        assert!(matches!(
            parse_review_status(&bad),
            Err(ApiError::Validation(_))
        ));

        let missing = ReviewPayload { status: None };
        assert!(matches!(
            parse_review_status(&missing),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn amounts_parse_from_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(&json!(250.5)), Some(250.5));
        assert_eq!(parse_amount(&json!("250.5")), Some(250.5));
        assert_eq!(parse_amount(&json!(" 42 ")), Some(42.0));
        assert_eq!(parse_amount(&json!("abc")), None);
        assert_eq!(parse_amount(&json!(null)), None);
        assert_eq!(parse_amount(&json!(true)), None);
    }

    #[test]
    fn blank_text_counts_as_missing() {
        assert_eq!(required_text(&Some("  ".into())), None);
        assert_eq!(required_text(&None), None);
        assert_eq!(required_text(&Some(" ok ".into())), Some("ok".into()));
    }
}
