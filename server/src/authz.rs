//! The authorization gate: a pure predicate over (role, action), shared by
//! every request kind.

use entity::users::Role;

/// Operation classes the gate understands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Reading requests owned by the caller's own employee profile.
    ReadOwn,
    /// Reading every employee's requests.
    ReadAll,
    /// Submitting a new request.
    Create,
    /// Overwriting a request's status.
    Review,
}

/// Whether `role` may perform `action`. Ownership and profile checks happen
/// at the call site; this predicate only answers the role question.
pub fn role_allows(role: Role, action: Action) -> bool {
    match action {
        Action::ReadOwn | Action::Create => true,
        Action::ReadAll | Action::Review => {
            matches!(role, Role::Admin | Role::Hr | Role::Manager)
        }
    }
}

/// ADMIN and HR administer employee profiles; managers do not.
pub fn manages_employees(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Hr)
}
