//! Connection plumbing and the handful of lookups shared by every surface.

use std::time::Duration;

use entity::{employees, users};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use thiserror::Error;
use uuid::Uuid;

/// Shared connection handle alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL missing")]
    MissingUrl,
    #[error(transparent)]
    Connect(#[from] DbErr),
}

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").ok();
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(10);
        Self {
            url,
            max_connections,
            ..Self::default()
        }
    }
}

/// Open a pool against the configured database.
pub async fn connect(settings: &DatabaseSettings) -> Result<DbPool, DbError> {
    let url = settings.url.clone().ok_or(DbError::MissingUrl)?;
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    tracing::debug!(max_connections = settings.max_connections, "database pool ready");
    Ok(pool)
}

pub async fn find_user_by_email(pool: &DbPool, email: &str) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(pool)
        .await
}

/// A user row together with its optional employee profile.
pub async fn load_identity(
    pool: &DbPool,
    user_id: Uuid,
) -> Result<Option<(users::Model, Option<employees::Model>)>, DbErr> {
    let Some(user) = users::Entity::find_by_id(user_id).one(pool).await? else {
        return Ok(None);
    };
    let profile = employees::Entity::find()
        .filter(employees::Column::UserId.eq(user_id))
        .one(pool)
        .await?;
    Ok(Some((user, profile)))
}
