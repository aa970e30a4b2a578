//! Admin session: an opaque bearer token plus the admin's profile.
//!
//! Both values are persisted under two fixed keys and are written and
//! cleared together. A session counts as authenticated only when both are
//! present and the profile parses.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::AdminProfile;

pub const TOKEN_KEY: &str = "adminToken";
pub const PROFILE_KEY: &str = "adminData";

const UPSERT: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
"#;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        admin: AdminProfile,
    },
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn admin(&self) -> Option<&AdminProfile> {
        match self {
            Session::Authenticated { admin, .. } => Some(admin),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Session handle shared between the HTTP client and the services that
/// log in or out.
pub type SharedSession = Arc<RwLock<Session>>;

pub fn shared(session: Session) -> SharedSession {
    Arc::new(RwLock::new(session))
}

/// Client-local persistent key/value storage holding the session keys.
#[derive(Clone)]
pub struct SessionStore {
    db: SqlitePool,
}

impl SessionStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        Self::from_pool(db).await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self { db })
    }

    /// Read the persisted session once, falling back to anonymous.
    pub async fn load(&self) -> Result<Session, AppError> {
        let token = self.get_value(TOKEN_KEY).await?;
        let profile = self.get_value(PROFILE_KEY).await?;

        let (Some(token), Some(profile)) = (token, profile) else {
            return Ok(Session::Anonymous);
        };

        match serde_json::from_str::<AdminProfile>(&profile) {
            Ok(admin) => Ok(Session::Authenticated { token, admin }),
            Err(e) => {
                warn!("ignoring unreadable stored profile: {}", e);
                Ok(Session::Anonymous)
            }
        }
    }

    pub async fn persist(&self, token: &str, admin: &AdminProfile) -> Result<(), AppError> {
        let profile = serde_json::to_string(admin)?;
        let now = Utc::now().to_rfc3339();

        let mut tx = self.db.begin().await?;
        for (key, value) in [(TOKEN_KEY, token), (PROFILE_KEY, profile.as_str())] {
            sqlx::query(UPSERT)
                .bind(key)
                .bind(value)
                .bind(&now)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!("session stored for {}", admin.email);
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_store WHERE key IN (?1, ?2)")
            .bind(TOKEN_KEY)
            .bind(PROFILE_KEY)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn put_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(UPSERT)
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn get_value(&self, key: &str) -> Result<Option<String>, AppError> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }
}
