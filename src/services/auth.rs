use std::sync::Arc;

use tracing::{error, info};

use crate::api::AcademyApi;
use crate::error::AppError;
use crate::models::{AdminProfile, AuthResponse, LoginRequest, RegisterRequest};
use crate::notify::Notifier;
use crate::session::{Session, SessionStore, SharedSession};

/// Drives the session lifecycle: restored (or empty) at startup,
/// authenticated by login/register, cleared by logout.
pub struct AuthService {
    api: Arc<dyn AcademyApi>,
    store: SessionStore,
    session: SharedSession,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn AcademyApi>,
        store: SessionStore,
        session: SharedSession,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            session,
            notifier,
        }
    }

    /// Load whatever was persisted into the shared session.
    pub async fn restore(&self) -> Result<Session, AppError> {
        let loaded = self.store.load().await?;
        *self.session.write().await = loaded.clone();
        Ok(loaded)
    }

    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AdminProfile, AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&request).await;
        self.establish(result, "Login failed").await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AdminProfile, AppError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.api.register(&request).await;
        self.establish(result, "Registration failed").await
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.clear().await?;
        *self.session.write().await = Session::Anonymous;
        info!("session cleared");
        Ok(())
    }

    async fn establish(
        &self,
        result: Result<AuthResponse, AppError>,
        fallback: &str,
    ) -> Result<AdminProfile, AppError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("{}: {}", fallback, e);
                self.notifier.error(&e.user_message(fallback));
                return Err(e);
            }
        };

        self.store.persist(&response.token, &response.admin).await?;
        *self.session.write().await = Session::Authenticated {
            token: response.token,
            admin: response.admin.clone(),
        };
        info!("signed in as {}", response.admin.email);
        Ok(response.admin)
    }
}
