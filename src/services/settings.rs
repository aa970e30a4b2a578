//! Settings panels. Nothing here talks to the backend; preferences are
//! kept in client-local storage.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::endpoints::{ENDPOINTS, Endpoint};
use crate::error::AppError;
use crate::notify::Notifier;
use crate::session::SessionStore;

pub const API_VERSION: &str = "v1";
const PREFERENCES_KEY: &str = "notificationPreferences";

pub fn endpoint_catalog() -> &'static [Endpoint] {
    ENDPOINTS
}

#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.new_password != self.confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }
}

pub fn change_password(change: &PasswordChange, notifier: &dyn Notifier) -> Result<(), AppError> {
    match change.validate() {
        Ok(()) => {
            notifier.success("Password updated successfully!");
            Ok(())
        }
        Err(e) => {
            notifier.error(&e.user_message("Failed to update password"));
            Err(e)
        }
    }
}

pub struct NotificationOption {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const NOTIFICATION_OPTIONS: &[NotificationOption] = &[
    NotificationOption {
        key: "emailNotifications",
        label: "Email Notifications",
        description: "Receive notifications via email",
    },
    NotificationOption {
        key: "courseUpdates",
        label: "Course Updates",
        description: "Get notified when courses are updated",
    },
    NotificationOption {
        key: "newTestimonials",
        label: "New Testimonials",
        description: "Notifications for new testimonials",
    },
    NotificationOption {
        key: "systemAlerts",
        label: "System Alerts",
        description: "Important system notifications",
    },
    NotificationOption {
        key: "weeklyReports",
        label: "Weekly Reports",
        description: "Receive weekly analytics reports",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub course_updates: bool,
    pub new_testimonials: bool,
    pub system_alerts: bool,
    pub weekly_reports: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            course_updates: true,
            new_testimonials: false,
            system_alerts: true,
            weekly_reports: true,
        }
    }
}

impl NotificationPreferences {
    fn slot(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "emailNotifications" => Some(&mut self.email_notifications),
            "courseUpdates" => Some(&mut self.course_updates),
            "newTestimonials" => Some(&mut self.new_testimonials),
            "systemAlerts" => Some(&mut self.system_alerts),
            "weeklyReports" => Some(&mut self.weekly_reports),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        match key {
            "emailNotifications" => Some(self.email_notifications),
            "courseUpdates" => Some(self.course_updates),
            "newTestimonials" => Some(self.new_testimonials),
            "systemAlerts" => Some(self.system_alerts),
            "weeklyReports" => Some(self.weekly_reports),
            _ => None,
        }
    }

    /// Flip one preference and return its new value.
    pub fn toggle(&mut self, key: &str) -> Result<bool, AppError> {
        let slot = self
            .slot(key)
            .ok_or_else(|| AppError::NotFound(format!("notification option {}", key)))?;
        *slot = !*slot;
        Ok(*slot)
    }

    pub async fn load(store: &SessionStore) -> Result<Self, AppError> {
        let Some(raw) = store.get_value(PREFERENCES_KEY).await? else {
            return Ok(Self::default());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("resetting unreadable notification preferences: {}", e);
            Self::default()
        }))
    }

    pub async fn save(&self, store: &SessionStore) -> Result<(), AppError> {
        store
            .put_value(PREFERENCES_KEY, &serde_json::to_string(self)?)
            .await
    }
}

pub async fn toggle_notification(
    store: &SessionStore,
    key: &str,
    notifier: &dyn Notifier,
) -> Result<NotificationPreferences, AppError> {
    let mut preferences = NotificationPreferences::load(store).await?;
    preferences.toggle(key)?;
    preferences.save(store).await?;
    notifier.success("Notification preferences updated");
    Ok(preferences)
}
