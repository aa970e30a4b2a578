use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// A message sent from this session. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ContactMessage {
    pub fn from_payload(payload: ContactPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
            timestamp: Utc::now(),
        }
    }
}
