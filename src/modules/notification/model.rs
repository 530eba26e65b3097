use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::notification::schema::{NotificationEntity, NotificationType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub reference_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<NotificationEntity> for NotificationResponse {
    fn from(n: NotificationEntity) -> Self {
        NotificationResponse {
            id: n.id,
            kind: n.kind,
            reference_id: n.reference_id,
            message: n.message,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Missing: delete everything. `true`: only read. `false`: only unread.
    pub read: Option<bool>,
}
