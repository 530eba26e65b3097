use serde::Serialize;
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize)]
#[sqlx(type_name = "notification_type")]
pub enum NotificationType {
    #[sqlx(rename = "FRIEND_REQUEST")]
    #[serde(rename = "FRIEND_REQUEST")]
    FriendRequest,
    #[sqlx(rename = "FRIEND_ACCEPTED")]
    #[serde(rename = "FRIEND_ACCEPTED")]
    FriendAccepted,
    #[sqlx(rename = "FRIEND_REMOVED")]
    #[serde(rename = "FRIEND_REMOVED")]
    FriendRemoved,
    #[sqlx(rename = "DIARY_SHARED")]
    #[serde(rename = "DIARY_SHARED")]
    DiaryShared,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::FriendRequest => "FRIEND_REQUEST",
            NotificationType::FriendAccepted => "FRIEND_ACCEPTED",
            NotificationType::FriendRemoved => "FRIEND_REMOVED",
            NotificationType::DiaryShared => "DIARY_SHARED",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: NotificationType,
    pub reference_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
