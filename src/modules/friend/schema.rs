use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friend_status")]
pub enum FriendStatus {
    #[sqlx(rename = "PENDING")]
    #[serde(rename = "PENDING")]
    Pending,
    #[sqlx(rename = "ACCEPTED")]
    #[serde(rename = "ACCEPTED")]
    Accepted,
    #[sqlx(rename = "REJECTED")]
    #[serde(rename = "REJECTED")]
    Rejected,
}

/// A directed friend request that becomes a symmetric friendship once
/// accepted. At most one row exists per unordered user pair; a rejected row is
/// reactivated in place by a later request instead of inserting a duplicate.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendEntity {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub receiver_id: Uuid,
    pub status: FriendStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl FriendEntity {
    pub fn is_pending(&self) -> bool {
        self.status == FriendStatus::Pending
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id || self.receiver_id == user_id
    }

    pub fn other_party(&self, user_id: Uuid) -> Uuid {
        if self.requester_id == user_id {
            self.receiver_id
        } else {
            self.requester_id
        }
    }
}
