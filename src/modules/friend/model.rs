use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequestBody {
    pub receiver_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FriendDecision {
    #[serde(rename = "ACCEPTED")]
    Accept,
    #[serde(rename = "REJECTED")]
    Reject,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendRespondBody {
    pub status: FriendDecision,
}

/// One accepted friend, as seen from the requesting user.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendSummaryResponse {
    pub relationship_id: Uuid,
    pub user_id: Uuid,
    pub nickname: String,
}

/// A pending request received by the current user.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    pub relationship_id: Uuid,
    pub requester_id: Uuid,
    pub requester_nickname: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
