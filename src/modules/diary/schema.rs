use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "diary_visibility")]
pub enum Visibility {
    #[sqlx(rename = "PRIVATE")]
    #[serde(rename = "PRIVATE")]
    Private,
    #[sqlx(rename = "FRIENDS_ONLY")]
    #[serde(rename = "FRIENDS_ONLY")]
    FriendsOnly,
    #[sqlx(rename = "PUBLIC")]
    #[serde(rename = "PUBLIC")]
    Public,
}

#[derive(Debug, Clone, FromRow)]
pub struct DiaryEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub address: Option<String>,
    pub visited_at: chrono::DateTime<chrono::Utc>,
    pub visibility: Visibility,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl DiaryEntity {
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
