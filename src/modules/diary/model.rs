use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::diary::schema::{DiaryEntity, Visibility};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiaryBody {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1, max = 100))]
    pub location_name: String,
    pub address: Option<String>,
    pub visited_at: chrono::DateTime<chrono::Utc>,
    pub visibility: Visibility,
    pub shared_user_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareDiaryBody {
    #[validate(length(min = 1))]
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryDetailResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub address: Option<String>,
    pub visited_at: chrono::DateTime<chrono::Utc>,
    pub visibility: Visibility,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<DiaryEntity> for DiaryDetailResponse {
    fn from(diary: DiaryEntity) -> Self {
        DiaryDetailResponse {
            id: diary.id,
            owner_id: diary.user_id,
            title: diary.title,
            content: diary.content,
            latitude: diary.latitude,
            longitude: diary.longitude,
            location_name: diary.location_name,
            address: diary.address,
            visited_at: diary.visited_at,
            visibility: diary.visibility,
            created_at: diary.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiarySummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub location_name: String,
    pub visited_at: chrono::DateTime<chrono::Utc>,
    pub visibility: Visibility,
}

impl From<DiaryEntity> for DiarySummaryResponse {
    fn from(diary: DiaryEntity) -> Self {
        DiarySummaryResponse {
            id: diary.id,
            title: diary.title,
            location_name: diary.location_name,
            visited_at: diary.visited_at,
            visibility: diary.visibility,
        }
    }
}
