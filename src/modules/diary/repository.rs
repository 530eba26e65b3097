use uuid::Uuid;

use crate::api::error;
use crate::modules::diary::model::CreateDiaryBody;
use crate::modules::diary::schema::DiaryEntity;

#[async_trait::async_trait]
pub trait DiaryRepository {
    async fn create(
        &self,
        owner_id: &Uuid,
        body: &CreateDiaryBody,
    ) -> Result<DiaryEntity, error::SystemError>;

    /// Returns soft-deleted rows too; the visibility rule decides who may
    /// still see them.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<DiaryEntity>, error::SystemError>;

    async fn soft_delete(&self, id: &Uuid) -> Result<(), error::SystemError>;

    async fn list_by_owner(&self, owner_id: &Uuid)
        -> Result<Vec<DiaryEntity>, error::SystemError>;

    async fn share_exists(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn add_share(&self, diary_id: &Uuid, user_id: &Uuid)
        -> Result<(), error::SystemError>;

    async fn remove_share(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), error::SystemError>;
}
