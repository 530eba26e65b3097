use uuid::Uuid;

use crate::api::error;
use crate::modules::user::model::InsertUser;
use crate::modules::user::schema::UserEntity;

/// Lookups exclude soft-deleted users; a deleted account behaves as absent.
#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError>;
}
