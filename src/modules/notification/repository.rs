use uuid::Uuid;

use crate::api::error;
use crate::modules::notification::schema::{NotificationEntity, NotificationType};

#[async_trait::async_trait]
pub trait NotificationRepository {
    async fn insert(
        &self,
        user_id: &Uuid,
        kind: NotificationType,
        reference_id: &Uuid,
        message: &str,
    ) -> Result<NotificationEntity, error::SystemError>;

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError>;

    /// Newest first.
    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<NotificationEntity>, error::SystemError>;

    async fn mark_read(&self, id: &Uuid) -> Result<(), error::SystemError>;

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<(), error::SystemError>;

    /// `read_filter`: None deletes all, Some(true) only read, Some(false) only unread.
    async fn delete_all(
        &self,
        user_id: &Uuid,
        read_filter: Option<bool>,
    ) -> Result<u64, error::SystemError>;
}
