use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error::{self, BusinessError},
    modules::{
        notification::{
            model::NotificationResponse,
            repository::NotificationRepository,
            schema::{NotificationEntity, NotificationType},
        },
        sse::{
            event::{NotificationPayload, SseEvent, EVENT_NOTIFICATION},
            registry::SseRegistry,
        },
    },
};

pub struct NotificationService<N>
where
    N: NotificationRepository + Send + Sync,
{
    repo: Arc<N>,
    registry: Arc<SseRegistry>,
}

// Manual impl: the service is a pair of handles, so cloning must not require
// the repository itself to be Clone.
impl<N> Clone for NotificationService<N>
where
    N: NotificationRepository + Send + Sync,
{
    fn clone(&self) -> Self {
        NotificationService { repo: Arc::clone(&self.repo), registry: Arc::clone(&self.registry) }
    }
}

impl<N> NotificationService<N>
where
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(repo: Arc<N>, registry: Arc<SseRegistry>) -> Self {
        NotificationService { repo, registry }
    }

    /// Persists the notification, then attempts a live push. The stored row is
    /// the source of truth; push problems are logged and swallowed so the
    /// triggering business operation never fails on a dead connection.
    pub async fn notify(
        &self,
        recipient_id: Uuid,
        kind: NotificationType,
        reference_id: Uuid,
        message: String,
    ) -> Result<NotificationEntity, error::SystemError> {
        let notification =
            self.repo.insert(&recipient_id, kind, &reference_id, &message).await?;

        let payload = NotificationPayload { r#type: kind.as_str(), message: &notification.message };
        match SseEvent::json(EVENT_NOTIFICATION, &payload) {
            Ok(event) => self.registry.push(recipient_id, event),
            Err(e) => {
                log::warn!("Failed to serialize notification push payload: {e}");
            }
        }

        Ok(notification)
    }

    pub async fn mark_read(
        &self,
        actor_id: Uuid,
        notification_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let notification = self
            .repo
            .find_by_id(&notification_id)
            .await?
            .ok_or(BusinessError::NotificationNotFound)?;

        if notification.user_id != actor_id {
            return Err(BusinessError::Forbidden.into());
        }

        self.repo.mark_read(&notification_id).await
    }

    pub async fn mark_all_read(&self, actor_id: Uuid) -> Result<(), error::SystemError> {
        self.repo.mark_all_read(&actor_id).await
    }

    pub async fn delete_all(
        &self,
        actor_id: Uuid,
        read_filter: Option<bool>,
    ) -> Result<u64, error::SystemError> {
        self.repo.delete_all(&actor_id, read_filter).await
    }

    pub async fn get_notifications(
        &self,
        actor_id: Uuid,
    ) -> Result<Vec<NotificationResponse>, error::SystemError> {
        let notifications = self.repo.find_by_user(&actor_id).await?;
        Ok(notifications.into_iter().map(NotificationResponse::from).collect())
    }
}
