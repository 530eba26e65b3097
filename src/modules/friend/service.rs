use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error::{self, BusinessError},
    modules::{
        friend::{
            model::{FriendDecision, FriendRequestResponse, FriendSummaryResponse},
            repository::FriendRepository,
            schema::{FriendEntity, FriendStatus},
        },
        notification::{
            repository::NotificationRepository, schema::NotificationType,
            service::NotificationService,
        },
        user::repository::UserRepository,
    },
};

/// Governs the relationship lifecycle: Pending -> Accepted | Rejected, with a
/// rejected row reactivated into Pending by a later request from either side.
#[derive(Clone)]
pub struct FriendService<F, U, N>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
    notification_service: NotificationService<N>,
}

impl<F, U, N> FriendService<F, U, N>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(
        friend_repo: Arc<F>,
        user_repo: Arc<U>,
        notification_service: NotificationService<N>,
    ) -> Self {
        FriendService { friend_repo, user_repo, notification_service }
    }

    pub async fn send_request(
        &self,
        requester_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendEntity, error::SystemError> {
        if requester_id == receiver_id {
            return Err(BusinessError::SelfRequest.into());
        }

        let requester =
            self.user_repo.find_by_id(&requester_id).await?.ok_or(BusinessError::UserNotFound)?;
        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(BusinessError::UserNotFound.into());
        }

        let friend = match self.friend_repo.find_by_pair(&requester_id, &receiver_id).await? {
            None => self.friend_repo.create(&requester_id, &receiver_id).await?,
            Some(existing) => match existing.status {
                FriendStatus::Pending => return Err(BusinessError::AlreadyRequested.into()),
                FriendStatus::Accepted => return Err(BusinessError::AlreadyFriend.into()),
                // Reuse the rejected row so the pair invariant holds.
                FriendStatus::Rejected => {
                    self.friend_repo.reactivate(&existing.id, &requester_id, &receiver_id).await?
                }
            },
        };

        self.notification_service
            .notify(
                receiver_id,
                NotificationType::FriendRequest,
                friend.id,
                format!("'{}' sent you a friend request.", requester.nickname),
            )
            .await?;

        Ok(friend)
    }

    pub async fn respond(
        &self,
        responder_id: Uuid,
        relationship_id: Uuid,
        decision: FriendDecision,
    ) -> Result<(), error::SystemError> {
        let friend = self
            .friend_repo
            .find_by_id(&relationship_id)
            .await?
            .ok_or(BusinessError::RelationshipNotFound)?;

        if friend.receiver_id != responder_id {
            return Err(BusinessError::Forbidden.into());
        }

        if !friend.is_pending() {
            return Err(BusinessError::InvalidState.into());
        }

        match decision {
            FriendDecision::Accept => {
                self.friend_repo.update_status(&friend.id, FriendStatus::Accepted).await?;

                let responder = self
                    .user_repo
                    .find_by_id(&responder_id)
                    .await?
                    .ok_or(BusinessError::UserNotFound)?;
                self.notification_service
                    .notify(
                        friend.requester_id,
                        NotificationType::FriendAccepted,
                        friend.id,
                        format!("'{}' accepted your friend request.", responder.nickname),
                    )
                    .await?;
            }
            FriendDecision::Reject => {
                self.friend_repo.update_status(&friend.id, FriendStatus::Rejected).await?;
            }
        }

        Ok(())
    }

    pub async fn remove(
        &self,
        actor_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let friend = self
            .friend_repo
            .find_by_id(&relationship_id)
            .await?
            .ok_or(BusinessError::RelationshipNotFound)?;

        if !friend.involves(actor_id) {
            return Err(BusinessError::Forbidden.into());
        }

        let actor =
            self.user_repo.find_by_id(&actor_id).await?.ok_or(BusinessError::UserNotFound)?;
        let other_party = friend.other_party(actor_id);

        self.friend_repo.delete(&friend.id).await?;

        self.notification_service
            .notify(
                other_party,
                NotificationType::FriendRemoved,
                friend.id,
                format!("'{}' removed you from their friends.", actor.nickname),
            )
            .await?;

        Ok(())
    }

    pub async fn is_friend(
        &self,
        user_id_a: Uuid,
        user_id_b: Uuid,
    ) -> Result<bool, error::SystemError> {
        self.friend_repo.is_friend(&user_id_a, &user_id_b).await
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendSummaryResponse>, error::SystemError> {
        self.friend_repo.find_accepted(&user_id).await
    }

    pub async fn get_pending_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        self.friend_repo.find_pending_received(&user_id).await
    }
}
