use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{FriendRequestResponse, FriendSummaryResponse};
use crate::modules::friend::schema::{FriendEntity, FriendStatus};

/// Durable storage of friend relationships, one row per unordered user pair.
/// Pair lookups are symmetric: the direction of the original request does not
/// matter. The pair-uniqueness invariant is enforced at the store with a
/// unique index over the normalized pair, so two racing `create` calls cannot
/// both succeed.
#[async_trait::async_trait]
pub trait FriendRepository {
    async fn find_by_pair(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendEntity>, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendEntity>, error::SystemError>;

    async fn create(
        &self,
        requester_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendEntity, error::SystemError>;

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<(), error::SystemError>;

    /// Turns a rejected row back into a pending request, adopting the new
    /// request's direction.
    async fn reactivate(
        &self,
        id: &Uuid,
        requester_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendEntity, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError>;

    async fn is_friend(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn find_accepted(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendSummaryResponse>, error::SystemError>;

    async fn find_pending_received(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;
}
