use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error::{self, BusinessError},
    modules::{
        diary::{
            model::{CreateDiaryBody, DiaryDetailResponse, DiarySummaryResponse},
            repository::DiaryRepository,
            schema::DiaryEntity,
            visibility,
        },
        friend::repository::FriendRepository,
        notification::{
            repository::NotificationRepository, schema::NotificationType,
            service::NotificationService,
        },
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct DiaryService<D, F, U, N>
where
    D: DiaryRepository + Send + Sync,
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    diary_repo: Arc<D>,
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
    notification_service: NotificationService<N>,
}

impl<D, F, U, N> DiaryService<D, F, U, N>
where
    D: DiaryRepository + Send + Sync,
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(
        diary_repo: Arc<D>,
        friend_repo: Arc<F>,
        user_repo: Arc<U>,
        notification_service: NotificationService<N>,
    ) -> Self {
        DiaryService { diary_repo, friend_repo, user_repo, notification_service }
    }

    pub async fn create_diary(
        &self,
        owner_id: Uuid,
        body: CreateDiaryBody,
    ) -> Result<DiaryEntity, error::SystemError> {
        let owner =
            self.user_repo.find_by_id(&owner_id).await?.ok_or(BusinessError::UserNotFound)?;

        let diary = self.diary_repo.create(&owner_id, &body).await?;

        if let Some(shared_user_ids) = &body.shared_user_ids {
            for target_id in shared_user_ids {
                self.grant_share(&diary, *target_id, &owner.nickname).await?;
            }
        }

        Ok(diary)
    }

    /// Visibility gate on every read: deny resolves to access-denied, an
    /// absent row to not-found.
    pub async fn get_diary(
        &self,
        requester_id: Uuid,
        diary_id: Uuid,
    ) -> Result<DiaryDetailResponse, error::SystemError> {
        let diary =
            self.diary_repo.find_by_id(&diary_id).await?.ok_or(BusinessError::DiaryNotFound)?;

        let shared = self.diary_repo.share_exists(&diary_id, &requester_id).await?;
        let friends = self.friend_repo.is_friend(&requester_id, &diary.user_id).await?;

        if !visibility::can_access(requester_id, &diary, shared, friends) {
            return Err(BusinessError::DiaryAccessDenied.into());
        }

        Ok(DiaryDetailResponse::from(diary))
    }

    pub async fn list_my_diaries(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<DiarySummaryResponse>, error::SystemError> {
        let diaries = self.diary_repo.list_by_owner(&owner_id).await?;
        Ok(diaries.into_iter().map(DiarySummaryResponse::from).collect())
    }

    pub async fn delete_diary(
        &self,
        actor_id: Uuid,
        diary_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let diary = self.active_diary(diary_id).await?;

        if !diary.is_owner(actor_id) {
            return Err(BusinessError::DiaryAccessDenied.into());
        }

        self.diary_repo.soft_delete(&diary_id).await
    }

    pub async fn share_diary(
        &self,
        actor_id: Uuid,
        diary_id: Uuid,
        user_ids: Vec<Uuid>,
    ) -> Result<(), error::SystemError> {
        let diary = self.active_diary(diary_id).await?;

        if !diary.is_owner(actor_id) {
            return Err(BusinessError::DiaryAccessDenied.into());
        }

        let owner =
            self.user_repo.find_by_id(&actor_id).await?.ok_or(BusinessError::UserNotFound)?;

        for target_id in user_ids {
            self.grant_share(&diary, target_id, &owner.nickname).await?;
        }

        Ok(())
    }

    pub async fn unshare_diary(
        &self,
        actor_id: Uuid,
        diary_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let diary = self.active_diary(diary_id).await?;

        if !diary.is_owner(actor_id) {
            return Err(BusinessError::DiaryAccessDenied.into());
        }

        if !self.diary_repo.share_exists(&diary_id, &target_user_id).await? {
            return Err(BusinessError::DiaryShareNotFound.into());
        }

        self.diary_repo.remove_share(&diary_id, &target_user_id).await
    }

    /// Adds one grant if it is not already present. Sharing with oneself is a
    /// silent no-op; an existing grant is not re-notified.
    async fn grant_share(
        &self,
        diary: &DiaryEntity,
        target_id: Uuid,
        owner_nickname: &str,
    ) -> Result<(), error::SystemError> {
        if target_id == diary.user_id {
            return Ok(());
        }
        if self.diary_repo.share_exists(&diary.id, &target_id).await? {
            return Ok(());
        }

        self.diary_repo.add_share(&diary.id, &target_id).await?;
        self.notification_service
            .notify(
                target_id,
                NotificationType::DiaryShared,
                diary.id,
                format!("'{}' shared the diary '{}' with you.", owner_nickname, diary.title),
            )
            .await?;

        Ok(())
    }

    /// Command operations only work on live diaries.
    async fn active_diary(&self, diary_id: Uuid) -> Result<DiaryEntity, error::SystemError> {
        let diary =
            self.diary_repo.find_by_id(&diary_id).await?.ok_or(BusinessError::DiaryNotFound)?;
        if diary.is_deleted() {
            return Err(BusinessError::DiaryNotFound.into());
        }
        Ok(diary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::diary::schema::Visibility;
    use crate::modules::friend::model::FriendDecision;
    use crate::modules::friend::service::FriendService;
    use crate::modules::sse::registry::SseRegistry;
    use crate::test_support::{
        new_id, MockDiaryRepo, MockFriendRepo, MockNotificationRepo, MockUserRepo,
    };
    use std::time::Duration;

    struct Fixture {
        service: DiaryService<MockDiaryRepo, MockFriendRepo, MockUserRepo, MockNotificationRepo>,
        friends: FriendService<MockFriendRepo, MockUserRepo, MockNotificationRepo>,
        users: Arc<MockUserRepo>,
        notifications: Arc<MockNotificationRepo>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepo::default());
        let friend_repo = Arc::new(MockFriendRepo::default());
        let diary_repo = Arc::new(MockDiaryRepo::default());
        let notifications = Arc::new(MockNotificationRepo::default());
        let registry = Arc::new(SseRegistry::new(Duration::from_secs(60)));
        let notification_service =
            NotificationService::with_dependencies(Arc::clone(&notifications), registry);
        let service = DiaryService::with_dependencies(
            diary_repo,
            Arc::clone(&friend_repo),
            Arc::clone(&users),
            notification_service.clone(),
        );
        let friends = FriendService::with_dependencies(
            friend_repo,
            Arc::clone(&users),
            notification_service,
        );
        Fixture { service, friends, users, notifications }
    }

    fn body(visibility: Visibility, shared: Option<Vec<Uuid>>) -> CreateDiaryBody {
        CreateDiaryBody {
            title: "han river picnic".to_string(),
            content: "sunny".to_string(),
            latitude: 37.52,
            longitude: 126.93,
            location_name: "Yeouido".to_string(),
            address: None,
            visited_at: chrono::Utc::now(),
            visibility,
            shared_user_ids: shared,
        }
    }

    fn business(err: error::SystemError) -> BusinessError {
        match err {
            error::SystemError::Business(b) => b,
            other => panic!("expected business error, got {other:?}"),
        }
    }

    async fn make_friends(f: &Fixture, a: Uuid, b: Uuid) {
        let friend = f.friends.send_request(a, b).await.expect("send");
        f.friends.respond(b, friend.id, FriendDecision::Accept).await.expect("accept");
    }

    #[tokio::test]
    async fn owner_reads_own_private_diary() {
        let f = fixture();
        let owner = f.users.add_user("ana");

        let diary =
            f.service.create_diary(owner, body(Visibility::Private, None)).await.expect("create");
        let detail = f.service.get_diary(owner, diary.id).await.expect("read");
        assert_eq!(detail.owner_id, owner);
    }

    #[tokio::test]
    async fn private_diary_denies_everyone_else() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let other = f.users.add_user("ben");
        make_friends(&f, owner, other).await;

        let diary =
            f.service.create_diary(owner, body(Visibility::Private, None)).await.expect("create");
        let err = f.service.get_diary(other, diary.id).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);
    }

    #[tokio::test]
    async fn public_diary_is_readable_by_strangers() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let stranger = f.users.add_user("ben");

        let diary =
            f.service.create_diary(owner, body(Visibility::Public, None)).await.expect("create");
        f.service.get_diary(stranger, diary.id).await.expect("read");
    }

    #[tokio::test]
    async fn friends_only_opens_up_once_friendship_is_accepted() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let other = f.users.add_user("ben");

        let diary = f
            .service
            .create_diary(owner, body(Visibility::FriendsOnly, None))
            .await
            .expect("create");

        let err = f.service.get_diary(other, diary.id).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);

        make_friends(&f, owner, other).await;
        f.service.get_diary(other, diary.id).await.expect("read after accept");
    }

    #[tokio::test]
    async fn explicit_share_grants_friends_only_access_to_non_friend() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let grantee = f.users.add_user("ben");

        let diary = f
            .service
            .create_diary(owner, body(Visibility::FriendsOnly, Some(vec![grantee])))
            .await
            .expect("create");

        f.service.get_diary(grantee, diary.id).await.expect("shared read");

        let received = f.notifications.for_user(grantee);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].kind, NotificationType::DiaryShared);
        assert!(received[0].message.contains("han river picnic"));
        assert!(received[0].message.contains("ana"));
    }

    #[tokio::test]
    async fn share_survives_friendship_removal() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let other = f.users.add_user("ben");
        make_friends(&f, owner, other).await;

        let diary = f
            .service
            .create_diary(owner, body(Visibility::FriendsOnly, Some(vec![other])))
            .await
            .expect("create");

        let friends = f.friends.get_friends(owner).await.expect("friends");
        f.friends.remove(owner, friends[0].relationship_id).await.expect("unfriend");

        // The explicit grant is independent of friend status.
        f.service.get_diary(other, diary.id).await.expect("read via share");
    }

    #[tokio::test]
    async fn sharing_twice_does_not_renotify() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let grantee = f.users.add_user("ben");

        let diary = f
            .service
            .create_diary(owner, body(Visibility::FriendsOnly, Some(vec![grantee])))
            .await
            .expect("create");

        f.service.share_diary(owner, diary.id, vec![grantee]).await.expect("re-share");
        assert_eq!(f.notifications.for_user(grantee).len(), 1);
    }

    #[tokio::test]
    async fn only_owner_may_share_delete_or_unshare() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let other = f.users.add_user("ben");

        let diary =
            f.service.create_diary(owner, body(Visibility::Public, None)).await.expect("create");

        let err = f.service.share_diary(other, diary.id, vec![other]).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);
        let err = f.service.delete_diary(other, diary.id).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);
        let err = f.service.unshare_diary(other, diary.id, other).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);
    }

    #[tokio::test]
    async fn unshare_revokes_access_and_requires_existing_grant() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let grantee = f.users.add_user("ben");

        let diary = f
            .service
            .create_diary(owner, body(Visibility::FriendsOnly, Some(vec![grantee])))
            .await
            .expect("create");

        f.service.unshare_diary(owner, diary.id, grantee).await.expect("unshare");
        let err = f.service.get_diary(grantee, diary.id).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);

        let err = f.service.unshare_diary(owner, diary.id, grantee).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryShareNotFound);
    }

    #[tokio::test]
    async fn soft_deleted_diary_reads_as_denied_for_others() {
        let f = fixture();
        let owner = f.users.add_user("ana");
        let stranger = f.users.add_user("ben");

        let diary =
            f.service.create_diary(owner, body(Visibility::Public, None)).await.expect("create");
        f.service.delete_diary(owner, diary.id).await.expect("delete");

        let err = f.service.get_diary(stranger, diary.id).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryAccessDenied);

        // The owner can still pull up their own deleted entry.
        f.service.get_diary(owner, diary.id).await.expect("owner read");
    }

    #[tokio::test]
    async fn missing_diary_is_not_found() {
        let f = fixture();
        let requester = f.users.add_user("ana");
        let err = f.service.get_diary(requester, new_id()).await.unwrap_err();
        assert_eq!(business(err), BusinessError::DiaryNotFound);
    }
}
