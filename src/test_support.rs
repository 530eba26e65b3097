//! In-memory repository fakes shared by the service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use uuid::Uuid;

use crate::api::error;
use crate::modules::diary::model::CreateDiaryBody;
use crate::modules::diary::repository::DiaryRepository;
use crate::modules::diary::schema::DiaryEntity;
use crate::modules::friend::model::{FriendRequestResponse, FriendSummaryResponse};
use crate::modules::friend::repository::FriendRepository;
use crate::modules::friend::schema::{FriendEntity, FriendStatus};
use crate::modules::notification::repository::NotificationRepository;
use crate::modules::notification::schema::{NotificationEntity, NotificationType};
use crate::modules::user::model::InsertUser;
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserEntity;

pub fn new_id() -> Uuid {
    Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
}

#[derive(Default)]
pub struct MockUserRepo {
    users: Mutex<HashMap<Uuid, UserEntity>>,
}

impl MockUserRepo {
    pub fn add_user(&self, nickname: &str) -> Uuid {
        let id = new_id();
        let now = chrono::Utc::now();
        let user = UserEntity {
            id,
            email: format!("{nickname}@example.com"),
            hash_password: "hash".to_string(),
            nickname: nickname.to_string(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(id, user);
        id
    }

    pub fn soft_delete(&self, id: Uuid) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.deleted_at = Some(chrono::Utc::now());
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(id).filter(|u| u.deleted_at.is_none()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email && u.deleted_at.is_none()).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let id = new_id();
        let now = chrono::Utc::now();
        self.users.lock().unwrap().insert(
            id,
            UserEntity {
                id,
                email: user.email.clone(),
                hash_password: user.hash_password.clone(),
                nickname: user.nickname.clone(),
                deleted_at: None,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }
}

#[derive(Default)]
pub struct MockFriendRepo {
    friends: Mutex<HashMap<Uuid, FriendEntity>>,
}

#[async_trait::async_trait]
impl FriendRepository for MockFriendRepo {
    async fn find_by_pair(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let friends = self.friends.lock().unwrap();
        Ok(friends
            .values()
            .find(|f| {
                (f.requester_id == *user_id_a && f.receiver_id == *user_id_b)
                    || (f.requester_id == *user_id_b && f.receiver_id == *user_id_a)
            })
            .cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendEntity>, error::SystemError> {
        Ok(self.friends.lock().unwrap().get(id).cloned())
    }

    async fn create(
        &self,
        requester_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendEntity, error::SystemError> {
        let now = chrono::Utc::now();
        let friend = FriendEntity {
            id: new_id(),
            requester_id: *requester_id,
            receiver_id: *receiver_id,
            status: FriendStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.friends.lock().unwrap().insert(friend.id, friend.clone());
        Ok(friend)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<(), error::SystemError> {
        if let Some(friend) = self.friends.lock().unwrap().get_mut(id) {
            friend.status = status;
            friend.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn reactivate(
        &self,
        id: &Uuid,
        requester_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendEntity, error::SystemError> {
        let mut friends = self.friends.lock().unwrap();
        let friend = friends.get_mut(id).expect("reactivate targets an existing row");
        friend.requester_id = *requester_id;
        friend.receiver_id = *receiver_id;
        friend.status = FriendStatus::Pending;
        friend.updated_at = chrono::Utc::now();
        Ok(friend.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        self.friends.lock().unwrap().remove(id);
        Ok(())
    }

    async fn is_friend(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let pair = self.find_by_pair(user_id_a, user_id_b).await?;
        Ok(pair.is_some_and(|f| f.status == FriendStatus::Accepted))
    }

    async fn find_accepted(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendSummaryResponse>, error::SystemError> {
        let friends = self.friends.lock().unwrap();
        Ok(friends
            .values()
            .filter(|f| f.status == FriendStatus::Accepted && f.involves(*user_id))
            .map(|f| FriendSummaryResponse {
                relationship_id: f.id,
                user_id: f.other_party(*user_id),
                // Nickname joins live in the real store.
                nickname: String::new(),
            })
            .collect())
    }

    async fn find_pending_received(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let friends = self.friends.lock().unwrap();
        Ok(friends
            .values()
            .filter(|f| f.status == FriendStatus::Pending && f.receiver_id == *user_id)
            .map(|f| FriendRequestResponse {
                relationship_id: f.id,
                requester_id: f.requester_id,
                requester_nickname: String::new(),
                created_at: f.created_at,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MockNotificationRepo {
    notifications: Mutex<Vec<NotificationEntity>>,
}

impl MockNotificationRepo {
    pub fn for_user(&self, user_id: Uuid) -> Vec<NotificationEntity> {
        self.notifications.lock().unwrap().iter().filter(|n| n.user_id == user_id).cloned().collect()
    }
}

#[async_trait::async_trait]
impl NotificationRepository for MockNotificationRepo {
    async fn insert(
        &self,
        user_id: &Uuid,
        kind: NotificationType,
        reference_id: &Uuid,
        message: &str,
    ) -> Result<NotificationEntity, error::SystemError> {
        let notification = NotificationEntity {
            id: new_id(),
            user_id: *user_id,
            kind,
            reference_id: *reference_id,
            message: message.to_string(),
            is_read: false,
            created_at: chrono::Utc::now(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        Ok(self.notifications.lock().unwrap().iter().find(|n| n.id == *id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let mut rows = self.for_user(*user_id);
        rows.reverse();
        Ok(rows)
    }

    async fn mark_read(&self, id: &Uuid) -> Result<(), error::SystemError> {
        let mut notifications = self.notifications.lock().unwrap();
        if let Some(notification) = notifications.iter_mut().find(|n| n.id == *id) {
            notification.is_read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<(), error::SystemError> {
        let mut notifications = self.notifications.lock().unwrap();
        for notification in notifications.iter_mut().filter(|n| n.user_id == *user_id) {
            notification.is_read = true;
        }
        Ok(())
    }

    async fn delete_all(
        &self,
        user_id: &Uuid,
        read_filter: Option<bool>,
    ) -> Result<u64, error::SystemError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| {
            n.user_id != *user_id || read_filter.is_some_and(|read| n.is_read != read)
        });
        Ok((before - notifications.len()) as u64)
    }
}

#[derive(Default)]
pub struct MockDiaryRepo {
    diaries: Mutex<HashMap<Uuid, DiaryEntity>>,
    shares: Mutex<HashSet<(Uuid, Uuid)>>,
}

#[async_trait::async_trait]
impl DiaryRepository for MockDiaryRepo {
    async fn create(
        &self,
        owner_id: &Uuid,
        body: &CreateDiaryBody,
    ) -> Result<DiaryEntity, error::SystemError> {
        let now = chrono::Utc::now();
        let diary = DiaryEntity {
            id: new_id(),
            user_id: *owner_id,
            title: body.title.clone(),
            content: body.content.clone(),
            latitude: body.latitude,
            longitude: body.longitude,
            location_name: body.location_name.clone(),
            address: body.address.clone(),
            visited_at: body.visited_at,
            visibility: body.visibility,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.diaries.lock().unwrap().insert(diary.id, diary.clone());
        Ok(diary)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<DiaryEntity>, error::SystemError> {
        Ok(self.diaries.lock().unwrap().get(id).cloned())
    }

    async fn soft_delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        if let Some(diary) = self.diaries.lock().unwrap().get_mut(id) {
            if diary.deleted_at.is_none() {
                diary.deleted_at = Some(chrono::Utc::now());
            }
        }
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: &Uuid,
    ) -> Result<Vec<DiaryEntity>, error::SystemError> {
        let diaries = self.diaries.lock().unwrap();
        let mut rows: Vec<DiaryEntity> = diaries
            .values()
            .filter(|d| d.user_id == *owner_id && d.deleted_at.is_none())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.visited_at.cmp(&a.visited_at));
        Ok(rows)
    }

    async fn share_exists(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        Ok(self.shares.lock().unwrap().contains(&(*diary_id, *user_id)))
    }

    async fn add_share(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        self.shares.lock().unwrap().insert((*diary_id, *user_id));
        Ok(())
    }

    async fn remove_share(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        self.shares.lock().unwrap().remove(&(*diary_id, *user_id));
        Ok(())
    }
}
