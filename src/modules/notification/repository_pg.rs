use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        repository::NotificationRepository,
        schema::{NotificationEntity, NotificationType},
    },
};

#[derive(Clone)]
pub struct NotificationRepositoryPg {
    pool: sqlx::PgPool,
}

impl NotificationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationRepositoryPg {
    async fn insert(
        &self,
        user_id: &Uuid,
        kind: NotificationType,
        reference_id: &Uuid,
        message: &str,
    ) -> Result<NotificationEntity, error::SystemError> {
        let notification = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, type, reference_id, message, is_read)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(reference_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        let notification =
            sqlx::query_as::<_, NotificationEntity>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(notification)
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let notifications = sqlx::query_as::<_, NotificationEntity>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn mark_read(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all(
        &self,
        user_id: &Uuid,
        read_filter: Option<bool>,
    ) -> Result<u64, error::SystemError> {
        let result = match read_filter {
            None => {
                sqlx::query("DELETE FROM notifications WHERE user_id = $1")
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?
            }
            Some(read) => {
                sqlx::query("DELETE FROM notifications WHERE user_id = $1 AND is_read = $2")
                    .bind(user_id)
                    .bind(read)
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }
}
