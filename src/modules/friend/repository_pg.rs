use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{FriendRequestResponse, FriendSummaryResponse},
        repository::FriendRepository,
        schema::{FriendEntity, FriendStatus},
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn find_by_pair(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let friend = sqlx::query_as::<_, FriendEntity>(
            r#"
            SELECT *
            FROM friends
            WHERE (requester_id = $1 AND receiver_id = $2)
               OR (requester_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friend)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendEntity>, error::SystemError> {
        let friend = sqlx::query_as::<_, FriendEntity>("SELECT * FROM friends WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(friend)
    }

    async fn create(
        &self,
        requester_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendEntity, error::SystemError> {
        // A unique index on (LEAST(requester_id, receiver_id),
        // GREATEST(requester_id, receiver_id)) backs the pair invariant, so a
        // concurrent identical request fails with a conflict instead of
        // producing a second pending row.
        let friend = sqlx::query_as::<_, FriendEntity>(
            r#"
            INSERT INTO friends (requester_id, receiver_id, status)
            VALUES ($1, $2, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(requester_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(friend)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE friends SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn reactivate(
        &self,
        id: &Uuid,
        requester_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendEntity, error::SystemError> {
        let friend = sqlx::query_as::<_, FriendEntity>(
            r#"
            UPDATE friends
            SET requester_id = $2,
                receiver_id = $3,
                status = 'PENDING',
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(friend)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM friends WHERE id = $1").bind(id).execute(&self.pool).await?;

        Ok(())
    }

    async fn is_friend(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM friends
                WHERE status = 'ACCEPTED'
                  AND ((requester_id = $1 AND receiver_id = $2)
                    OR (requester_id = $2 AND receiver_id = $1))
            )
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_accepted(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendSummaryResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendSummaryResponse>(
            r#"
            SELECT
                f.id AS relationship_id,
                u.id AS user_id,
                u.nickname
            FROM friends f
            JOIN users u
                ON u.id = CASE
                    WHEN f.requester_id = $1 THEN f.receiver_id
                    ELSE f.requester_id
                END
            WHERE f.status = 'ACCEPTED'
              AND (f.requester_id = $1 OR f.receiver_id = $1)
              AND u.deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn find_pending_received(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestResponse>(
            r#"
            SELECT
                f.id AS relationship_id,
                u.id AS requester_id,
                u.nickname AS requester_nickname,
                f.created_at
            FROM friends f
            JOIN users u ON u.id = f.requester_id
            WHERE f.status = 'PENDING'
              AND f.receiver_id = $1
              AND u.deleted_at IS NULL
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
