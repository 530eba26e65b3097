use uuid::Uuid;

use crate::{
    api::error,
    modules::diary::{
        model::CreateDiaryBody, repository::DiaryRepository, schema::DiaryEntity,
    },
};

#[derive(Clone)]
pub struct DiaryRepositoryPg {
    pool: sqlx::PgPool,
}

impl DiaryRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DiaryRepository for DiaryRepositoryPg {
    async fn create(
        &self,
        owner_id: &Uuid,
        body: &CreateDiaryBody,
    ) -> Result<DiaryEntity, error::SystemError> {
        let diary = sqlx::query_as::<_, DiaryEntity>(
            r#"
            INSERT INTO diaries
                (user_id, title, content, latitude, longitude, location_name,
                 address, visited_at, visibility)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&body.title)
        .bind(&body.content)
        .bind(body.latitude)
        .bind(body.longitude)
        .bind(&body.location_name)
        .bind(&body.address)
        .bind(body.visited_at)
        .bind(body.visibility)
        .fetch_one(&self.pool)
        .await?;

        Ok(diary)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<DiaryEntity>, error::SystemError> {
        let diary = sqlx::query_as::<_, DiaryEntity>("SELECT * FROM diaries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(diary)
    }

    async fn soft_delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE diaries SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: &Uuid,
    ) -> Result<Vec<DiaryEntity>, error::SystemError> {
        let diaries = sqlx::query_as::<_, DiaryEntity>(
            r#"
            SELECT *
            FROM diaries
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY visited_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(diaries)
    }

    async fn share_exists(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM diary_shares WHERE diary_id = $1 AND user_id = $2)",
        )
        .bind(diary_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn add_share(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query(
            r#"
            INSERT INTO diary_shares (diary_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(diary_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_share(
        &self,
        diary_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM diary_shares WHERE diary_id = $1 AND user_id = $2")
            .bind(diary_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
