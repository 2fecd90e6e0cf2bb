use crate::database::{model::space::SpaceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::SpaceId,
    space::{event::CreateSpace, Space},
};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn create(&self, event: CreateSpace) -> AppResult<Space> {
        let space_id = SpaceId::new();
        sqlx::query_as::<_, SpaceRow>(
            r#"
                INSERT INTO spaces (space_id, name, capacity)
                VALUES ($1, $2, $3)
                RETURNING space_id, name, capacity
            "#,
        )
        .bind(space_id)
        .bind(event.name)
        .bind(event.capacity)
        .fetch_one(self.db.inner_ref())
        .await
        .map(Space::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self) -> AppResult<Vec<Space>> {
        // 新しく登録されたスペースから順に返す
        sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, name, capacity
                FROM spaces
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Space::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, name, capacity
                FROM spaces
                WHERE space_id = $1
            "#,
        )
        .bind(space_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Space::from))
        .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL instance reachable through DATABASE_URL"]
    async fn test_register_space(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = SpaceRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo
            .create(CreateSpace::new("Test SpaceName".into(), 5))
            .await?;

        let res = repo.find_all().await?;
        assert_eq!(res.len(), 1);
        assert_eq!(res[0], created);

        let res = repo.find_by_id(created.id).await?;
        let Some(Space { id, name, capacity }) = res else {
            anyhow::bail!("registered space was not found");
        };
        assert_eq!(id, created.id);
        assert_eq!(name, "Test SpaceName");
        assert_eq!(capacity, 5);

        assert!(repo.find_by_id(SpaceId::new()).await?.is_none());
        Ok(())
    }
}
