use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    id::{ReservationId, SpaceId},
    reservation::{event::CreateReservation, Reservation},
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約を 1 件登録する
    // 容量チェックは受付フロー側で行うため、ここではトランザクションを張らずに INSERT のみ行う
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let reservation_id = ReservationId::new();
        sqlx::query_as::<_, ReservationRow>(
            r#"
                INSERT INTO reservations
                (reservation_id, space_id, user_email, reservation_date)
                VALUES ($1, $2, $3, $4)
                RETURNING reservation_id, space_id, user_email, reservation_date
            "#,
        )
        .bind(reservation_id)
        .bind(event.space_id)
        .bind(event.user_email)
        .bind(event.reservation_date)
        .fetch_one(self.db.inner_ref())
        .await
        .map(Reservation::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_user_email(&self, user_email: &str) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT reservation_id, space_id, user_email, reservation_date
                FROM reservations
                WHERE user_email = $1
                ORDER BY reservation_date ASC, created_at ASC
            "#,
        )
        .bind(user_email)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Reservation::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn count_by_space_and_date(
        &self,
        space_id: SpaceId,
        reservation_date: NaiveDate,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*)
                FROM reservations
                WHERE space_id = $1 AND reservation_date = $2
            "#,
        )
        .bind(space_id)
        .bind(reservation_date)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::space::SpaceRepositoryImpl;
    use kernel::{model::space::event::CreateSpace, repository::space::SpaceRepository};

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL instance reachable through DATABASE_URL"]
    async fn test_reservation_ledger(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let space = SpaceRepositoryImpl::new(db.clone())
            .create(CreateSpace::new("Room A".into(), 2))
            .await?;
        let repo = ReservationRepositoryImpl::new(db);

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let other_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        assert_eq!(repo.count_by_space_and_date(space.id, date).await?, 0);

        let created = repo
            .create(CreateReservation::new(space.id, "a@example.com".into(), date))
            .await?;
        repo.create(CreateReservation::new(space.id, "b@example.com".into(), date))
            .await?;
        repo.create(CreateReservation::new(
            space.id,
            "a@example.com".into(),
            other_date,
        ))
        .await?;

        assert_eq!(repo.count_by_space_and_date(space.id, date).await?, 2);
        assert_eq!(repo.count_by_space_and_date(space.id, other_date).await?, 1);

        let res = repo.find_by_user_email("a@example.com").await?;
        assert_eq!(res.len(), 2);
        assert_eq!(res[0], created);
        assert!(repo.find_by_user_email("nobody@example.com").await?.is_empty());
        Ok(())
    }
}
