use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use kernel::model::{
    id::{ReservationId, SpaceId},
    reservation::{event::CreateReservation, Reservation},
    space::{event::CreateSpace, Space},
};
use kernel::repository::{
    health::HealthCheckRepository, reservation::ReservationRepository, space::SpaceRepository,
};
use shared::error::{AppError, AppResult};

// プロセス内メモリに保持するストア。PostgreSQL を用意できない開発環境やテストで使う
// clone したインスタンス同士は同じデータを共有する
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    spaces: Vec<Space>,
    reservations: Vec<Reservation>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| AppError::StoreError(e.to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| AppError::StoreError(e.to_string()))
    }
}

#[async_trait]
impl SpaceRepository for InMemoryStore {
    async fn create(&self, event: CreateSpace) -> AppResult<Space> {
        let CreateSpace { name, capacity } = event;
        let space = Space {
            id: SpaceId::new(),
            name,
            capacity,
        };
        self.write()?.spaces.push(space.clone());
        Ok(space)
    }

    // 登録順に返す
    async fn find_all(&self) -> AppResult<Vec<Space>> {
        Ok(self.read()?.spaces.clone())
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        Ok(self
            .read()?
            .spaces
            .iter()
            .find(|space| space.id == space_id)
            .cloned())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let CreateReservation {
            space_id,
            user_email,
            reservation_date,
        } = event;
        let reservation = Reservation {
            id: ReservationId::new(),
            space_id,
            user_email,
            reservation_date,
        };
        self.write()?.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_user_email(&self, user_email: &str) -> AppResult<Vec<Reservation>> {
        Ok(self
            .read()?
            .reservations
            .iter()
            .filter(|r| r.user_email == user_email)
            .cloned()
            .collect())
    }

    async fn count_by_space_and_date(
        &self,
        space_id: SpaceId,
        reservation_date: NaiveDate,
    ) -> AppResult<i64> {
        let count = self
            .read()?
            .reservations
            .iter()
            .filter(|r| r.space_id == space_id && r.reservation_date == reservation_date)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl HealthCheckRepository for InMemoryStore {
    async fn check_db(&self) -> bool {
        self.read().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[tokio::test]
    async fn spaces_get_distinct_ids_and_can_be_found() -> anyhow::Result<()> {
        let store = InMemoryStore::new();

        let a = SpaceRepository::create(&store, CreateSpace::new("Room A".into(), 2)).await?;
        let b = SpaceRepository::create(&store, CreateSpace::new("Room B".into(), 0)).await?;
        assert_ne!(a.id, b.id);

        assert_eq!(store.find_all().await?, vec![a.clone(), b]);
        assert_eq!(store.find_by_id(a.id).await?, Some(a));
        assert_eq!(store.find_by_id(SpaceId::new()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn ledger_counts_per_space_and_date() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let space_a = SpaceId::new();
        let space_b = SpaceId::new();

        for (space_id, email, day) in [
            (space_a, "a@example.com", 1),
            (space_a, "b@example.com", 1),
            (space_a, "a@example.com", 2),
            (space_b, "a@example.com", 1),
        ] {
            ReservationRepository::create(
                &store,
                CreateReservation::new(space_id, email.into(), date(day)),
            )
            .await?;
        }

        assert_eq!(store.count_by_space_and_date(space_a, date(1)).await?, 2);
        assert_eq!(store.count_by_space_and_date(space_a, date(2)).await?, 1);
        assert_eq!(store.count_by_space_and_date(space_b, date(2)).await?, 0);

        let mine = store.find_by_user_email("a@example.com").await?;
        assert_eq!(mine.len(), 3);
        assert!(mine.iter().all(|r| r.user_email == "a@example.com"));
        assert!(store.find_by_user_email("c@example.com").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn repeated_reads_return_the_same_records() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let space = SpaceRepository::create(&store, CreateSpace::new("Room A".into(), 3)).await?;
        ReservationRepository::create(
            &store,
            CreateReservation::new(space.id, "a@example.com".into(), date(1)),
        )
        .await?;

        assert_eq!(store.find_all().await?, store.find_all().await?);
        assert_eq!(
            store.find_by_user_email("a@example.com").await?,
            store.find_by_user_email("a@example.com").await?
        );
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_the_same_tables() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let other = store.clone();

        SpaceRepository::create(&store, CreateSpace::new("Room A".into(), 1)).await?;

        assert_eq!(other.find_all().await?.len(), 1);
        assert!(other.check_db().await);
        Ok(())
    }
}
