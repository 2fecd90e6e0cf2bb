use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::NaiveDate;
use derive_new::new;
use shared::{config::AdmissionMode, error::AppError};
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

use crate::{
    model::{
        id::SpaceId,
        reservation::{
            event::{CreateReservation, SubmitReservation},
            Reservation,
        },
    },
    repository::{reservation::ReservationRepository, space::SpaceRepository},
};

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("Reservation date is required")]
    MissingDate,
    #[error("Space not found with id: {0}")]
    SpaceNotFound(SpaceId),
    #[error("Space is at capacity for this date. Current reservations: {current}, Capacity: {capacity}")]
    CapacityExceeded { current: i64, capacity: i32 },
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<AdmissionError> for AppError {
    fn from(value: AdmissionError) -> Self {
        match value {
            e @ (AdmissionError::MissingDate | AdmissionError::CapacityExceeded { .. }) => {
                AppError::BadRequest(e.to_string())
            }
            e @ AdmissionError::SpaceNotFound(_) => AppError::EntityNotFound(e.to_string()),
            AdmissionError::Store(e) => e,
        }
    }
}

// 予約の受付可否を判定し、受け付けたものだけを台帳に記録する。
// 判定は「予約日の指定」「スペースの存在」「当日の予約数 < 定員」の順で行い、最初に失敗した時点で打ち切る。
// Unguarded では定員確認と登録が不可分ではないため、同じスペース・日付への同時申請で定員を超えうる。
// Serialized ではスペース・日付ごとのロックを検索から登録まで保持する。
#[derive(new)]
pub struct ReservationAdmission {
    space_repository: Arc<dyn SpaceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    mode: AdmissionMode,
    #[new(default)]
    slots: SlotLocks,
}

impl ReservationAdmission {
    pub fn mode(&self) -> AdmissionMode {
        self.mode
    }

    pub async fn submit(&self, request: SubmitReservation) -> Result<Reservation, AdmissionError> {
        let SubmitReservation {
            space_id,
            user_email,
            reservation_date,
        } = request;

        // 予約日の指定がなければ、スペースにも台帳にも問い合わせずに拒否する
        let Some(reservation_date) = reservation_date else {
            tracing::warn!(%space_id, "reservation rejected: reservation date is missing");
            return Err(AdmissionError::MissingDate);
        };

        match self.mode {
            AdmissionMode::Unguarded => self.admit(space_id, user_email, reservation_date).await,
            AdmissionMode::Serialized => {
                let _permit = self.slots.acquire((space_id, reservation_date)).await;
                self.admit(space_id, user_email, reservation_date).await
            }
        }
    }

    async fn admit(
        &self,
        space_id: SpaceId,
        user_email: String,
        reservation_date: NaiveDate,
    ) -> Result<Reservation, AdmissionError> {
        let Some(space) = self.space_repository.find_by_id(space_id).await? else {
            tracing::warn!(%space_id, "reservation rejected: space not found");
            return Err(AdmissionError::SpaceNotFound(space_id));
        };

        let current = self
            .reservation_repository
            .count_by_space_and_date(space_id, reservation_date)
            .await?;

        if current >= i64::from(space.capacity) {
            tracing::warn!(
                %space_id,
                %reservation_date,
                current,
                capacity = space.capacity,
                "reservation rejected: space is at capacity"
            );
            return Err(AdmissionError::CapacityExceeded {
                current,
                capacity: space.capacity,
            });
        }

        let reservation = self
            .reservation_repository
            .create(CreateReservation::new(
                space_id,
                user_email,
                reservation_date,
            ))
            .await?;

        tracing::info!(
            reservation_id = %reservation.id,
            %space_id,
            %reservation_date,
            "reservation accepted"
        );

        Ok(reservation)
    }
}

type SlotKey = (SpaceId, NaiveDate);

// スペース・日付ごとの非同期ロック。保持者と待機者の数を数え、0 になったエントリは削除する
#[derive(Default)]
struct SlotLocks {
    slots: Mutex<HashMap<SlotKey, Slot>>,
}

#[derive(Default)]
struct Slot {
    lock: Arc<tokio::sync::Mutex<()>>,
    users: usize,
}

impl SlotLocks {
    async fn acquire(&self, key: SlotKey) -> SlotPermit<'_> {
        let lock = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            let slot = slots.entry(key).or_default();
            slot.users += 1;
            slot.lock.clone()
        };
        // 待機中に future が破棄されても Drop で利用者数を戻せるよう、先に permit を作る
        let mut permit = SlotPermit {
            locks: self,
            key,
            guard: None,
        };
        permit.guard = Some(lock.lock_owned().await);
        permit
    }

    fn release(&self, key: SlotKey) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = match slots.get_mut(&key) {
            Some(slot) => {
                slot.users = slot.users.saturating_sub(1);
                slot.users == 0
            }
            None => false,
        };
        if idle {
            slots.remove(&key);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

struct SlotPermit<'a> {
    locks: &'a SlotLocks,
    key: SlotKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SlotPermit<'_> {
    fn drop(&mut self) {
        // ロックを解放してからエントリの掃除を行う
        self.guard.take();
        self.locks.release(self.key);
    }
}
