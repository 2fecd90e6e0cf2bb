use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

use crate::model::{
    id::SpaceId,
    reservation::{event::CreateReservation, Reservation},
};

#[mockall::automock]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を登録し、採番済みの予約を返す。重複チェックは行わない
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    // 予約者に紐づく予約をすべて取得する
    async fn find_by_user_email(&self, user_email: &str) -> AppResult<Vec<Reservation>>;
    // 指定スペース・指定日付の予約件数を数える
    async fn count_by_space_and_date(
        &self,
        space_id: SpaceId,
        reservation_date: NaiveDate,
    ) -> AppResult<i64>;
}
