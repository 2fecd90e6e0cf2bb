use crate::model::id::SpaceId;
use chrono::NaiveDate;
use derive_new::new;

// 予約受付フローへの入力。予約日は未指定のまま受け取り、受付時に検査する
#[derive(Debug, Clone, new)]
pub struct SubmitReservation {
    pub space_id: SpaceId,
    pub user_email: String,
    pub reservation_date: Option<NaiveDate>,
}

// 受付フローの検査をすべて通過した予約を台帳に登録するためのイベント
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CreateReservation {
    pub space_id: SpaceId,
    pub user_email: String,
    pub reservation_date: NaiveDate,
}
