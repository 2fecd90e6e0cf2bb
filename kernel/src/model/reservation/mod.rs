use crate::model::id::{ReservationId, SpaceId};
use chrono::NaiveDate;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub space_id: SpaceId,
    pub user_email: String,
    pub reservation_date: NaiveDate,
}
