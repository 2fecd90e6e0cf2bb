use chrono::NaiveDate;
use kernel::model::{
    id::{ReservationId, SpaceId},
    reservation::Reservation,
};

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub space_id: SpaceId,
    pub user_email: String,
    pub reservation_date: NaiveDate,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            reservation_id,
            space_id,
            user_email,
            reservation_date,
        } = value;
        Reservation {
            id: reservation_id,
            space_id,
            user_email,
            reservation_date,
        }
    }
}
