use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, SpaceId},
    reservation::{event::SubmitReservation, Reservation},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub user_email: String,
}

// reservationDate は省略・null を許し、受付フロー側で必須チェックを行う
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub space_id: SpaceId,
    #[garde(skip)]
    pub user_email: String,
    #[garde(skip)]
    #[serde(default)]
    pub reservation_date: Option<NaiveDate>,
}

impl From<CreateReservationRequest> for SubmitReservation {
    fn from(value: CreateReservationRequest) -> Self {
        let CreateReservationRequest {
            space_id,
            user_email,
            reservation_date,
        } = value;
        SubmitReservation {
            space_id,
            user_email,
            reservation_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub space_id: SpaceId,
    pub user_email: String,
    pub reservation_date: NaiveDate,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            space_id,
            user_email,
            reservation_date,
        } = value;
        Self {
            id,
            space_id,
            user_email,
            reservation_date,
        }
    }
}
