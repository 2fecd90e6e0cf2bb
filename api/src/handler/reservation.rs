use crate::model::reservation::{
    CreateReservationRequest, ReservationListQuery, ReservationResponse,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn reserve_space(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate(&())?;

    // 予約日の必須チェック・スペースの存在確認・容量チェックは受付フローに任せる
    registry
        .reservation_admission()
        .submit(req.into())
        .await
        .map(|reservation| (StatusCode::CREATED, Json(reservation.into())))
        .map_err(AppError::from)
}

pub async fn show_reservation_list(
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    registry
        .reservation_repository()
        .find_by_user_email(&query.user_email)
        .await
        .map(|reservations| {
            reservations
                .into_iter()
                .map(ReservationResponse::from)
                .collect()
        })
        .map(Json)
}
