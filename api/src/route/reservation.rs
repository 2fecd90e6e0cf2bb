use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::reservation::{reserve_space, show_reservation_list};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/reservations",
        get(show_reservation_list).post(reserve_space),
    )
}
