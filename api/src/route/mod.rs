pub mod health;
pub mod reservation;
pub mod space;

use axum::Router;
use registry::AppRegistry;

use self::{
    health::build_health_check_routers, reservation::build_reservation_routers,
    space::build_space_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_space_routers())
        .merge(build_reservation_routers());
    Router::new().nest("/api", router)
}
