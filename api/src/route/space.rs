use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::space::{register_space, show_space_list};

pub fn build_space_routers() -> Router<AppRegistry> {
    Router::new().route("/spaces", get(show_space_list).post(register_space))
}
