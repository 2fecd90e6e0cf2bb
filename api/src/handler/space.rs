use crate::model::space::{CreateSpaceRequest, SpaceResponse};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

// TODO: 管理者以外でもスペースを登録できてしまうため、認可チェックを追加する
pub async fn register_space(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSpaceRequest>,
) -> AppResult<(StatusCode, Json<SpaceResponse>)> {
    req.validate(&())?;

    registry
        .space_repository()
        .create(req.into())
        .await
        .map(|space| (StatusCode::CREATED, Json(space.into())))
}

pub async fn show_space_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<SpaceResponse>>> {
    registry
        .space_repository()
        .find_all()
        .await
        .map(|spaces| spaces.into_iter().map(SpaceResponse::from).collect())
        .map(Json)
}
