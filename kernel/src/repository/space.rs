use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::SpaceId,
    space::{event::CreateSpace, Space},
};

#[mockall::automock]
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    // スペースを登録し、採番済みのスペースを返す
    async fn create(&self, event: CreateSpace) -> AppResult<Space>;
    // すべてのスペースを取得する（順序は実装依存）
    async fn find_all(&self) -> AppResult<Vec<Space>>;
    // 見つからない場合は None を返す。エラーにはしない
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>>;
}
