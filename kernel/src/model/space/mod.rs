use crate::model::id::SpaceId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    // 同一日付に受け付けられる予約の上限
    pub capacity: i32,
}
