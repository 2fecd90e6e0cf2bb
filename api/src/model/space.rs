use garde::Validate;
use kernel::model::{
    id::SpaceId,
    space::{event::CreateSpace, Space},
};
use serde::{Deserialize, Serialize};

// 名前・容量の内容は検証しない（容量 0 以下も受け付ける）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(skip)]
    pub name: String,
    #[garde(skip)]
    pub capacity: i32,
}

impl From<CreateSpaceRequest> for CreateSpace {
    fn from(value: CreateSpaceRequest) -> Self {
        let CreateSpaceRequest { name, capacity } = value;
        CreateSpace { name, capacity }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub id: SpaceId,
    pub name: String,
    pub capacity: i32,
}

impl From<Space> for SpaceResponse {
    fn from(value: Space) -> Self {
        let Space { id, name, capacity } = value;
        Self { id, name, capacity }
    }
}
