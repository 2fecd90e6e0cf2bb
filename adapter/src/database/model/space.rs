use kernel::model::{id::SpaceId, space::Space};

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: SpaceId,
    pub name: String,
    pub capacity: i32,
}

impl From<SpaceRow> for Space {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            space_id,
            name,
            capacity,
        } = value;
        Space {
            id: space_id,
            name,
            capacity,
        }
    }
}
