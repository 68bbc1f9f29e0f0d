use crate::model::{
    id::SpaceId,
    space::{SpaceStatus, SpaceType},
};

pub struct CreateSpace {
    pub code: String,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i32,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct UpdateSpace {
    pub space_id: SpaceId,
    pub code: String,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i32,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub description: Option<String>,
    pub status: Option<SpaceStatus>,
}

#[derive(Debug)]
pub struct DeleteSpace {
    pub space_id: SpaceId,
}
