use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::SpaceId,
    space::{
        event::{CreateSpace, UpdateSpace},
        SpaceStatus, SpaceType, SpaceWithOccupancy,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceTypeName {
    Classroom,
    Laboratory,
    StudyRoom,
    Library,
    Auditorium,
    MeetingRoom,
    Other,
}

impl From<SpaceType> for SpaceTypeName {
    fn from(value: SpaceType) -> Self {
        match value {
            SpaceType::Classroom => Self::Classroom,
            SpaceType::Laboratory => Self::Laboratory,
            SpaceType::StudyRoom => Self::StudyRoom,
            SpaceType::Library => Self::Library,
            SpaceType::Auditorium => Self::Auditorium,
            SpaceType::MeetingRoom => Self::MeetingRoom,
            SpaceType::Other => Self::Other,
        }
    }
}

impl From<SpaceTypeName> for SpaceType {
    fn from(value: SpaceTypeName) -> Self {
        match value {
            SpaceTypeName::Classroom => Self::Classroom,
            SpaceTypeName::Laboratory => Self::Laboratory,
            SpaceTypeName::StudyRoom => Self::StudyRoom,
            SpaceTypeName::Library => Self::Library,
            SpaceTypeName::Auditorium => Self::Auditorium,
            SpaceTypeName::MeetingRoom => Self::MeetingRoom,
            SpaceTypeName::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceStatusName {
    Available,
    Occupied,
    Maintenance,
    Unavailable,
}

impl From<SpaceStatus> for SpaceStatusName {
    fn from(value: SpaceStatus) -> Self {
        match value {
            SpaceStatus::Available => Self::Available,
            SpaceStatus::Occupied => Self::Occupied,
            SpaceStatus::Maintenance => Self::Maintenance,
            SpaceStatus::Unavailable => Self::Unavailable,
        }
    }
}

impl From<SpaceStatusName> for SpaceStatus {
    fn from(value: SpaceStatusName) -> Self {
        match value {
            SpaceStatusName::Available => Self::Available,
            SpaceStatusName::Occupied => Self::Occupied,
            SpaceStatusName::Maintenance => Self::Maintenance,
            SpaceStatusName::Unavailable => Self::Unavailable,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(length(min = 1, max = 50))]
    pub code: String,
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[serde(rename = "type")]
    #[garde(skip)]
    pub space_type: SpaceTypeName,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(length(max = 50))]
    pub building: Option<String>,
    #[garde(length(max = 20))]
    pub floor: Option<String>,
    #[garde(length(max = 500))]
    pub description: Option<String>,
}

impl From<CreateSpaceRequest> for CreateSpace {
    fn from(value: CreateSpaceRequest) -> Self {
        let CreateSpaceRequest {
            code,
            name,
            space_type,
            capacity,
            building,
            floor,
            description,
        } = value;
        CreateSpace {
            code,
            name,
            space_type: space_type.into(),
            capacity,
            building,
            floor,
            description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    #[garde(length(min = 1, max = 50))]
    pub code: String,
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[serde(rename = "type")]
    #[garde(skip)]
    pub space_type: SpaceTypeName,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(length(max = 50))]
    pub building: Option<String>,
    #[garde(length(max = 20))]
    pub floor: Option<String>,
    #[garde(length(max = 500))]
    pub description: Option<String>,
    #[garde(skip)]
    pub status: Option<SpaceStatusName>,
}

#[derive(new)]
pub struct UpdateSpaceRequestWithId(SpaceId, UpdateSpaceRequest);

impl From<UpdateSpaceRequestWithId> for UpdateSpace {
    fn from(value: UpdateSpaceRequestWithId) -> Self {
        let UpdateSpaceRequestWithId(
            space_id,
            UpdateSpaceRequest {
                code,
                name,
                space_type,
                capacity,
                building,
                floor,
                description,
                status,
            },
        ) = value;
        UpdateSpace {
            space_id,
            code,
            name,
            space_type: space_type.into(),
            capacity,
            building,
            floor,
            description,
            status: status.map(SpaceStatus::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub id: SpaceId,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub space_type: SpaceTypeName,
    pub capacity: i32,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub description: Option<String>,
    pub status: SpaceStatusName,
    pub current_occupancy: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SpaceWithOccupancy> for SpaceResponse {
    fn from(value: SpaceWithOccupancy) -> Self {
        let SpaceWithOccupancy {
            space,
            current_occupancy,
        } = value;
        Self {
            id: space.space_id,
            code: space.code,
            name: space.name,
            space_type: space.space_type.into(),
            capacity: space.capacity,
            building: space.building,
            floor: space.floor,
            description: space.description,
            status: space.status.into(),
            current_occupancy,
            created_at: space.created_at,
            updated_at: space.updated_at,
        }
    }
}
