use crate::model::id::SpaceId;
use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceType {
    Classroom,
    Laboratory,
    StudyRoom,
    Library,
    Auditorium,
    MeetingRoom,
    Other,
}

/// `Available` and `Occupied` are derived from the live occupancy count;
/// `Maintenance` and `Unavailable` are administrative overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceStatus {
    Available,
    Occupied,
    Maintenance,
    Unavailable,
}

impl SpaceStatus {
    pub fn is_override(self) -> bool {
        matches!(self, SpaceStatus::Maintenance | SpaceStatus::Unavailable)
    }

    pub fn accepts_entries(self) -> bool {
        !self.is_override()
    }
}

#[derive(Debug, Clone)]
pub struct Space {
    pub space_id: SpaceId,
    pub code: String,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i32,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub description: Option<String>,
    pub status: SpaceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SpaceWithOccupancy {
    pub space: Space,
    pub current_occupancy: i64,
}
