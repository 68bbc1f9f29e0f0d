use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{
    id::SpaceId,
    space::{Space, SpaceWithOccupancy},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: SpaceId,
    pub code: String,
    pub name: String,
    pub space_type: String,
    pub capacity: i32,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SpaceRow> for Space {
    type Error = AppError;

    fn try_from(value: SpaceRow) -> Result<Self, Self::Error> {
        let SpaceRow {
            space_id,
            code,
            name,
            space_type,
            capacity,
            building,
            floor,
            description,
            status,
            created_at,
            updated_at,
        } = value;
        Ok(Space {
            space_id,
            code,
            name,
            space_type: parse_column("space type", &space_type)?,
            capacity,
            building,
            floor,
            description,
            status: parse_column("space status", &status)?,
            created_at,
            updated_at,
        })
    }
}

// Spaces with their ACTIVE access count; `$1` binds the ACTIVE status.
pub const SPACE_OCCUPANCY_SELECT: &str = r#"
    SELECT
        s.space_id, s.code, s.name, s.space_type, s.capacity, s.building,
        s.floor, s.description, s.status, s.created_at, s.updated_at,
        (
            SELECT COUNT(*) FROM access_records AS a
            WHERE a.space_id = s.space_id AND a.status = $1
        ) AS current_occupancy
    FROM spaces AS s
"#;

// Space listing row carrying the live ACTIVE access count.
#[derive(sqlx::FromRow)]
pub struct SpaceOccupancyRow {
    #[sqlx(flatten)]
    pub space: SpaceRow,
    pub current_occupancy: i64,
}

impl TryFrom<SpaceOccupancyRow> for SpaceWithOccupancy {
    type Error = AppError;

    fn try_from(value: SpaceOccupancyRow) -> Result<Self, Self::Error> {
        Ok(SpaceWithOccupancy {
            space: value.space.try_into()?,
            current_occupancy: value.current_occupancy,
        })
    }
}
