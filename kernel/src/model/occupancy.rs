//! Occupancy accounting.
//!
//! A space's occupancy is the number of ACTIVE access records that reference
//! it. It is never stored; callers count it inside the same transaction that
//! holds the space row lock and pass the number in here. The persisted
//! `SpaceStatus` is a projection of that count: `Occupied` while anyone is
//! inside, `Available` otherwise, unless an administrator has set an override.

use crate::model::space::{Space, SpaceStatus};
use shared::error::{AppError, AppResult};

/// Refuses entry while the space carries an administrative override.
pub fn ensure_accepts_entries(space: &Space) -> AppResult<()> {
    if space.status.accepts_entries() {
        Ok(())
    } else {
        Err(AppError::BusinessRuleViolation(format!(
            "Space {} is not available (status: {})",
            space.code, space.status
        )))
    }
}

/// Gate applied right before an access record is inserted.
pub fn validate_entry_capacity(space: &Space, current_occupancy: i64) -> AppResult<()> {
    ensure_accepts_entries(space)?;
    if current_occupancy >= i64::from(space.capacity) {
        return Err(AppError::BusinessRuleViolation(format!(
            "Space {} has reached maximum capacity ({})",
            space.code, space.capacity
        )));
    }
    Ok(())
}

pub fn derive_status_after_entry(space: &Space, occupancy_after_insert: i64) -> SpaceStatus {
    derive_status(space.status, occupancy_after_insert)
}

pub fn derive_status_after_exit(space: &Space, occupancy_after_removal: i64) -> SpaceStatus {
    derive_status(space.status, occupancy_after_removal)
}

/// Status to persist when an administrator edits a space. Requesting either
/// dynamic state clears an override and re-derives from the live count.
pub fn resolve_admin_status(
    current: SpaceStatus,
    requested: Option<SpaceStatus>,
    current_occupancy: i64,
) -> SpaceStatus {
    match requested {
        Some(status) if status.is_override() => status,
        Some(_) => occupied_or_available(current_occupancy),
        None => derive_status(current, current_occupancy),
    }
}

fn derive_status(current: SpaceStatus, occupancy: i64) -> SpaceStatus {
    if current.is_override() {
        current
    } else {
        occupied_or_available(occupancy)
    }
}

fn occupied_or_available(occupancy: i64) -> SpaceStatus {
    if occupancy > 0 {
        SpaceStatus::Occupied
    } else {
        SpaceStatus::Available
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{id::SpaceId, space::SpaceType};
    use chrono::Utc;
    use rstest::rstest;

    pub(crate) fn space(capacity: i32, status: SpaceStatus) -> Space {
        Space {
            space_id: SpaceId::new(),
            code: "LAB-101".into(),
            name: "Physics Lab".into(),
            space_type: SpaceType::Laboratory,
            capacity,
            building: Some("B".into()),
            floor: Some("1".into()),
            description: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(0, true)]
    #[case(29, true)]
    #[case(30, false)]
    #[case(31, false)]
    fn capacity_gate(#[case] occupancy: i64, #[case] admitted: bool) {
        let space = space(30, SpaceStatus::Occupied);
        assert_eq!(validate_entry_capacity(&space, occupancy).is_ok(), admitted);
    }

    #[rstest]
    #[case(SpaceStatus::Maintenance)]
    #[case(SpaceStatus::Unavailable)]
    fn overrides_block_entry_regardless_of_capacity(#[case] status: SpaceStatus) {
        let space = space(30, status);
        let err = validate_entry_capacity(&space, 0).unwrap_err();
        assert!(matches!(err, AppError::BusinessRuleViolation(msg) if msg.contains("not available")));
    }

    #[test]
    fn first_entry_occupies_the_space() {
        let space = space(30, SpaceStatus::Available);
        assert_eq!(derive_status_after_entry(&space, 1), SpaceStatus::Occupied);
        assert_eq!(derive_status_after_entry(&space, 30), SpaceStatus::Occupied);
    }

    #[rstest]
    #[case(0, SpaceStatus::Available)]
    #[case(1, SpaceStatus::Occupied)]
    #[case(29, SpaceStatus::Occupied)]
    fn exit_derives_from_remaining_occupancy(#[case] remaining: i64, #[case] expected: SpaceStatus) {
        let space = space(30, SpaceStatus::Occupied);
        assert_eq!(derive_status_after_exit(&space, remaining), expected);
    }

    #[test]
    fn exit_keeps_administrative_override() {
        let space = space(30, SpaceStatus::Maintenance);
        assert_eq!(derive_status_after_exit(&space, 0), SpaceStatus::Maintenance);
    }

    #[rstest]
    #[case(SpaceStatus::Available, Some(SpaceStatus::Maintenance), 3, SpaceStatus::Maintenance)]
    #[case(SpaceStatus::Maintenance, Some(SpaceStatus::Available), 3, SpaceStatus::Occupied)]
    #[case(SpaceStatus::Unavailable, Some(SpaceStatus::Occupied), 0, SpaceStatus::Available)]
    #[case(SpaceStatus::Occupied, Some(SpaceStatus::Available), 2, SpaceStatus::Occupied)]
    #[case(SpaceStatus::Unavailable, None, 0, SpaceStatus::Unavailable)]
    #[case(SpaceStatus::Occupied, None, 0, SpaceStatus::Available)]
    fn admin_status_resolution(
        #[case] current: SpaceStatus,
        #[case] requested: Option<SpaceStatus>,
        #[case] occupancy: i64,
        #[case] expected: SpaceStatus,
    ) {
        assert_eq!(resolve_admin_status(current, requested, occupancy), expected);
    }
}
