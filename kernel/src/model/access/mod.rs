use crate::model::id::{AccessRecordId, SpaceId, StudentId};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

pub mod event;
pub mod lifecycle;

const NOTES_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone)]
pub struct AccessRecord {
    pub access_record_id: AccessRecordId,
    pub student: AccessStudent,
    pub space: AccessSpace,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub status: AccessStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AccessStudent {
    pub student_id: StudentId,
    pub name: String,
    pub registration_number: String,
}

#[derive(Debug, Clone)]
pub struct AccessSpace {
    pub space_id: SpaceId,
    pub name: String,
    pub code: String,
}

impl AccessRecord {
    pub fn is_active(&self) -> bool {
        self.status == AccessStatus::Active
    }

    pub fn duration_in_minutes(&self) -> Option<i64> {
        duration_in_minutes(self.entry_time, self.exit_time)
    }
}

/// Whole minutes between entry and exit, floored at zero. `None` while the
/// access is still open.
pub fn duration_in_minutes(
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
) -> Option<i64> {
    exit_time.map(|exit| (exit - entry_time).num_minutes().max(0))
}

pub fn append_notes(current: Option<String>, addition: Option<String>) -> Option<String> {
    match (current, addition) {
        (Some(current), Some(addition)) => Some(format!("{current}{NOTES_SEPARATOR}{addition}")),
        (None, Some(addition)) => Some(addition),
        (current, None) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn duration_is_whole_minutes() {
        let entry = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let exit = entry + Duration::seconds(60 * 45 + 59);
        assert_eq!(duration_in_minutes(entry, Some(exit)), Some(45));
        assert_eq!(duration_in_minutes(entry, None), None);
    }

    #[test]
    fn duration_never_negative() {
        let entry = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let exit = entry - Duration::minutes(3);
        assert_eq!(duration_in_minutes(entry, Some(exit)), Some(0));
    }

    #[test]
    fn notes_are_joined_on_exit() {
        assert_eq!(
            append_notes(Some("lab session".into()), Some("left early".into())).as_deref(),
            Some("lab session | left early")
        );
        assert_eq!(
            append_notes(None, Some("left early".into())).as_deref(),
            Some("left early")
        );
        assert_eq!(
            append_notes(Some("lab session".into()), None).as_deref(),
            Some("lab session")
        );
        assert_eq!(append_notes(None, None), None);
    }
}
