use crate::model::id::{AccessRecordId, SpaceId, StudentId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct RegisterEntry {
    pub student_id: StudentId,
    pub space_id: SpaceId,
    pub notes: Option<String>,
}

#[derive(new, Debug)]
pub struct RegisterExit {
    pub access_record_id: AccessRecordId,
    pub notes: Option<String>,
}

/// Row written when an entry is admitted.
#[derive(Debug)]
pub struct NewAccessRecord {
    pub access_record_id: AccessRecordId,
    pub student_id: StudentId,
    pub space_id: SpaceId,
    pub entry_time: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct CompleteAccess {
    pub access_record_id: AccessRecordId,
    pub exit_time: DateTime<Utc>,
    pub notes: Option<String>,
}
