use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    access::{
        event::{RegisterEntry, RegisterExit},
        AccessRecord, AccessStatus,
    },
    id::{AccessRecordId, SpaceId, StudentId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    #[garde(skip)]
    pub student_id: StudentId,
    #[garde(skip)]
    pub space_id: SpaceId,
    #[garde(length(max = 500))]
    pub notes: Option<String>,
}

impl From<EntryRequest> for RegisterEntry {
    fn from(value: EntryRequest) -> Self {
        let EntryRequest {
            student_id,
            space_id,
            notes,
        } = value;
        RegisterEntry::new(student_id, space_id, notes)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExitRequest {
    #[garde(skip)]
    pub access_record_id: AccessRecordId,
    #[garde(length(max = 500))]
    pub notes: Option<String>,
}

impl From<ExitRequest> for RegisterExit {
    fn from(value: ExitRequest) -> Self {
        RegisterExit::new(value.access_record_id, value.notes)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessStatusName {
    Active,
    Completed,
}

impl From<AccessStatus> for AccessStatusName {
    fn from(value: AccessStatus) -> Self {
        match value {
            AccessStatus::Active => Self::Active,
            AccessStatus::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecordResponse {
    pub id: AccessRecordId,
    pub student_id: StudentId,
    pub student_name: String,
    pub student_registration_number: String,
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_code: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub duration_in_minutes: Option<i64>,
    pub status: AccessStatusName,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AccessRecord> for AccessRecordResponse {
    fn from(value: AccessRecord) -> Self {
        let duration_in_minutes = value.duration_in_minutes();
        let AccessRecord {
            access_record_id,
            student,
            space,
            entry_time,
            exit_time,
            status,
            notes,
            created_at,
        } = value;
        Self {
            id: access_record_id,
            student_id: student.student_id,
            student_name: student.name,
            student_registration_number: student.registration_number,
            space_id: space.space_id,
            space_name: space.name,
            space_code: space.code,
            entry_time,
            exit_time,
            duration_in_minutes,
            status: status.into(),
            notes,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use kernel::model::access::{AccessSpace, AccessStudent};
    use serde_json::json;

    #[test]
    fn entry_request_accepts_camel_case_body() {
        let student_id = StudentId::new();
        let space_id = SpaceId::new();
        let req: EntryRequest = serde_json::from_value(json!({
            "studentId": student_id,
            "spaceId": space_id,
        }))
        .unwrap();
        assert!(req.validate(&()).is_ok());

        let event = RegisterEntry::from(req);
        assert_eq!(event.student_id, student_id);
        assert_eq!(event.space_id, space_id);
        assert!(event.notes.is_none());
    }

    #[test]
    fn overlong_notes_are_rejected() {
        let req = ExitRequest {
            access_record_id: AccessRecordId::new(),
            notes: Some("x".repeat(501)),
        };
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn completed_record_reports_duration() {
        let entry_time = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let record = AccessRecord {
            access_record_id: AccessRecordId::new(),
            student: AccessStudent {
                student_id: StudentId::new(),
                name: "Ana Souza".into(),
                registration_number: "2024001".into(),
            },
            space: AccessSpace {
                space_id: SpaceId::new(),
                name: "Chemistry Lab".into(),
                code: "LAB-1".into(),
            },
            entry_time,
            exit_time: Some(entry_time + Duration::minutes(90)),
            status: AccessStatus::Completed,
            notes: None,
            created_at: entry_time,
        };

        let body = serde_json::to_value(AccessRecordResponse::from(record)).unwrap();
        assert_eq!(body["durationInMinutes"], 90);
        assert_eq!(body["status"], "COMPLETED");
        assert_eq!(body["spaceCode"], "LAB-1");
        assert_eq!(body["studentRegistrationNumber"], "2024001");
    }
}
