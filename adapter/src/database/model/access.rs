use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{
    access::{AccessRecord, AccessSpace, AccessStudent},
    id::{AccessRecordId, SpaceId, StudentId},
    report::AccessSpan,
};
use shared::error::AppError;

// Columns selected by every access record query.
pub const ACCESS_RECORD_COLUMNS: &str = r#"
    a.access_record_id,
    a.student_id,
    st.name AS student_name,
    st.registration_number,
    a.space_id,
    sp.name AS space_name,
    sp.code AS space_code,
    a.entry_time,
    a.exit_time,
    a.status,
    a.notes,
    a.created_at
"#;

pub const ACCESS_RECORD_JOINS: &str = r#"
    FROM access_records AS a
    INNER JOIN students AS st ON a.student_id = st.student_id
    INNER JOIN spaces AS sp ON a.space_id = sp.space_id
"#;

#[derive(sqlx::FromRow)]
pub struct AccessRecordRow {
    pub access_record_id: AccessRecordId,
    pub student_id: StudentId,
    pub student_name: String,
    pub registration_number: String,
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_code: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AccessRecordRow> for AccessRecord {
    type Error = AppError;

    fn try_from(value: AccessRecordRow) -> Result<Self, Self::Error> {
        let AccessRecordRow {
            access_record_id,
            student_id,
            student_name,
            registration_number,
            space_id,
            space_name,
            space_code,
            entry_time,
            exit_time,
            status,
            notes,
            created_at,
        } = value;
        Ok(AccessRecord {
            access_record_id,
            student: AccessStudent {
                student_id,
                name: student_name,
                registration_number,
            },
            space: AccessSpace {
                space_id,
                name: space_name,
                code: space_code,
            },
            entry_time,
            exit_time,
            status: parse_column("access status", &status)?,
            notes,
            created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct AccessSpanRow {
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
}

impl From<AccessSpanRow> for AccessSpan {
    fn from(value: AccessSpanRow) -> Self {
        let AccessSpanRow {
            entry_time,
            exit_time,
        } = value;
        AccessSpan {
            entry_time,
            exit_time,
        }
    }
}
