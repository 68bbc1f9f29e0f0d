use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{id::StudentId, student::Student};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct StudentRow {
    pub student_id: StudentId,
    pub registration_number: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = AppError;

    fn try_from(value: StudentRow) -> Result<Self, Self::Error> {
        let StudentRow {
            student_id,
            registration_number,
            name,
            email,
            phone_number,
            status,
            created_at,
            updated_at,
        } = value;
        Ok(Student {
            student_id,
            registration_number,
            name,
            email,
            phone_number,
            status: parse_column("student status", &status)?,
            created_at,
            updated_at,
        })
    }
}
