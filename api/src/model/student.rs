use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::StudentId,
    student::{
        event::{CreateStudent, UpdateStudent},
        Student, StudentStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatusName {
    Active,
    Inactive,
}

impl From<StudentStatus> for StudentStatusName {
    fn from(value: StudentStatus) -> Self {
        match value {
            StudentStatus::Active => Self::Active,
            StudentStatus::Inactive => Self::Inactive,
        }
    }
}

impl From<StudentStatusName> for StudentStatus {
    fn from(value: StudentStatusName) -> Self {
        match value {
            StudentStatusName::Active => Self::Active,
            StudentStatusName::Inactive => Self::Inactive,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentRequest {
    #[garde(length(min = 1, max = 20))]
    pub registration_number: String,
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(email, length(max = 100))]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(length(max = 20))]
    pub phone_number: Option<String>,
}

impl From<RegisterStudentRequest> for CreateStudent {
    fn from(value: RegisterStudentRequest) -> Self {
        let RegisterStudentRequest {
            registration_number,
            name,
            email,
            password,
            phone_number,
        } = value;
        CreateStudent {
            registration_number,
            name,
            email,
            password,
            phone_number,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(email, length(max = 100))]
    pub email: String,
    #[garde(length(max = 20))]
    pub phone_number: Option<String>,
    #[garde(skip)]
    pub status: Option<StudentStatusName>,
}

#[derive(new)]
pub struct UpdateStudentRequestWithId(StudentId, UpdateStudentRequest);

impl From<UpdateStudentRequestWithId> for UpdateStudent {
    fn from(value: UpdateStudentRequestWithId) -> Self {
        let UpdateStudentRequestWithId(
            student_id,
            UpdateStudentRequest {
                name,
                email,
                phone_number,
                status,
            },
        ) = value;
        UpdateStudent {
            student_id,
            name,
            email,
            phone_number,
            status: status.map(StudentStatus::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: StudentId,
    pub registration_number: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: StudentStatusName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(value: Student) -> Self {
        let Student {
            student_id,
            registration_number,
            name,
            email,
            phone_number,
            status,
            created_at,
            updated_at,
        } = value;
        Self {
            id: student_id,
            registration_number,
            name,
            email,
            phone_number,
            status: status.into(),
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ana@example.edu", "secret1", true)]
    #[case("not-an-email", "secret1", false)]
    #[case("ana@example.edu", "short", false)]
    fn validates_registration(#[case] email: &str, #[case] password: &str, #[case] ok: bool) {
        let req = RegisterStudentRequest {
            registration_number: "2024001".into(),
            name: "Ana Souza".into(),
            email: email.into(),
            password: password.into(),
            phone_number: None,
        };
        assert_eq!(req.validate(&()).is_ok(), ok);
    }

    #[test]
    fn update_maps_status() {
        let student_id = StudentId::new();
        let req = UpdateStudentRequest {
            name: "Ana Souza".into(),
            email: "ana@example.edu".into(),
            phone_number: None,
            status: Some(StudentStatusName::Inactive),
        };
        let event = UpdateStudent::from(UpdateStudentRequestWithId::new(student_id, req));
        assert_eq!(event.student_id, student_id);
        assert_eq!(event.status, Some(StudentStatus::Inactive));
    }
}
