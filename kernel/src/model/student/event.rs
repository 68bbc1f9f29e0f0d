use crate::model::{id::StudentId, student::StudentStatus};

pub struct CreateStudent {
    pub registration_number: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
}

#[derive(Debug)]
pub struct UpdateStudent {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug)]
pub struct DeleteStudent {
    pub student_id: StudentId,
}
