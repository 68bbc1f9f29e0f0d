use crate::model::{
    id::StudentId,
    student::{
        event::{CreateStudent, DeleteStudent, UpdateStudent},
        Student,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    // Creates the student together with its STUDENT login.
    async fn create(&self, event: CreateStudent) -> AppResult<Student>;
    async fn find_all(&self) -> AppResult<Vec<Student>>;
    async fn find_by_id(&self, student_id: StudentId) -> AppResult<Option<Student>>;
    async fn update(&self, event: UpdateStudent) -> AppResult<Student>;
    // Marks the student INACTIVE when it has access history, removes it and its login otherwise.
    async fn delete(&self, event: DeleteStudent) -> AppResult<()>;
}
