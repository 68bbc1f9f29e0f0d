use super::parse_column;
use kernel::model::{
    id::{StudentId, UserId},
    user::User,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub student_id: Option<StudentId>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            username,
            email,
            role,
            student_id,
        } = value;
        Ok(User {
            user_id,
            username,
            email,
            role: parse_column("role", &role)?,
            student_id,
        })
    }
}
