use garde::Validate;
use kernel::model::{auth::AccessToken, id::StudentId, role::Role, user::User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Admin,
    Student,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Student => Self::Student,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub username: String,
    pub email: String,
    pub role: RoleName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
}

impl AccessTokenResponse {
    pub fn new(access_token: AccessToken, user: User) -> Self {
        let User {
            username,
            email,
            role,
            student_id,
            ..
        } = user;
        Self {
            access_token: access_token.0,
            token_type: "Bearer",
            username,
            email,
            role: role.into(),
            student_id,
        }
    }
}
