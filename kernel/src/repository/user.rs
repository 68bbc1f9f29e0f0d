use crate::model::{id::UserId, user::User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    // Creates the ADMIN login unless the username is already taken.
    async fn ensure_admin(&self, username: &str, email: &str, password: &str) -> AppResult<()>;
}
