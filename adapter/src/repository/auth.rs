use crate::{
    database::{
        model::auth::{from, AuthorizedUserId},
        ConnectionPool,
    },
    redis::RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        auth::{AccessToken, CreateToken},
        id::UserId,
    },
    repository::auth::AuthRepository,
};
use shared::{
    error::{AppError, AppResult},
    observability,
};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[derive(sqlx::FromRow)]
struct UserCredentialRow {
    user_id: UserId,
    password_hash: String,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key = from(access_token);
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(&self, username: &str, password: &str) -> AppResult<UserId> {
        let user_item = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash FROM users
                WHERE username = $1;
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let verified = match user_item {
            Some(item) => bcrypt::verify(password, &item.password_hash)?.then_some(item.user_id),
            None => None,
        };
        match verified {
            Some(user_id) => {
                metrics::counter!(observability::AUTH_LOGIN_SUCCESS_TOTAL).increment(1);
                Ok(user_id)
            }
            None => {
                metrics::counter!(observability::AUTH_LOGIN_FAILURE_TOTAL).increment(1);
                tracing::warn!(%username, "login rejected");
                Err(AppError::UnauthenticatedError)
            }
        }
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let access_token = AccessToken(event.access_token);
        let key = from(&access_token);
        self.kv
            .set_ex(&key, &AuthorizedUserId::from(event.user_id), self.ttl)
            .await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key = from(&access_token);
        self.kv.delete(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::student::StudentRepositoryImpl;
    use kernel::{model::student::event::CreateStudent, repository::student::StudentRepository};
    use shared::config::RedisConfig;

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn verify_user_checks_password(pool: sqlx::PgPool) -> AppResult<()> {
        let db = ConnectionPool::new(pool);
        StudentRepositoryImpl::new(db.clone())
            .create(CreateStudent {
                registration_number: "2024030".into(),
                name: "Hugo Reis".into(),
                email: "hugo@example.edu".into(),
                password: "secret1".into(),
                phone_number: None,
            })
            .await?;
        let kv = Arc::new(RedisClient::new(&RedisConfig {
            host: "localhost".into(),
            port: 6379,
        })?);
        let repo = AuthRepositoryImpl::new(db, kv, 60);

        repo.verify_user("2024030", "secret1").await?;
        assert!(matches!(
            repo.verify_user("2024030", "wrong").await,
            Err(AppError::UnauthenticatedError)
        ));
        assert!(matches!(
            repo.verify_user("nobody", "secret1").await,
            Err(AppError::UnauthenticatedError)
        ));
        Ok(())
    }
}
