use crate::redis::model::{RedisKey, RedisValue};
use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;
use std::str::FromStr;

pub struct AuthorizationKey(String);

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

pub fn from(access_token: &AccessToken) -> AuthorizationKey {
    AuthorizationKey(format!("access-token:{}", access_token.0))
}

impl From<UserId> for AuthorizedUserId {
    fn from(value: UserId) -> Self {
        Self(value)
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.clone()
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_key_is_namespaced() {
        let key = from(&AccessToken("abc123".into()));
        assert_eq!(key.inner(), "access-token:abc123");
    }

    #[test]
    fn user_id_round_trips_through_redis_value() {
        let user_id = UserId::new();
        let stored = AuthorizedUserId::from(user_id).inner();
        let restored = AuthorizedUserId::try_from(stored).unwrap().into_inner();
        assert_eq!(restored, user_id);
    }

    #[test]
    fn garbage_value_is_rejected() {
        assert!(AuthorizedUserId::try_from("not-a-uuid".to_string()).is_err());
    }
}
