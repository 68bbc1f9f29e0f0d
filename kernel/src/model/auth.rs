use crate::model::id::UserId;

pub struct AccessToken(pub String);

impl AccessToken {
    pub fn issue() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

pub struct CreateToken {
    pub user_id: UserId,
    pub access_token: String,
}

impl CreateToken {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            access_token: AccessToken::issue().0,
        }
    }
}
