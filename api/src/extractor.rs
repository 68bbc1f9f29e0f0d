use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// `Json` whose rejection is answered with the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` whose rejection is answered with the error envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let access_token = bearer_token(parts).ok_or(AppError::UnauthorizedError)?;

        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;
        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self { access_token, user })
    }
}

fn bearer_token(parts: &Parts) -> Option<AccessToken> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| AccessToken(t.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use rstest::rstest;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/access/active");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[rstest]
    #[case(Some("Bearer 3f2a9c"), Some("3f2a9c"))]
    #[case(Some("Bearer   3f2a9c  "), Some("3f2a9c"))]
    #[case(Some("Basic dXNlcjpwYXNz"), None)]
    #[case(Some("Bearer "), None)]
    #[case(None, None)]
    fn reads_bearer_token(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let token = bearer_token(&parts_with(header)).map(|t| t.0);
        assert_eq!(token.as_deref(), expected);
    }

    #[tokio::test]
    async fn malformed_path_id_gets_the_error_envelope() {
        use axum::{body::Body, http::StatusCode, routing::get, Router};
        use kernel::model::id::SpaceId;
        use tower::ServiceExt;

        let app = Router::new().route(
            "/spaces/:space_id",
            get(|AppPath(space_id): AppPath<SpaceId>| async move { space_id.to_string() }),
        );
        let res = app
            .oneshot(Request::get("/spaces/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
    }
}
