use std::sync::Arc;

use adapter::{database::connect_database_with, redis::RedisClient};
use api::route::v1;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use registry::AppRegistry;
use rstest::rstest;
use shared::config::{AppConfig, AuthConfig, DatabaseConfig, MetricsConfig, RedisConfig};
use tower::ServiceExt;

// Nothing here reaches PostgreSQL or Redis: the pool is lazy and every request
// is answered before a connection is needed.
fn app() -> Router {
    let config = AppConfig {
        database: DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            username: "app".into(),
            password: "passwd".into(),
            database: "app".into(),
        },
        redis: RedisConfig {
            host: "localhost".into(),
            port: 6379,
        },
        auth: AuthConfig { ttl: 60 },
        metrics: MetricsConfig { port: None },
        admin: None,
    };
    let pool = connect_database_with(&config.database);
    let redis_client = Arc::new(RedisClient::new(&config.redis).unwrap());
    let registry = AppRegistry::new(pool, redis_client, config);

    Router::new().merge(v1::routes()).with_state(registry)
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_answers_without_token() {
    let res = app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(res).await,
        serde_json::json!({ "success": true, "message": "OK" })
    );
}

#[rstest]
#[case("GET", "/api/access")]
#[case("GET", "/api/access/active")]
#[case("POST", "/api/access/entry")]
#[case("POST", "/api/access/exit")]
#[case("GET", "/api/reports/occupancy")]
#[case("GET", "/api/spaces")]
#[case("POST", "/api/spaces")]
#[case("GET", "/api/students")]
#[case("POST", "/api/auth/logout")]
#[tokio::test]
async fn protected_routes_require_bearer_token(#[case] method: &str, #[case] uri: &str) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn basic_auth_header_is_not_a_token() {
    let req = Request::get("/api/access/active")
        .header("Authorization", "Basic YWRtaW46YWRtaW4=")
        .body(Body::empty())
        .unwrap();
    let res = app().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/api/auth/register", "{", StatusCode::BAD_REQUEST)]
#[case("/api/auth/login", r#"{"username":"2024001"}"#, StatusCode::UNPROCESSABLE_ENTITY)]
#[tokio::test]
async fn malformed_bodies_get_the_error_envelope(
    #[case] uri: &str,
    #[case] body: &'static str,
    #[case] expected: StatusCode,
) {
    let req = Request::post(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();

    assert_eq!(res.status(), expected);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn missing_content_type_gets_the_error_envelope() {
    let req = Request::post("/api/auth/login")
        .body(Body::from(r#"{"username":"a","password":"b"}"#))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(res).await["success"], false);
}
