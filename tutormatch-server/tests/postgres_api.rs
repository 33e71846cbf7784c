//! End-to-end API tests against a real Postgres.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p tutormatch-server -- --ignored

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use tutormatch_server::http::{build_router, AppState, ServerConfig, ADMIN_EMAIL_HEADER};
use tutormatch_server::{ensure_schema, AdminAllowlist, Storage};

const ADMIN: &str = "admin@example.com";

async fn app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let storage = Storage::connect(&url).await.expect("connect failed");
    ensure_schema(&storage).await.expect("schema failed");

    let state = Arc::new(AppState::new(storage, AdminAllowlist::parse(ADMIN)));
    build_router(state, &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json(method: &str, uri: &str, body: &str, admin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(email) = admin {
        builder = builder.header(ADMIN_EMAIL_HEADER, email);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_tutor_assigns_id_and_timestamps() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/tutors",
            r#"{"name":"Ann","subjects":["Math"],"pay":40,"bio":"x"}"#,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["updated_at"].is_string());
    assert_eq!(body["data"]["pay"], 40.0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unbounded_rating_and_pay_are_stored() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/tutors",
            r#"{"name":"Ann","subjects":["Math"],"pay":150000000.5,"bio":"x","rating":10}"#,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["rating"], 10.0);
    assert_eq!(body["data"]["pay"], 150000000.5);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_tutor_is_404() {
    let app = app().await;
    let uri = format!("/api/admin/tutors/{}", i32::MAX);

    let (status, body) = send(
        &app,
        json(
            "PUT",
            &uri,
            r#"{"name":"Ann","subjects":["Math"],"pay":40,"bio":"x"}"#,
            Some(ADMIN),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
#[ignore = "requires database"]
async fn client_lifecycle_over_http() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/clients",
            r#"{"name":"Zoe","subjects":["Chemistry"],"budget":30}"#,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/admin/clients/{id}");

    let (status, body) = send(
        &app,
        json("PUT", &uri, r#"{"name":"Zoe Q","budget":35}"#, Some(ADMIN)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], "Zoe Q");

    let (status, _) = send(&app, json("DELETE", &uri, "", Some(ADMIN))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, json("DELETE", &uri, "", Some(ADMIN))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
