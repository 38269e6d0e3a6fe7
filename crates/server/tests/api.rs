use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use models::db::DatabaseConfig;
use serde_json::{json, Value};
use service::producto::repository::mock::InMemoryProductoRepository;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use server::startup;

fn mock_app() -> Router {
    let state = ServerState::new(Arc::new(InMemoryProductoRepository::default()));
    routes::build_router(state, CorsLayer::very_permissive())
}

fn failing_app() -> Router {
    let state = ServerState::new(Arc::new(InMemoryProductoRepository::failing()));
    routes::build_router(state, CorsLayer::very_permissive())
}

async fn sqlite_app() -> Router {
    let db = startup::prepare_db(&DatabaseConfig::in_memory()).await.expect("in-memory db");
    startup::build_app(db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("request");
    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

async fn create(app: &Router, nombre: &str, precio: f64) -> Value {
    let (status, body) = send(app, "POST", "/api/productos", Some(json!({"nombre": nombre, "precio": precio}))).await;
    assert_eq!(status, StatusCode::CREATED);
    json_of(&body)
}

#[tokio::test]
async fn end_to_end_scenario_on_sqlite() {
    let app = sqlite_app().await;

    let (status, body) = send(&app, "POST", "/api/productos", Some(json!({"nombre": "Widget", "precio": 9.99}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_of(&body), json!({"id": 1, "nombre": "Widget", "precio": 9.99}));

    let (status, body) = send(&app, "PUT", "/api/productos/1", Some(json!({"precio": 12.50}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"id": 1, "nombre": "Widget", "precio": 12.5}));

    let (status, body) = send(&app, "DELETE", "/api/productos/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&app, "GET", "/api/productos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    for app in [mock_app(), sqlite_app().await] {
        let created = create(&app, "Lápiz", 0.5).await;
        let id = created["id"].as_i64().expect("id assigned");

        let (status, body) = send(&app, "GET", &format!("/api/productos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let got = json_of(&body);
        assert_eq!(got["nombre"], "Lápiz");
        assert_eq!(got["precio"], 0.5);
    }
}

#[tokio::test]
async fn list_empty_then_all_records() {
    let app = sqlite_app().await;
    let (status, body) = send(&app, "GET", "/api/productos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([]));

    let a = create(&app, "a", 1.0).await;
    let b = create(&app, "b", 2.0).await;
    let c = create(&app, "c", 3.0).await;
    send(&app, "DELETE", &format!("/api/productos/{}", b["id"]), None).await;

    let (status, body) = send(&app, "GET", "/api/productos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([a, c]));
}

#[tokio::test]
async fn create_rejects_blank_nombre() {
    let app = mock_app();
    for payload in [
        json!({"nombre": "", "precio": 1.0}),
        json!({"nombre": "   ", "precio": 1.0}),
        json!({"nombre": "\u{1}", "precio": 1.0}),
        json!({"nombre": null, "precio": 1.0}),
        json!({"precio": 1.0}),
    ] {
        let (status, body) = send(&app, "POST", "/api/productos", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }
    let (_, body) = send(&app, "GET", "/api/productos", None).await;
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn create_accepts_non_breaking_space_nombre() {
    let app = mock_app();
    let created = create(&app, "\u{a0}", 1.0).await;
    assert_eq!(created["nombre"], "\u{a0}");
}

#[tokio::test]
async fn create_rejects_non_positive_or_missing_precio() {
    let app = sqlite_app().await;
    for payload in [
        json!({"nombre": "Widget", "precio": 0}),
        json!({"nombre": "Widget", "precio": -5}),
        json!({"nombre": "Widget", "precio": null}),
        json!({"nombre": "Widget"}),
    ] {
        let (status, _) = send(&app, "POST", "/api/productos", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
    let (_, body) = send(&app, "GET", "/api/productos", None).await;
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = mock_app();
    let first = create(&app, "first", 1.0).await;
    let (status, body) = send(&app, "POST", "/api/productos", Some(json!({"id": first["id"], "nombre": "second", "precio": 2.0}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(json_of(&body)["id"], first["id"]);

    let (_, body) = send(&app, "GET", &format!("/api/productos/{}", first["id"]), None).await;
    assert_eq!(json_of(&body)["nombre"], "first");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = mock_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/productos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let res = app.clone().oneshot(req).await.expect("response");
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/productos", Some(json!({"nombre": "x", "precio": "cheap"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = mock_app();
    let (status, _) = send(&app, "GET", "/api/productos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let app = sqlite_app().await;
    let (status, body) = send(&app, "GET", "/api/productos/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn ids_beyond_32_bits_are_not_found() {
    for app in [mock_app(), sqlite_app().await] {
        let uri = "/api/productos/3000000000";
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "PUT", uri, Some(json!({"nombre": "x", "precio": 1.0}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn update_nombre_only_keeps_precio() {
    let app = sqlite_app().await;
    let p = create(&app, "Old", 7.25).await;

    let (status, body) = send(&app, "PUT", &format!("/api/productos/{}", p["id"]), Some(json!({"nombre": "New"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"id": p["id"], "nombre": "New", "precio": 7.25}));
}

#[tokio::test]
async fn update_with_invalid_fields_changes_nothing() {
    let app = mock_app();
    let p = create(&app, "Widget", 9.99).await;
    let uri = format!("/api/productos/{}", p["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"precio": -1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), p);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"nombre": "  ", "precio": 0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), p);

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(json_of(&body), p);
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let app = mock_app();
    for payload in [json!({"nombre": "New", "precio": 3.0}), json!({}), json!({"precio": -1})] {
        let (status, body) = send(&app, "PUT", "/api/productos/77", Some(payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn delete_existing_then_unknown() {
    let app = sqlite_app().await;
    let p = create(&app, "Widget", 9.99).await;
    let uri = format!("/api/productos/{}", p["id"]);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn storage_failures_are_internal_errors_without_body() {
    let app = failing_app();
    let cases = [
        ("GET", "/api/productos", None),
        ("GET", "/api/productos/1", None),
        ("POST", "/api/productos", Some(json!({"nombre": "Widget", "precio": 1.0}))),
        ("PUT", "/api/productos/1", Some(json!({"nombre": "Widget"}))),
        ("DELETE", "/api/productos/1", None),
    ];
    for (method, uri, payload) in cases {
        let (status, body) = send(&app, method, uri, payload).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn validation_runs_before_storage() {
    let app = failing_app();
    let (status, _) = send(&app, "POST", "/api/productos", Some(json!({"nombre": "", "precio": 1.0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = mock_app();
    let req = Request::builder()
        .method("GET")
        .uri("/api/productos")
        .header(header::ORIGIN, "http://shop.example.com")
        .body(Body::empty())
        .expect("request");
    let res = app.oneshot(req).await.expect("response");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
        Some("http://shop.example.com")
    );
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = mock_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"status": "ok"}));

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json_of(&body)["paths"]["/api/productos/{id}"].is_object());
}
