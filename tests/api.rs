use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use todos::{rest, storage::SqliteStorage};
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    storage: SqliteStorage,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("todos.sqlite"));
        storage.init().unwrap();
        Self { _dir: dir, storage }
    }

    fn router(&self) -> Router {
        rest::router(self.storage.clone())
    }

    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = TestApp::new();

    let (status, body) = app
        .request("POST", "/api/todo/create", Some(json!({"title": "Buy milk"})))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "title": "Buy milk", "completed": false}));
}

#[tokio::test]
async fn create_then_get_round_trips_all_fields() {
    let app = TestApp::new();
    let payload = json!({
        "title": "Write report",
        "description": "quarterly numbers",
        "priority": 2,
        "completed": true
    });

    let (status, created) = app
        .request("POST", "/api/todo/create", Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app.request("GET", &format!("/api/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = payload;
    expected["id"] = json!(id);
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn create_then_get_preserves_title_padding() {
    let app = TestApp::new();

    let (status, created) = app
        .request("POST", "/api/todo/create", Some(json!({"title": "  Buy milk "})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "  Buy milk ");

    let (status, fetched) = app.request("GET", "/api/todo/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({"id": 1, "title": "  Buy milk ", "completed": false}));
}

#[tokio::test]
async fn get_unknown_id_returns_404_with_error_body() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/api/todo/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "todo 999 not found");
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/api/todo/create",
        Some(json!({"title": "Buy milk", "priority": 3})),
    )
    .await;

    let (status, body) = app
        .request("PUT", "/api/todo/update/1", Some(json!({"title": "Buy bread"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "title": "Buy bread", "completed": false}));

    let (_, fetched) = app.request("GET", "/api/todo/1", None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let app = TestApp::new();
    app.request("POST", "/api/todo/create", Some(json!({"title": "Buy milk"})))
        .await;

    let (status, body) = app.request("DELETE", "/api/todo/delete/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.request("GET", "/api/todo/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_ids_are_404_for_every_operation() {
    let app = TestApp::new();

    let (status, _) = app
        .request("PUT", "/api/todo/update/7", Some(json!({"title": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("DELETE", "/api/todo/delete/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_empty_or_missing_title_is_rejected() {
    let app = TestApp::new();

    for payload in [json!({"title": ""}), json!({"completed": true}), json!({"title": 5})] {
        let (status, body) = app
            .request("POST", "/api/todo/create", Some(payload.clone()))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
        assert_eq!(body["error"], "validation_error");
    }

    let (_, todos) = app.request("GET", "/api/todos", None).await;
    assert_eq!(todos, json!([]));
}

#[tokio::test]
async fn list_returns_items_in_id_order() {
    let app = TestApp::new();
    for title in ["first", "second", "third"] {
        app.request("POST", "/api/todo/create", Some(json!({"title": title})))
            .await;
    }
    app.request("DELETE", "/api/todo/delete/2", None).await;

    let (status, todos) = app.request("GET", "/api/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        todos,
        json!([
            {"id": 1, "title": "first", "completed": false},
            {"id": 3, "title": "third", "completed": false}
        ])
    );
}

#[tokio::test]
async fn state_persists_across_router_instances() {
    let app = TestApp::new();
    app.request("POST", "/api/todo/create", Some(json!({"title": "Buy milk"})))
        .await;

    let reopened = SqliteStorage::new(&app.storage.path);
    let response = rest::router(reopened)
        .oneshot(
            Request::builder()
                .uri("/api/todo/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
