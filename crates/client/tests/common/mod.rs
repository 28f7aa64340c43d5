//! In-process mock of the character backend.
//!
//! Serves the five `/characters` endpoints from an in-memory list on an
//! ephemeral port and records every request it sees, so tests can assert on
//! the exact method, path and body the client sent.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// A request as observed by the mock backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// How the mock should misbehave on the next requests.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// Respond with this status and a JSON `detail` body.
    Status(u16),
    /// Respond 200 with a body that is not JSON.
    Garbage,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    records: Vec<Value>,
    requests: Vec<RecordedRequest>,
    failure: Option<Failure>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Store>>,
}

impl MockBackend {
    /// Seed a record the way the backend would store it.
    pub fn seed(&self, record: Value) -> i64 {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let id = store.next_id;
        let mut record = record;
        record["id"] = json!(id);
        store.records.push(record);
        id
    }

    pub fn fail_with(&self, failure: Failure) {
        self.inner.lock().unwrap().failure = Some(failure);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn records(&self) -> Vec<Value> {
        self.inner.lock().unwrap().records.clone()
    }

    /// Bind to `127.0.0.1:0`, serve in the background and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/characters/", get(list).post(create))
            .route("/characters/{id}", get(read).put(update).delete(remove))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Record the request and return the configured failure response, if any.
    fn observe(&self, method: Method, uri: &Uri, body: &Bytes) -> Option<Response> {
        let mut store = self.inner.lock().unwrap();
        store.requests.push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            body: serde_json::from_slice(body).ok(),
        });
        store.failure.map(|failure| match failure {
            Failure::Status(code) => (
                StatusCode::from_u16(code).unwrap(),
                Json(json!({"detail": "boom"})),
            )
                .into_response(),
            Failure::Garbage => (StatusCode::OK, "this is not json").into_response(),
        })
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Character not found"})),
    )
        .into_response()
}

async fn list(State(backend): State<MockBackend>, method: Method, uri: Uri) -> Response {
    if let Some(failure) = backend.observe(method, &uri, &Bytes::new()) {
        return failure;
    }
    Json(Value::Array(backend.records())).into_response()
}

async fn create(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    if let Some(failure) = backend.observe(method, &uri, &body) {
        return failure;
    }
    let mut record: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
    if record.get("status").is_none() {
        record["status"] = json!("Alive");
    }
    let id = backend.seed(record);
    let created = backend
        .records()
        .into_iter()
        .find(|r| r["id"] == json!(id))
        .unwrap();
    Json(created).into_response()
}

async fn read(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(failure) = backend.observe(method, &uri, &Bytes::new()) {
        return failure;
    }
    match backend.records().into_iter().find(|r| r["id"] == json!(id)) {
        Some(record) => Json(record).into_response(),
        None => not_found(),
    }
}

async fn update(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    if let Some(failure) = backend.observe(method, &uri, &body) {
        return failure;
    }
    let changes: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
    let mut store = backend.inner.lock().unwrap();
    let Some(record) = store.records.iter_mut().find(|r| r["id"] == json!(id)) else {
        return not_found();
    };
    if let (Some(target), Some(changes)) = (record.as_object_mut(), changes.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(record.clone()).into_response()
}

async fn remove(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(failure) = backend.observe(method, &uri, &Bytes::new()) {
        return failure;
    }
    let mut store = backend.inner.lock().unwrap();
    let before = store.records.len();
    store.records.retain(|r| r["id"] != json!(id));
    if store.records.len() == before {
        return not_found();
    }
    Json(json!({"message": "Character deleted successfully"})).into_response()
}
