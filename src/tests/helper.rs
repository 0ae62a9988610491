use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Builder;
use chrono::DateTime;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Map;
use serde_json::Value;
use tower::Service;

use crate::config::Config;
use crate::create_router;
use crate::storage;

/// Test helper version of Note struct
#[derive(Debug, PartialEq, Eq)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Error response
#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    pub error: String,
    pub description: Option<String>,
}

/// Setup the notes app with an empty storage
pub fn setup_test_app() -> Router {
    setup_test_app_with_config(&Config::default())
}

/// Setup the notes app with an empty storage and custom config
pub fn setup_test_app_with_config(config: &Config) -> Router {
    create_router(config, storage::setup())
}

fn request(method: Method, uri: &str, owner: Option<&str>) -> Builder {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(owner) = owner {
        builder.header("x-user-id", owner)
    } else {
        builder
    }
}

fn json_body(payload: &Map<String, Value>) -> Body {
    Body::from(serde_json::to_vec(payload).unwrap())
}

async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status_code, body)
}

pub async fn health(app: &mut Router) -> (StatusCode, Value) {
    let request = request(Method::GET, "/", None).body(Body::empty()).unwrap();

    let (status_code, body) = send(app, request).await;

    (status_code, serde_json::from_slice(&body[..]).unwrap())
}

pub async fn raw(
    app: &mut Router,
    method: Method,
    uri: &str,
    owner: Option<&str>,
) -> (StatusCode, Bytes) {
    let request = request(method, uri, owner).body(Body::empty()).unwrap();

    send(app, request).await
}

pub async fn maybe_create_note(
    app: &mut Router,
    owner: Option<&str>,
    title: &str,
    content: &str,
) -> (StatusCode, Option<Note>, Option<Error>) {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    payload.insert("content".to_string(), Value::String(content.to_string()));

    let request = request(Method::POST, "/notes", owner)
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(json_body(&payload))
        .unwrap();

    let (status_code, body) = send(app, request).await;

    (
        status_code,
        if status_code == StatusCode::CREATED {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code.is_client_error() {
            Some(get_error(&body))
        } else {
            None
        },
    )
}

pub async fn create_note(app: &mut Router, owner: Option<&str>, title: &str, content: &str) -> Note {
    let (status_code, note, _) = maybe_create_note(app, owner, title, content).await;
    assert_eq!(StatusCode::CREATED, status_code);

    note.unwrap()
}

pub async fn maybe_create_note_with_raw_body(
    app: &mut Router,
    owner: Option<&str>,
    body: &'static str,
    include_content_type: bool,
) -> (StatusCode, Option<Note>, Option<Error>) {
    let mut builder = request(Method::POST, "/notes", owner);

    if include_content_type {
        builder = builder.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    }

    let request = builder.body(Body::from(body.as_bytes())).unwrap();

    let (status_code, body) = send(app, request).await;

    (
        status_code,
        if status_code == StatusCode::CREATED {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code.is_client_error() {
            Some(get_error(&body))
        } else {
            None
        },
    )
}

pub async fn list_notes(app: &mut Router, owner: Option<&str>) -> (StatusCode, Option<Vec<Note>>) {
    let request = request(Method::GET, "/notes", owner)
        .body(Body::empty())
        .unwrap();

    let (status_code, body) = send(app, request).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_notes(&body))
        } else {
            None
        },
    )
}

pub async fn list_notes_with_raw_owner(
    app: &mut Router,
    owner: &[u8],
) -> (StatusCode, Option<Vec<Note>>) {
    let request = request(Method::GET, "/notes", None)
        .header("x-user-id", HeaderValue::from_bytes(owner).unwrap())
        .body(Body::empty())
        .unwrap();

    let (status_code, body) = send(app, request).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_notes(&body))
        } else {
            None
        },
    )
}

pub async fn single_note(
    app: &mut Router,
    owner: Option<&str>,
    id: &str,
) -> (StatusCode, Option<Note>, Option<Error>) {
    let request = request(Method::GET, &format!("/notes/{id}"), owner)
        .body(Body::empty())
        .unwrap();

    let (status_code, body) = send(app, request).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code.is_client_error() {
            Some(get_error(&body))
        } else {
            None
        },
    )
}

pub async fn maybe_update_note(
    app: &mut Router,
    method: Method,
    owner: Option<&str>,
    id: u64,
    payload: &Map<String, Value>,
) -> (StatusCode, Option<Note>, Option<Error>) {
    let request = request(method, &format!("/notes/{id}"), owner)
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(json_body(payload))
        .unwrap();

    let (status_code, body) = send(app, request).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code.is_client_error() {
            Some(get_error(&body))
        } else {
            None
        },
    )
}

pub async fn maybe_delete_note(
    app: &mut Router,
    owner: Option<&str>,
    id: u64,
) -> (StatusCode, Bytes, Option<Error>) {
    let request = request(Method::DELETE, &format!("/notes/{id}"), owner)
        .body(Body::empty())
        .unwrap();

    let (status_code, body) = send(app, request).await;

    let error = if status_code.is_client_error() {
        Some(get_error(&body))
    } else {
        None
    };

    (status_code, body, error)
}

/// Build an update payload, `None` values are left out
pub fn update_payload(title: Option<&str>, content: Option<&str>) -> Map<String, Value> {
    let mut payload = Map::new();

    if let Some(title) = title {
        payload.insert("title".to_string(), Value::String(title.to_string()));
    }

    if let Some(content) = content {
        payload.insert("content".to_string(), Value::String(content.to_string()));
    }

    payload
}

fn value_to_timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse::<DateTime<Utc>>().unwrap()
}

fn value_to_note(note: &Map<String, Value>) -> Note {
    Note {
        id: note["id"].as_u64().unwrap(),
        title: note["title"].as_str().map(ToString::to_string).unwrap(),
        content: note["content"].as_str().map(ToString::to_string).unwrap(),
        owner_id: note["owner_id"].as_str().map(ToString::to_string).unwrap(),
        created_at: value_to_timestamp(&note["created_at"]),
        updated_at: value_to_timestamp(&note["updated_at"]),
    }
}

fn get_note(body: &Bytes) -> Note {
    serde_json::from_slice::<Value>(&body[..])
        .unwrap()
        .as_object()
        .map(value_to_note)
        .unwrap()
}

fn get_notes(body: &Bytes) -> Vec<Note> {
    serde_json::from_slice::<Value>(&body[..])
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_object().unwrap())
        .map(value_to_note)
        .collect()
}

fn value_to_error(error: &Map<String, Value>) -> Error {
    Error {
        error: error["error"].as_str().map(ToString::to_string).unwrap(),
        description: error
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    }
}

fn get_error(body: &Bytes) -> Error {
    serde_json::from_slice::<Value>(&body[..])
        .unwrap()
        .as_object()
        .map(value_to_error)
        .unwrap()
}
