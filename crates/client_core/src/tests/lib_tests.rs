use super::*;
use shared::domain::User;
use axum::{
    extract::{Path, State},
    http::StatusCode as AxumStatus,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
struct RecordedRequest {
    method: &'static str,
    path: String,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ServerState {
    async fn record(&self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.lock().await.push(RecordedRequest { method, path, body });
    }
}

async fn list_users(State(state): State<ServerState>) -> Json<Value> {
    state.record("GET", "/api/users".into(), None).await;
    Json(json!({
        "success": true,
        "data": [
            {"id": 1, "fullname": "Ana Ruiz", "email": "ana@x.com", "phone": "555-1111"},
            {"id": "b2", "fullname": "Luis Gil", "email": "luis@x.com", "phone": "555-2222"}
        ]
    }))
}

async fn create_user(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (AxumStatus, Json<Value>) {
    state.record("POST", "/api/users".into(), Some(body.clone())).await;
    if body["email"] == "taken@x.com" {
        return (
            AxumStatus::CONFLICT,
            Json(json!({"success": false, "message": "duplicate email"})),
        );
    }
    let mut created = body;
    created["id"] = json!(42);
    (
        AxumStatus::CREATED,
        Json(json!({"success": true, "data": created})),
    )
}

async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> (AxumStatus, Json<Value>) {
    state.record("GET", format!("/api/users/{id}"), None).await;
    if id == "404" {
        return (AxumStatus::NOT_FOUND, Json(json!({"success": false})));
    }
    (
        AxumStatus::OK,
        Json(json!({
            "success": true,
            "data": {"id": 7, "fullname": "Old", "email": "o@x.com", "phone": "1"}
        })),
    )
}

async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state
        .record("PUT", format!("/api/users/{id}"), Some(body.clone()))
        .await;
    // Soft failure: 200 with success:false is passed through untouched.
    if body["fullname"] == "reject" {
        return Json(json!({"success": false, "message": "fullname rejected"}));
    }
    let mut updated = body;
    updated["id"] = json!(id.parse::<i64>().unwrap_or_default());
    Json(json!({"success": true, "data": updated}))
}

async fn delete_user(State(state): State<ServerState>, Path(id): Path<String>) -> Json<Value> {
    state.record("DELETE", format!("/api/users/{id}"), None).await;
    Json(json!({"success": true}))
}

async fn spawn_user_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/api/broken/users",
            get(|| async { (AxumStatus::BAD_GATEWAY, "upstream exploded") }),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api"), state)
}

#[tokio::test]
async fn list_users_returns_envelope_in_server_order() {
    let (base_url, state) = spawn_user_server().await;
    let client = UserApiClient::new(&base_url).expect("client");

    let result = client.list_users().await.expect("list");
    assert!(result.success);
    let users = result.data.expect("data");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, UserId::Int(1));
    assert_eq!(users[1].id, UserId::Text("b2".into()));

    let requests = state.requests.lock().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/users");
}

#[tokio::test]
async fn create_user_posts_all_three_fields() {
    let (base_url, state) = spawn_user_server().await;
    let client = UserApiClient::new(&format!("{base_url}/")).expect("client");

    let fields = UserFields::new("Ana Ruiz", "ana@x.com", "555-1111");
    let created = client.create_user(&fields).await.expect("create");
    let user: User = created
        .data_as()
        .expect("created payload")
        .expect("payload is a user");
    assert_eq!(user.id, UserId::Int(42));
    assert_eq!(user.fullname, "Ana Ruiz");

    let requests = state.requests.lock().await;
    assert_eq!(
        requests[0].body,
        Some(json!({"fullname": "Ana Ruiz", "email": "ana@x.com", "phone": "555-1111"}))
    );
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let (base_url, _state) = spawn_user_server().await;
    let client = UserApiClient::new(&base_url).expect("client");

    let err = client
        .create_user(&UserFields::new("Ana", "taken@x.com", "1"))
        .await
        .expect_err("conflict");
    assert_eq!(err.to_string(), "duplicate email");
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn error_status_without_message_uses_status_text() {
    let (base_url, _state) = spawn_user_server().await;
    let client = UserApiClient::new(&base_url).expect("client");

    let err = client
        .get_user(&UserId::Int(404))
        .await
        .expect_err("not found");
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let (base_url, _state) = spawn_user_server().await;
    let client = UserApiClient::new(&base_url.replace("/api", "/api/broken")).expect("client");

    let err = client.list_users().await.expect_err("not json");
    assert!(matches!(err, RequestError::Decode(_)), "unexpected: {err:?}");
}

#[tokio::test]
async fn update_soft_failure_is_returned_not_raised() {
    let (base_url, state) = spawn_user_server().await;
    let client = UserApiClient::new(&base_url).expect("client");

    let result = client
        .update_user(&UserId::Int(7), &UserFields::new("reject", "o@x.com", "1"))
        .await
        .expect("envelope");
    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("fullname rejected"));

    let requests = state.requests.lock().await;
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/api/users/7");
}

#[tokio::test]
async fn delete_addresses_the_echoed_id() {
    let (base_url, state) = spawn_user_server().await;
    let client = UserApiClient::new(&base_url).expect("client");

    let result = client
        .delete_user(&UserId::Text("b2".into()))
        .await
        .expect("delete");
    assert!(result.success);
    assert!(result.data.is_none());

    let requests = state.requests.lock().await;
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/users/b2");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = UserApiClient::new(&format!("http://{addr}/api")).expect("client");
    let err = client.list_users().await.expect_err("refused");
    assert!(matches!(err, RequestError::Transport(_)), "unexpected: {err:?}");
}

#[test]
fn decode_envelope_ignores_shape_beyond_envelope() {
    let result: UserListResult =
        decode_envelope(StatusCode::OK, br#"{"success":true,"data":[],"extra":1}"#)
            .expect("decode");
    assert_eq!(result.data, Some(Vec::new()));
}

#[test]
fn decode_envelope_rejects_non_json_error_body() {
    let err = decode_envelope::<Value>(StatusCode::INTERNAL_SERVER_ERROR, b"<html>")
        .expect_err("html");
    assert!(matches!(err, RequestError::Decode(_)));
}

#[test]
fn client_trims_trailing_slash() {
    let client = UserApiClient::new("http://localhost:8080/api/").expect("client");
    assert_eq!(client.base_url(), "http://localhost:8080/api");
    assert_eq!(
        client.user_url(&UserId::Int(3)).as_str(),
        "http://localhost:8080/api/users/3"
    );
    assert_eq!(
        client.users_url().as_str(),
        "http://localhost:8080/api/users"
    );
}

#[test]
fn text_ids_are_percent_encoded_as_one_segment() {
    let client = UserApiClient::new("http://localhost:8080/api").expect("client");
    assert_eq!(
        client.user_url(&UserId::Text("a/b".into())).as_str(),
        "http://localhost:8080/api/users/a%2Fb"
    );
    assert_eq!(
        client.user_url(&UserId::Text("007".into())).as_str(),
        "http://localhost:8080/api/users/007"
    );
}

#[test]
fn unusable_base_url_is_rejected() {
    assert!(matches!(
        UserApiClient::new("not a url"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        UserApiClient::new("mailto:ops@x.com"),
        Err(ConfigError::CannotBeABase { .. })
    ));
}

#[test]
fn decode_envelope_keeps_partial_mutation_payload() {
    let result: MutationResult = decode_envelope(
        StatusCode::CREATED,
        br#"{"success":true,"data":{"id":5,"fullname":"Ana","email":"a@x"}}"#,
    )
    .expect("partial user still decodes");
    assert!(result.success);
    assert_eq!(result.data.expect("data")["id"], json!(5));
}

#[test]
fn decode_envelope_accepts_float_ids_in_list() {
    let result: UserListResult = decode_envelope(
        StatusCode::OK,
        br#"{"success":true,"data":[{"id":1.5,"fullname":"A","email":"a@x","phone":"1"}]}"#,
    )
    .expect("float id");
    assert_eq!(result.data.expect("data")[0].id.to_string(), "1.5");
}
