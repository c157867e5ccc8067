//! Local fake of the Hetzner Cloud API shared by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use rescale::api::set_silent;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Recorder {
    pub fn record(&self, path: String, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.calls.lock().unwrap().push(RecordedCall { path, authorization, body });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub async fn change_type_ok(
    State(rec): State<Recorder>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record(format!("/servers/{}/actions/change_type", id), &headers, Some(body));
    (
        StatusCode::CREATED,
        Json(json!({
            "action": {
                "id": 13,
                "command": "change_server_type",
                "status": "running",
                "progress": 0,
                "started": "2016-01-30T23:50:00+00:00",
                "finished": null,
                "resources": [{"id": id, "type": "server"}],
                "error": null
            }
        })),
    )
}

pub async fn change_type_unauthorized(
    State(rec): State<Recorder>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record(format!("/servers/{}/actions/change_type", id), &headers, Some(body));
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"code": "unauthorized", "message": "unable to authenticate"}})),
    )
}

pub async fn get_server(
    State(rec): State<Recorder>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    rec.record(format!("/servers/{}", id), &headers, None);
    if id != 12345 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": "not_found", "message": "server not found"}})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "server": {
                "id": id,
                "name": "web-1",
                "status": "off",
                "server_type": {"id": 22, "name": "cpx11", "cores": 2, "memory": 2.0, "disk": 40}
            }
        })),
    )
}

pub async fn serve(app: Router<Recorder>, rec: Recorder) -> String {
    set_silent(true);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app.with_state(rec);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

/// Fake with both endpoints the binary uses, answering successfully.
pub fn hetzner_ok() -> Router<Recorder> {
    Router::new()
        .route("/v1/servers/:id", get(get_server))
        .route("/v1/servers/:id/actions/change_type", post(change_type_ok))
}

/// Fake whose change-type endpoint rejects the token.
pub fn hetzner_unauthorized() -> Router<Recorder> {
    Router::new()
        .route("/v1/servers/:id", get(get_server))
        .route("/v1/servers/:id/actions/change_type", post(change_type_unauthorized))
}
