#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 本地模拟的 Token 接口，行为由 uid 前缀决定：
/// - `ok-*`: 200 `{"token": "tok:<uid>:<password>"}`
/// - `flaky<N>-*`: 前 N 次返回 500，之后同 `ok-*`
/// - `notoken-*`: 200 但没有 token 字段
/// - `html-*`: 200 但响应体不是 JSON
/// - `slow-*`: 等待 2 秒后返回 200
/// - 其他: 500
#[derive(Default)]
pub struct MockState {
    calls: Mutex<HashMap<String, usize>>,
}

impl MockState {
    pub fn calls_for(&self, uid: &str) -> usize {
        self.calls.lock().unwrap().get(uid).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/token", get(token_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}/token", self.addr)
    }
}

fn token_body(uid: &str, password: &str) -> Response {
    Json(serde_json::json!({
        "token": format!("tok:{}:{}", uid, password),
        "uid": uid,
    }))
    .into_response()
}

async fn token_handler(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let uid = params.get("uid").cloned().unwrap_or_default();
    let password = params.get("password").cloned().unwrap_or_default();

    let call = {
        let mut calls = state.calls.lock().unwrap();
        let count = calls.entry(uid.clone()).or_insert(0);
        *count += 1;
        *count
    };

    if uid.starts_with("ok-") {
        return token_body(&uid, &password);
    }
    if let Some(rest) = uid.strip_prefix("flaky") {
        let failures: usize = rest
            .split('-')
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);
        if call <= failures {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        return token_body(&uid, &password);
    }
    if uid.starts_with("notoken-") {
        return Json(serde_json::json!({ "status": "error" })).into_response();
    }
    if uid.starts_with("html-") {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }
    if uid.starts_with("slow-") {
        tokio::time::sleep(Duration::from_secs(2)).await;
        return token_body(&uid, &password);
    }

    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
