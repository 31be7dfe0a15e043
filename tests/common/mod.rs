//! Shared fixtures: a stub GitHub and the callback service pointed at it.

#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use github_oauth_callback::{build_router, models::AppConfig, models::AppState};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

#[derive(Clone)]
pub enum ReplyBody {
    Json(Value),
    Html(&'static str),
}

/// Canned reply for one stub endpoint.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: ReplyBody::Json(body),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: ReplyBody::Json(json!({ "message": "Bad credentials" })),
        }
    }

    /// A 200 whose body is not JSON, like a proxy or login page.
    pub fn html(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            body: ReplyBody::Html(body),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            ReplyBody::Json(body) => (self.status, Json(body)).into_response(),
            ReplyBody::Html(body) => (self.status, Html(body)).into_response(),
        }
    }
}

/// What the stub saw.
#[derive(Default)]
pub struct Recorded {
    pub token_forms: Vec<HashMap<String, String>>,
    pub token_accept: Vec<String>,
    pub user_authorization: Vec<String>,
    pub user_accept: Vec<String>,
    pub user_agents: Vec<String>,
}

#[derive(Clone)]
struct StubState {
    token: Reply,
    user: Reply,
    recorded: Arc<Mutex<Recorded>>,
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn stub_token(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    {
        let mut recorded = stub.recorded.lock().unwrap();
        recorded.token_forms.push(form);
        recorded.token_accept.push(header_value(&headers, header::ACCEPT));
        recorded
            .user_agents
            .push(header_value(&headers, header::USER_AGENT));
    }
    stub.token
}

async fn stub_user(State(stub): State<StubState>, headers: HeaderMap) -> impl IntoResponse {
    {
        let mut recorded = stub.recorded.lock().unwrap();
        recorded
            .user_authorization
            .push(header_value(&headers, header::AUTHORIZATION));
        recorded.user_accept.push(header_value(&headers, header::ACCEPT));
        recorded
            .user_agents
            .push(header_value(&headers, header::USER_AGENT));
    }
    stub.user
}

/// Stub GitHub on an ephemeral port.
pub struct StubGitHub {
    pub base_url: String,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl StubGitHub {
    pub async fn start(token: Reply, user: Reply) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = StubState {
            token,
            user,
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/login/oauth/access_token", post(stub_token))
            .route("/user", get(stub_user))
            .with_state(state);

        let base_url = spawn(app).await;
        Self { base_url, recorded }
    }

    pub fn token_url(&self) -> String {
        format!("{}/login/oauth/access_token", self.base_url)
    }

    pub fn user_url(&self) -> String {
        format!("{}/user", self.base_url)
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/login/oauth/authorize", self.base_url)
    }

    pub fn token_calls(&self) -> usize {
        self.recorded.lock().unwrap().token_forms.len()
    }

    pub fn user_calls(&self) -> usize {
        self.recorded.lock().unwrap().user_authorization.len()
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A URL nothing is listening on.
pub async fn dead_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{path}")
}

/// Config pointing at the stub, with optional overrides.
pub fn config_for(stub: &StubGitHub, overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("GITHUB_CLIENT_ID".to_string(), CLIENT_ID.to_string()),
        ("GITHUB_CLIENT_SECRET".to_string(), CLIENT_SECRET.to_string()),
        ("GITHUB_TOKEN_URL".to_string(), stub.token_url()),
        ("GITHUB_USER_URL".to_string(), stub.user_url()),
        ("GITHUB_AUTHORIZE_URL".to_string(), stub.authorize_url()),
    ]);
    for (name, value) in overrides {
        vars.insert(name.to_string(), value.to_string());
    }
    AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

/// The callback service on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start(config: AppConfig) -> Self {
        let state = AppState::new(config).unwrap();
        let base_url = spawn(build_router(state)).await;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();
        Self { base_url, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path; returns the status and the JSON body.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        let body = response.json().await.unwrap();
        (status, body)
    }
}
