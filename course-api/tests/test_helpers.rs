/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Shared test helpers for course-api integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{self, HeaderMap, StatusCode, Uri};
use axum::response::Response;
use axum::{Json, Router};
use course_api::{config::Config, routes, state::AppState};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const TEST_BRJ_KEY: &str = "test-brj-key";
pub const TEST_GOOGLE_KEY: &str = "test-google-key";

/// A request as seen by a fake upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: http::Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

type Responder = dyn Fn(usize) -> (StatusCode, Value) + Send + Sync;

/// Scriptable stand-in for Google Calendar or BRJ.
///
/// The responder receives the 0-based index of the request.
#[derive(Clone)]
pub struct FakeUpstream {
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
    delay: Duration,
}

impl FakeUpstream {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
            delay: Duration::ZERO,
        }
    }

    /// Always answer with the same status and body.
    pub fn fixed(status: StatusCode, body: Value) -> Self {
        Self::new(move |_| (status, body.clone()))
    }

    /// Sleep before answering every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and return the base URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new().fallback(fake_handler).with_state(self.clone());
        spawn_router(router).await
    }
}

async fn fake_handler(
    State(fake): State<FakeUpstream>,
    method: http::Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let index = fake.hits.fetch_add(1, Ordering::SeqCst);
    fake.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body: serde_json::from_slice(&body).ok(),
    });
    if !fake.delay.is_zero() {
        tokio::time::sleep(fake.delay).await;
    }
    let (status, value) = (fake.responder)(index);
    (status, Json(value))
}

/// Serve `router` on `127.0.0.1:0` in the background.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

/// Build a configuration pointing at the given fake upstreams.
///
/// Retries are fast (1 ms base delay) and `overrides` win over the defaults.
pub fn test_config(
    calendar_url: Option<&str>,
    brj_url: Option<&str>,
    overrides: &[(&str, &str)],
) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("UPSTREAM_TIMEOUT_MS".into(), "2000".into());
    vars.insert("UPSTREAM_MAX_ATTEMPTS".into(), "3".into());
    vars.insert("UPSTREAM_BASE_DELAY_MS".into(), "1".into());
    vars.insert("UPSTREAM_MAX_DELAY_MS".into(), "5".into());
    if let Some(url) = calendar_url {
        vars.insert("GOOGLE_CALENDAR_API_URL".into(), url.into());
        vars.insert("GOOGLE_CALENDAR_ID".into(), "course@group.calendar.google.com".into());
        vars.insert("GOOGLE_API_KEY".into(), TEST_GOOGLE_KEY.into());
    }
    if let Some(url) = brj_url {
        vars.insert("BRJ_API_URL".into(), url.into());
        vars.insert("BRJ_API_KEY".into(), TEST_BRJ_KEY.into());
        vars.insert("BRJ_PRODUCT_ID".into(), "video-course-2099".into());
    }
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Build the Axum router, ready for `tower::ServiceExt::oneshot`.
pub fn build_app(config: &Config) -> Router {
    let state = AppState::new(config).expect("test state");
    routes::router().with_state(state)
}

pub fn get(uri: &str) -> http::Request<axum::body::Body> {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> http::Request<axum::body::Body> {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("deserialize response body")
}

/// Google Calendar `events.list` page with two course dates far in the future
/// and one cancelled entry.
pub fn google_events_page() -> Value {
    serde_json::json!({
        "kind": "calendar#events",
        "items": [
            {
                "id": "evt-april",
                "status": "confirmed",
                "summary": "Víkendový kurz",
                "location": "Praha",
                "start": { "date": "2099-04-10" },
                "end": { "date": "2099-04-12" }
            },
            {
                "id": "evt-march",
                "status": "confirmed",
                "start": { "dateTime": "2099-03-05T09:00:00+01:00", "timeZone": "Europe/Prague" },
                "end": { "dateTime": "2099-03-05T17:00:00+01:00", "timeZone": "Europe/Prague" }
            },
            {
                "id": "evt-cancelled",
                "status": "cancelled",
                "start": { "date": "2099-05-01" },
                "end": { "date": "2099-05-02" }
            },
            {
                "id": "evt-march-late",
                "summary": "Druhý termín",
                "start": { "date": "2099-03-20" },
                "end": { "date": "2099-03-21" }
            }
        ]
    })
}

/// A lead form that passes validation.
pub fn valid_lead() -> Value {
    serde_json::json!({
        "name": "Jana Nováková",
        "email": "Jana@Example.com",
        "phone": "777 123 456",
        "consent": true,
        "preferred_month": "2099-03",
        "note": "Mám vlastní kameru."
    })
}
