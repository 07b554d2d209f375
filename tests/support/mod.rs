//! Purpose: Loopback HTTP mock of the Bento API for integration tests.
//! Exports: `MockServer`, `RecordedRequest`, `refused_base_url`.
//! Role: Record every inbound request and answer with one canned response.
//! Invariants: Binds 127.0.0.1 on an ephemeral port; signals shutdown on drop.
#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use tokio::sync::oneshot;

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_count(&self, name: &str) -> usize {
        self.query.iter().filter(|(key, _)| key == name).count()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body json")
    }
}

struct MockState {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockServer {
    base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    /// Replies `200 OK` with `body` as `application/json`.
    pub fn json(body: serde_json::Value) -> TestResult<Self> {
        Self::start(StatusCode::OK, "application/json", body.to_string())
    }

    pub fn status(status: u16, body: &str) -> TestResult<Self> {
        Self::start(StatusCode::from_u16(status)?, "application/json", body.to_string())
    }

    pub fn text(body: &str) -> TestResult<Self> {
        Self::start(StatusCode::OK, "text/html", body.to_string())
    }

    fn start(status: StatusCode, content_type: &'static str, body: String) -> TestResult<Self> {
        let state = Arc::new(MockState {
            status,
            content_type,
            body,
            requests: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let app = Router::new().fallback(record).with_state(state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        thread::spawn(move || {
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        });

        Ok(Self {
            base_url,
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("request")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    state
        .requests
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
        .push(RecordedRequest {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            query,
            headers,
            body: body.to_vec(),
        });

    (
        state.status,
        [(header::CONTENT_TYPE, state.content_type)],
        state.body.clone(),
    )
        .into_response()
}

/// A base URL nothing listens on, so requests fail with connection refused.
pub fn refused_base_url() -> TestResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
