//! Testing utilities for the OptiCode workspace
//!
//! A stub `/analyze` backend that records what it receives, plus fixtures.

#![allow(missing_docs)]

use parking_lot::Mutex;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::Filter;

/// Canned reply of the stub backend
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
}

impl StubReply {
    /// 200 with a well-formed analysis body
    pub fn analysis(score: &str, analysis: &str) -> Self {
        Self {
            status: 200,
            body: json!({ "security_score": score, "analysis": analysis }).to_string(),
        }
    }

    /// Arbitrary status and raw body
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Stub analysis backend listening on an ephemeral loopback port
#[derive(Debug, Clone)]
pub struct StubBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    /// Start serving `reply` for every `POST /analyze`
    ///
    /// Must be called from inside a tokio runtime.
    pub fn spawn(reply: StubReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();

        let analyze = warp::post()
            .and(warp::path("analyze"))
            .and(warp::path::end())
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .map(move |content_type: Option<String>, body: Bytes| {
                recorder.lock().push(RecordedRequest {
                    content_type,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
                let status =
                    StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                warp::reply::with_header(
                    warp::reply::with_status(reply.body.clone(), status),
                    "content-type",
                    "application/json",
                )
            });

        let (addr, server) = warp::serve(analyze).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, requests }
    }

    /// Base URL to configure the client with
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

/// Base URL of a loopback port with nothing listening
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
