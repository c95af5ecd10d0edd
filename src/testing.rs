//! Test helpers: a stub HTTP upstream and a small client

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{HeaderMap, Method, Request, Response, StatusCode};
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioIo};
use tokio::net::TcpListener;

/// What the stub saw
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// What the stub answers
pub struct StubReply {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

impl StubReply {
    pub fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body,
        }
    }
}

/// Handle to a running stub upstream
pub struct Stub {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<StubRequest>>>,
}

impl Stub {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<StubRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// The single request received; fails the test otherwise
    pub fn only_request(&self) -> StubRequest {
        let mut seen = self.requests();
        assert_eq!(seen.len(), 1, "expected exactly one upstream request");
        seen.remove(0)
    }
}

/// Serve every request with `handler` until the test runtime stops
///
/// Requests are recorded on the returned [`Stub`] so tests can assert on
/// them from the test body.
pub async fn spawn_stub<F>(handler: F) -> Stub
where
    F: Fn(&StubRequest) -> StubReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = Arc::clone(&handler);
            let recorder = Arc::clone(&recorder);
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let handler = Arc::clone(&handler);
                    let recorder = Arc::clone(&recorder);
                    async move {
                        let (parts, body) = req.into_parts();
                        let body = body
                            .collect()
                            .await
                            .map(|b| b.to_bytes().to_vec())
                            .unwrap_or_default();
                        let header = |name| {
                            parts
                                .headers
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(ToString::to_string)
                        };
                        let request = StubRequest {
                            method: parts.method.to_string(),
                            path: parts.uri.path().to_string(),
                            authorization: header(AUTHORIZATION),
                            content_type: header(CONTENT_TYPE),
                            body,
                        };
                        let reply = handler(&request);
                        recorder.lock().unwrap().push(request);
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(reply.status)
                                .header(CONTENT_TYPE, reply.content_type)
                                .body(Full::new(Bytes::from(reply.body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    Stub { addr, seen }
}

/// An address nothing listens on
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Send one request and collect the whole answer
pub async fn send(
    addr: SocketAddr,
    method: Method,
    path: &str,
    body: &[u8],
) -> (StatusCode, HeaderMap, Bytes) {
    let client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
    let req = Request::builder()
        .method(method)
        .uri(format!("http://{addr}{path}"))
        .body(Full::new(Bytes::copy_from_slice(body)))
        .unwrap();
    let resp = client.request(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}
