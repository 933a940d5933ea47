//! Minimal HTTP/1.1 backend used by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub target: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub type Responder = Arc<dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync>;
pub type Latency = Arc<dyn Fn(&RecordedRequest) -> Duration + Send + Sync>;

pub struct FakeBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBackend {
    pub async fn spawn<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        Self::spawn_with_latency(responder, |_| Duration::ZERO).await
    }

    /// Like [`FakeBackend::spawn`], holding each response back for `latency(request)`.
    /// Requests are recorded as soon as they arrive.
    pub async fn spawn_with_latency<F, L>(responder: F, latency: L) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
        L: Fn(&RecordedRequest) -> Duration + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responder: Responder = Arc::new(responder);
        let latency: Latency = Arc::new(latency);

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let recorded = recorded.clone();
                let responder = responder.clone();
                let latency = latency.clone();
                tokio::spawn(async move {
                    serve(socket, recorded, responder, latency).await;
                });
            }
        });

        FakeBackend {
            base_url: format!("http://{}/api", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path() == path)
            .collect()
    }
}

async fn serve(
    mut socket: TcpStream,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
    latency: Latency,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "authorization" => authorization = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    while buf.len() < header_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    let request = RecordedRequest {
        method,
        target,
        authorization,
        body,
    };
    let (status, response_body) = responder(&request);
    let delay = latency(&request);
    recorded.lock().unwrap().push(request);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n{}",
        status,
        if status < 400 { "OK" } else { "Error" },
        response_body.len(),
        response_body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn caisse_json(id: i64, name: &str, balance: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "current_balance": balance,
        "last_updated": "2026-10-19T08:00:00Z",
        "created_at": "2026-01-01T00:00:00Z",
    })
}

pub fn operation_json(id: i64, operation_type: &str, amount: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "caisse": 1,
        "caisse_name": "Main",
        "operation_type": operation_type,
        "operation_type_display": operation_type,
        "amount": amount,
        "balance_after": "100.00",
        "description": "float",
        "reference_id": null,
        "performed_by": 1,
        "performed_by_username": "alice",
        "timestamp": "2026-10-19T08:00:00Z",
    })
}

pub fn page_json(results: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
    .to_string()
}
