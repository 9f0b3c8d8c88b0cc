use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A canned answer for one path.
#[derive(Clone, Debug)]
pub struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

impl Route {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Minimal HTTP/1.1 server answering GET requests from a route table.
///
/// Unknown paths get a FastAPI style 404. Every request target (path and
/// query) is recorded in arrival order.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(routes: Vec<(&str, Route)>) -> anyhow::Result<Self> {
        let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;

        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let handle = tokio::spawn(accept_loop(listener, routes, requests.clone()));

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort();
        requests
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Routes for a healthy service that finds port 443 open on a Cloudflare box.
pub fn healthy_routes() -> Vec<(&'static str, Route)> {
    vec![
        ("/my-ip", Route::json(r#"{"your_ip":"203.0.113.50"}"#)),
        ("/check-port", Route::json(r#"{"status":"open"}"#)),
        (
            "/ping",
            Route::json(r#"{"reachable":true,"avg_latency_ms":18.456}"#),
        ),
        (
            "/geolocate",
            Route::json(
                r#"{"status":"success","country":"Australia","regionName":"Queensland",
                    "city":"South Brisbane","isp":"Cloudflare, Inc","lat":-27.4766,
                    "lon":153.0166,"query":"1.1.1.1"}"#,
            ),
        ),
        (
            "/whois",
            Route::json(
                r#"{"asn":"13335","network_name":"APNIC-LABS","org":"Cloudflare, Inc.",
                    "country":"AU","emails":["resolver-abuse@cloudflare.com"]}"#,
            ),
        ),
    ]
}

async fn accept_loop(
    listener: TcpListener,
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<Mutex<Vec<String>>>,
) {
    while let Ok((stream, _peer)) = listener.accept().await {
        tokio::spawn(serve(stream, routes.clone(), requests.clone()));
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let target: String = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    requests.lock().unwrap().push(target.clone());

    let path: &str = target.split('?').next().unwrap_or("/");
    let route: Route = routes
        .get(path)
        .cloned()
        .unwrap_or_else(|| Route::json(r#"{"detail":"Not Found"}"#).status(404));

    tokio::time::sleep(route.delay).await;

    let response: String = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        reason(route.status),
        route.body.len(),
        route.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}
