//! End-to-end: composed handlers registered on a live server.

use std::net::TcpListener as StdListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::StatusCode;
use strata::middleware::{self, Chain, Next};
use strata::{BoxedHandler, Request, Response, Router, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

type Log = Arc<Mutex<Vec<String>>>;

fn free_addr() -> String {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().to_string()
}

fn tag(log: &Log, name: &'static str) -> impl middleware::Middleware + use<> {
    let log = Arc::clone(log);
    middleware::from_fn(move |req: Request, next: Next| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push(format!("{name}:in"));
            let res = next.call(req).await;
            log.lock().unwrap().push(format!("{name}:out"));
            res
        }
    })
}

async fn echo_id(req: Request) -> Response {
    Response::text(format!("user {}", req.param("id").unwrap_or("?")))
}

async fn echo_body(req: Request) -> Response {
    Response::builder()
        .status(StatusCode::CREATED)
        .bytes("application/octet-stream", req.body().to_vec())
}

/// Sends one HTTP/1.1 request and returns the raw response text.
async fn send(addr: &str, raw: &str) -> String {
    let mut stream = None;
    for _ in 0..50 {
        match TcpStream::connect(addr).await {
            Ok(s) => {
                stream = Some(s);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(20)).await,
        }
    }
    let mut stream = stream.expect("server never came up");
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

fn get(path: &str, extra: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nhost: test\r\nconnection: close\r\n{extra}\r\n")
}

#[tokio::test]
async fn serves_routes_through_middleware_chains() {
    let log: Log = Arc::default();
    let base = Chain::new()
        .outermost(tag(&log, "outer"))
        .outermost(middleware::timing);
    let guarded = base.clone().innermost(middleware::require_header("x-word", "please"));

    let unwrapped: BoxedHandler = Chain::new().wrap(echo_body);

    let app = Router::new()
        .get("/users/{id}", base.wrap(echo_id))
        .get("/secret", guarded.wrap(echo_id))
        .post("/echo", unwrapped);

    let addr = free_addr();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::bind(addr.clone()).serve_with_shutdown(app, async {
            let _ = stop_rx.await;
        }),
    );

    let res = send(&addr, &get("/users/42", "")).await;
    assert!(res.starts_with("HTTP/1.1 200 OK"), "{res}");
    assert!(res.contains("server-timing: app;dur="), "{res}");
    assert!(res.ends_with("user 42"), "{res}");
    assert_eq!(*log.lock().unwrap(), ["outer:in", "outer:out"]);

    let res = send(&addr, &get("/secret", "")).await;
    assert!(res.starts_with("HTTP/1.1 403 Forbidden"), "{res}");
    // The guard is innermost, so outer layers still ran and timed the rejection.
    assert!(res.contains("server-timing"), "{res}");

    let res = send(&addr, &get("/secret", "x-word: please\r\n")).await;
    assert!(res.starts_with("HTTP/1.1 200 OK"), "{res}");

    let res = send(
        &addr,
        "POST /echo HTTP/1.1\r\nhost: test\r\nconnection: close\r\ncontent-length: 5\r\n\r\nhello",
    )
    .await;
    assert!(res.starts_with("HTTP/1.1 201 Created"), "{res}");
    assert!(res.ends_with("hello"), "{res}");

    let res = send(&addr, &get("/echo", "")).await;
    assert!(res.starts_with("HTTP/1.1 405 Method Not Allowed"), "{res}");

    let res = send(&addr, &get("/missing", "")).await;
    assert!(res.starts_with("HTTP/1.1 404 Not Found"), "{res}");

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let app = Router::new().get("/", |_req: Request| async { "kept alive" });

    let addr = free_addr();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::bind(addr.clone()).serve_with_shutdown(app, async {
            let _ = stop_rx.await;
        }),
    );

    let mut stream = None;
    for _ in 0..50 {
        match TcpStream::connect(&addr).await {
            Ok(s) => {
                stream = Some(s);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(20)).await,
        }
    }
    let mut stream = stream.expect("server never came up");

    // No `connection: close`: the connection stays open after the response.
    stream
        .write_all(b"GET / HTTP/1.1\r\nhost: test\r\n\r\n")
        .await
        .unwrap();
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.ends_with(b"kept alive") {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the response arrived");
        buf.extend_from_slice(&chunk[..n]);
    }
    assert!(buf.starts_with(b"HTTP/1.1 200 OK"));

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server kept waiting on an idle connection")
        .unwrap()
        .unwrap();

    // The server closed its end.
    assert_eq!(stream.read(&mut chunk).await.unwrap(), 0);
}
