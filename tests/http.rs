use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
struct ProgressPoint {
    difficulty: String,
    solved: u64,
    total: u64,
    ratio: Option<f64>,
    percent: f64,
    label: String,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    username: String,
    fetched_at: String,
    progress: Vec<ProgressPoint>,
    question_totals: std::collections::BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

// Stub GraphQL upstream on its own thread so it outlives each test's runtime.
static UPSTREAM_URL: Lazy<String> = Lazy::new(|| {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub upstream");
    listener.set_nonblocking(true).expect("nonblocking stub listener");
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("stub listener");
            let app = Router::new().route("/graphql", post(stub_graphql));
            axum::serve(listener, app).await.expect("stub upstream");
        });
    });

    format!("http://{addr}/graphql")
});

async fn stub_graphql(Json(body): Json<Value>) -> Response {
    let username = body["variables"]["username"].as_str().unwrap_or_default();
    match username {
        "alice" => Json(json!({
            "data": {
                "allQuestionsCount": [
                    { "difficulty": "All", "count": 3300 },
                    { "difficulty": "Easy", "count": 830 },
                    { "difficulty": "Medium", "count": 1730 },
                    { "difficulty": "Hard", "count": 740 }
                ],
                "matchedUser": {
                    "submitStats": {
                        "acSubmissionNum": [
                            { "difficulty": "All", "count": 13 },
                            { "difficulty": "Easy", "count": 10 },
                            { "difficulty": "Medium", "count": 3 }
                        ],
                        "totalSubmissionNum": [
                            { "difficulty": "All", "count": 62 },
                            { "difficulty": "Easy", "count": 50 },
                            { "difficulty": "Medium", "count": 12 }
                        ]
                    }
                }
            }
        }))
        .into_response(),
        "ghost" => Json(json!({
            "data": { "allQuestionsCount": [], "matchedUser": null }
        }))
        .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}

/// The service binary, started once per test run and pointed at the stub upstream.
struct Service {
    addr: SocketAddr,
    _child: Child,
}

impl Service {
    fn start() -> Self {
        let addr = free_local_addr();
        let child = Command::new(env!("CARGO_BIN_EXE_leetcode_stats"))
            .env("PORT", addr.port().to_string())
            .env("LEETCODE_RELAY_URL", "")
            .env("LEETCODE_GRAPHQL_URL", UPSTREAM_URL.as_str())
            .env("RUST_LOG", "info")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("failed to spawn service");

        #[cfg(unix)]
        terminate_on_exit(&child);

        let deadline = Instant::now() + Duration::from_secs(5);
        while TcpStream::connect(addr).is_err() {
            assert!(Instant::now() < deadline, "service did not start listening");
            std::thread::sleep(Duration::from_millis(50));
        }

        Self { addr, _child: child }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

static SERVICE: Lazy<Service> = Lazy::new(Service::start);

fn free_local_addr() -> SocketAddr {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("reserve local port")
}

// Statics are never dropped, so the child is signalled from an atexit hook.
#[cfg(unix)]
fn terminate_on_exit(child: &Child) {
    use std::sync::atomic::{AtomicI32, Ordering};

    static PID: AtomicI32 = AtomicI32::new(0);

    extern "C" fn terminate() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }

    PID.store(child.id() as i32, Ordering::SeqCst);
    unsafe {
        libc::atexit(terminate);
    }
}

async fn api_error(username: &str) -> (StatusCode, ErrorResponse) {
    let response = Client::new()
        .get(SERVICE.url(&format!("/api/stats/{username}")))
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn http_stats_for_known_user() {
    let response = Client::new()
        .get(SERVICE.url("/api/stats/alice"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let stats: StatsResponse = response.json().await.unwrap();

    assert_eq!(stats.username, "alice");
    assert!(!stats.fetched_at.is_empty());
    assert_eq!(stats.progress.len(), 3);

    let easy = &stats.progress[0];
    assert_eq!(easy.difficulty, "Easy");
    assert_eq!((easy.solved, easy.total), (10, 50));
    assert_eq!(easy.ratio, Some(0.2));
    assert_eq!(easy.label, "10/50");
    assert!((easy.percent - 20.0).abs() < 1e-9);

    let hard = &stats.progress[2];
    assert_eq!(hard.difficulty, "Hard");
    assert_eq!(hard.label, "0/0");
    assert_eq!(hard.ratio, None);
    assert_eq!(hard.percent, 0.0);

    assert_eq!(stats.question_totals.get("Medium"), Some(&1730));
    assert!(!stats.question_totals.contains_key("All"));
}

#[tokio::test]
async fn http_missing_user_is_not_found() {
    let (status, body) = api_error("ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.error, "UserNotFound");
    assert_eq!(body.message, "No user found.");
}

#[tokio::test]
async fn http_upstream_failures_are_bad_gateway() {
    let (status, body) = api_error("broken").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body.error, "FetchFailed");
    assert_eq!(body.message, "No data found.");

    let (status, body) = api_error("garbled").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body.error, "NetworkOrParseError");
    assert_eq!(body.message, "No data found.");
}

#[tokio::test]
async fn http_invalid_username_is_rejected() {
    for name in ["ab", "name%20with%20spaces", "abcdefghijklmnopqrst"] {
        let (status, body) = api_error(name).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "InvalidUsername");
        assert_eq!(body.message, "Invalid username format.");
    }
}

#[tokio::test]
async fn http_page_renders_search_results() {
    let client = Client::new();

    let html = client
        .get(SERVICE.url("/?username=alice"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"<span id="easy-level">10/50</span>"#));
    assert!(html.contains(r#"<span id="medium-level">3/12</span>"#));
    assert!(html.contains(r#"class="fill medium-progress" style="width: 25%""#));
    assert!(html.contains(r#"<button id="search-btn" type="submit">Search</button>"#));

    let html = client
        .get(SERVICE.url("/?username=ghost"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<p>No user found.</p>"));
}

#[tokio::test]
async fn http_padded_username_is_not_searched() {
    let client = Client::new();

    let html = client
        .get(SERVICE.url("/?username=%20alice"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<p>Invalid username format.</p>"));
    assert!(html.contains(r#"<span id="easy-level">0/0</span>"#));

    let (status, body) = api_error("alice%09").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "InvalidUsername");
}
