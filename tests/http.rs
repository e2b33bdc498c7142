use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Dot {
    color: String,
    count: u8,
}

#[derive(Debug, Deserialize)]
struct Style {
    background: String,
    dots: Vec<Dot>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    day: Option<u32>,
    is_future: bool,
    style: Option<Style>,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    present: usize,
    absent: usize,
    double_absent: usize,
    half_day: usize,
    miss: usize,
    total: usize,
    not_completed: usize,
}

#[derive(Debug, Deserialize)]
struct CalendarView {
    year: i32,
    month: u32,
    leading_blanks: u32,
    cells: Vec<Cell>,
    summary: Summary,
}

impl CalendarView {
    fn day(&self, day: u32) -> &Cell {
        self.cells
            .iter()
            .find(|cell| cell.day == Some(day))
            .expect("missing day")
    }
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    normalized: String,
    style: Style,
    label: String,
    bucket: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegendEntry {
    statuses: Vec<String>,
    label: String,
}

#[derive(Debug, Deserialize)]
struct ImportResponse {
    member: String,
    received: usize,
    records: usize,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn seeded_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("attendance_http_{}_{}.json", std::process::id(), nanos));

    let seed = serde_json::json!({
        "members": {
            "E-100": [
                { "date": "2025-03-01", "status": "PRESENT", "cardNumber": "E-100" },
                { "date": { "value": "2025-03-02" }, "status": "DOUBLE ABSENT" },
                { "dt": "2025-03-03", "status": "Miss Out", "timeIn": "09:12" },
                { "date": "2025-04-01", "status": "ABSENT" }
            ]
        }
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&seed).unwrap()).expect("write seed");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/legend")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = seeded_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_attendance_calendar"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn member_calendar(server: &TestServer, member: &str, month: &str) -> CalendarView {
    let response = Client::new()
        .get(format!("{}/api/members/{member}/calendar?month={month}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "status {}", response.status());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_member_calendar_classifies_seeded_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let view = member_calendar(&server, "E-100", "2025-03-01").await;
    assert_eq!((view.year, view.month), (2025, 3));
    assert_eq!(view.leading_blanks, 6);
    assert_eq!(view.cells.len(), 6 + 31);

    let first = view.day(1).style.as_ref().unwrap();
    assert_eq!(first.background, "green");
    assert!(first.dots.is_empty());
    assert_eq!(view.day(1).label.as_deref(), Some("P"));

    let second = view.day(2).style.as_ref().unwrap();
    assert_eq!(second.background, "red");
    assert_eq!((second.dots[0].color.as_str(), second.dots[0].count), ("black", 2));

    let third = view.day(3).style.as_ref().unwrap();
    assert_eq!(third.background, "orange");
    assert_eq!((third.dots[0].color.as_str(), third.dots[0].count), ("blue", 1));

    assert!(view.day(4).style.is_none());
    // March 2025 is in the past relative to any run of this suite.
    assert!(!view.day(31).is_future);

    let summary = &view.summary;
    assert_eq!(
        (summary.present, summary.absent, summary.double_absent, summary.half_day, summary.miss),
        (1, 0, 1, 0, 1)
    );
    assert_eq!(summary.total, 3);
    assert_eq!(summary.not_completed, 1);
}

#[tokio::test]
async fn http_classify_normalizes_status() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let body: ClassifyResponse = Client::new()
        .post(format!("{}/api/classify", server.base_url))
        .json(&serde_json::json!({ "status": "  present late " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body.normalized, "PRESENT LATE");
    assert_eq!(body.style.background, "green");
    assert_eq!(body.style.dots[0].color, "white");
    assert_eq!(body.label, "P");
    assert_eq!(body.bucket.as_deref(), Some("present"));

    let unknown: ClassifyResponse = Client::new()
        .post(format!("{}/api/classify", server.base_url))
        .json(&serde_json::json!({ "status": null }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unknown.style.background, "neutral");
    assert_eq!(unknown.label, "-");
    assert_eq!(unknown.bucket, None);
}

#[tokio::test]
async fn http_legend_lists_exact_rules() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let legend: Vec<LegendEntry> = Client::new()
        .get(format!("{}/api/legend", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(legend[0].statuses[0], "DOUBLE ABSENT");
    assert!(legend.iter().any(|entry| entry.label == "WO"));
}

#[tokio::test]
async fn http_calendar_transform_uses_supplied_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let view: CalendarView = Client::new()
        .post(format!("{}/api/calendar", server.base_url))
        .json(&serde_json::json!({
            "year": 2025,
            "month": 1,
            "today": "2025-01-15",
            "records": [{ "date": "2025-01-20", "status": "Leave" }],
            "summary": { "present": 99 }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.cells.len(), view.leading_blanks as usize + 31);
    assert!(view.day(20).is_future);
    assert_eq!(view.day(20).style.as_ref().unwrap().background, "blue");
    assert!(!view.day(10).is_future);
    assert_eq!(view.summary.present, 0);
    assert_eq!(view.summary.total, 1);
}

#[tokio::test]
async fn http_import_then_fetch_member() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let imported: ImportResponse = client
        .put(format!("{}/api/members/E-200/records", server.base_url))
        .json(&serde_json::json!({
            "records": [
                { "date": { "value": "2025-02-03" }, "status": "ABSENT" },
                { "date": "2025-02-03", "status": "Half Day" },
                { "date": "2025-02-04", "status": "Miss Pending" },
                { "status": "PRESENT" }
            ],
            "summary": { "absent": 5 }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(imported.member, "E-200");
    assert_eq!(imported.received, 4);
    assert_eq!(imported.records, 2);

    let view = member_calendar(&server, "E-200", "2025-02").await;
    assert_eq!(view.cells.len(), view.leading_blanks as usize + 28);
    assert_eq!(view.day(3).style.as_ref().unwrap().background, "yellow");
    assert_eq!(view.day(4).style.as_ref().unwrap().background, "muted");
    assert_eq!(view.day(4).label.as_deref(), Some("M"));
    assert_eq!(view.summary.half_day, 1);
    assert_eq!(view.summary.miss, 1);
    assert_eq!(view.summary.absent, 0);
    assert_eq!(view.summary.total, 2);
}

#[tokio::test]
async fn http_rejects_bad_month_and_unknown_member() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let bad_month = client
        .get(format!("{}/api/members/E-100/calendar?month=March", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_month.status(), StatusCode::BAD_REQUEST);

    let unknown = client
        .get(format!("{}/api/members/NOBODY/calendar?month=2025-03-01", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let bad_transform = client
        .post(format!("{}/api/calendar", server.base_url))
        .json(&serde_json::json!({ "year": 2025, "month": 13, "records": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_transform.status(), StatusCode::BAD_REQUEST);
}
