use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct EntryRow {
    label: String,
    students: u32,
    category: String,
}

#[derive(Debug, Deserialize)]
struct CategoryTotal {
    category: String,
    students: u32,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    entries: Vec<EntryRow>,
    categories: Vec<CategoryTotal>,
    total: u32,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("headcount_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/summary")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_headcount"))
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

async fn reset(client: &Client, base_url: &str) -> SummaryResponse {
    client
        .post(format!("{base_url}/api/reset"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_count(client: &Client, base_url: &str, label: &str, quantity: &str) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/count"))
        .json(&serde_json::json!({ "label": label, "quantity": quantity }))
        .send()
        .await
        .unwrap()
}

async fn get_summary(client: &Client, base_url: &str) -> SummaryResponse {
    client
        .get(format!("{base_url}/api/summary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn category_total(summary: &SummaryResponse, name: &str) -> u32 {
    summary
        .categories
        .iter()
        .find(|row| row.category == name)
        .map(|row| row.students)
        .unwrap_or_else(|| panic!("category {name} missing"))
}

#[tokio::test]
async fn http_confirm_count_updates_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let response = post_count(&client, &server.base_url, "3º ANO", "25").await;
    assert!(response.status().is_success());

    let summary = get_summary(&client, &server.base_url).await;
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.entries[0].label, "3º ANO");
    assert_eq!(summary.entries[0].students, 25);
    assert_eq!(summary.entries[0].category, "Fundamental 1 B");
    assert_eq!(summary.total, 25);

    assert_eq!(summary.categories.len(), 5);
    assert_eq!(category_total(&summary, "Fundamental 1 B"), 25);
    for name in ["Fundamental 1 A", "Fundamental 2", "Ensino Médio", "Outros"] {
        assert_eq!(category_total(&summary, name), 0, "{name}");
    }
}

#[tokio::test]
async fn http_confirm_overwrites_existing_label() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    post_count(&client, &server.base_url, "1º ANO", "10").await;
    post_count(&client, &server.base_url, "6º ANO", "20").await;
    let response = post_count(&client, &server.base_url, "1º ANO", "15").await;
    assert!(response.status().is_success());

    let summary = get_summary(&client, &server.base_url).await;
    assert_eq!(summary.entries.len(), 2);
    let first = summary
        .entries
        .iter()
        .find(|entry| entry.label == "1º ANO")
        .unwrap();
    assert_eq!(first.students, 15);
    assert_eq!(summary.total, 35);
}

#[tokio::test]
async fn http_rejects_invalid_quantity() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    post_count(&client, &server.base_url, "1º ANO", "10").await;

    for bad in ["abc", "0", "-3", ""] {
        let response = post_count(&client, &server.base_url, "2º ANO", bad).await;
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "{bad:?}");
        let message = response.text().await.unwrap();
        assert!(!message.is_empty());
    }

    // Store untouched by the rejected entries.
    let summary = get_summary(&client, &server.base_url).await;
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.total, 10);
}

#[tokio::test]
async fn http_delete_removes_label_and_ignores_absent() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    post_count(&client, &server.base_url, "1º ANO", "10").await;
    post_count(&client, &server.base_url, "6º ANO", "20").await;

    let response = client
        .post(format!("{}/api/delete", server.base_url))
        .json(&serde_json::json!({ "label": "1º ANO" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let summary = get_summary(&client, &server.base_url).await;
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.entries[0].label, "6º ANO");
    assert_eq!(summary.total, 20);

    let response = client
        .post(format!("{}/api/delete", server.base_url))
        .json(&serde_json::json!({ "label": "TURMA INEXISTENTE" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let summary = get_summary(&client, &server.base_url).await;
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.total, 20);
}

#[tokio::test]
async fn http_reset_clears_everything_and_is_idempotent() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    post_count(&client, &server.base_url, "1º ANO", "10").await;

    let summary = reset(&client, &server.base_url).await;
    assert!(summary.entries.is_empty());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.categories.len(), 5);
    assert!(summary.categories.iter().all(|row| row.students == 0));

    let again = reset(&client, &server.base_url).await;
    assert!(again.entries.is_empty());
    assert_eq!(again.total, 0);
}

#[tokio::test]
async fn http_form_fallback_redirects_to_index() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/count", server.base_url))
        .form(&[("label", "5º ANO"), ("quantity", "12")])
        .send()
        .await
        .unwrap();

    // reqwest follows the redirect back to the page.
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("5º ANO: 12 alunos"));

    let summary = get_summary(&client, &server.base_url).await;
    assert_eq!(summary.total, 12);
}

#[tokio::test]
async fn http_index_serves_page_with_results() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    post_count(&client, &server.base_url, "2º ANO M", "18").await;

    let body = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Total Geral"));
    assert!(body.contains("2º ANO M: 18 alunos"));
    assert!(body.contains("current-date"));
    assert!(body.contains("Reiniciar"));
}
