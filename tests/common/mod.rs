use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

/// The suites need a real Postgres database; they skip themselves when
/// neither DATABASE_TEST_URL nor DATABASE_URL is configured.
pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_TEST_URL")
        .ok()
        .or_else(|| std::env::var("DATABASE_URL").ok())
}

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bloglist-api"));
        cmd.env("APP_ENV", "test")
            .env("PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("SECRET", "bloglist-test-secret")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // The suites exercise real CRUD, so wait for the database too
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?} (is the database reachable?)",
            self.base_url,
            timeout
        )
    }
}

/// Spawn the server once per test binary, or return None when no database is
/// configured and the suite should skip.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let server = SERVER.get_or_init(|| {
        database_url().map(|url| TestServer::spawn(&url).expect("failed to spawn server binary"))
    });

    match server {
        Some(server) => {
            server.wait_ready(Duration::from_secs(10)).await?;
            Ok(Some(server))
        }
        None => {
            eprintln!("skipping: DATABASE_TEST_URL / DATABASE_URL not set");
            Ok(None)
        }
    }
}

/// Usernames unique per process and call, so suites can share a database
pub fn unique_username(prefix: &str) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Register a fresh user and log in; returns (username, user id, token)
#[allow(dead_code)]
pub async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    prefix: &str,
) -> Result<(String, String, String)> {
    let username = unique_username(prefix);

    let res = client
        .post(format!("{}/users", base_url))
        .json(&json!({ "username": username, "password": "password" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "registration failed: {}", res.status());
    let user: Value = res.json().await?;
    let user_id = user["id"].as_str().context("missing user id")?.to_string();

    let res = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": username, "password": "password" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("missing token")?.to_string();

    Ok((username, user_id, token))
}

/// Create a post through the API and return the response body
#[allow(dead_code)]
pub async fn create_post(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    body: Value,
) -> Result<Value> {
    let res = client
        .post(format!("{}/posts", base_url))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "post creation failed: {}", res.status());
    Ok(res.json().await?)
}
