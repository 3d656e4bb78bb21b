use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::{
    env,
    net::TcpListener,
    process::{Child, Command, Stdio},
    time::Duration,
};
use tokio::time::sleep;

const ADMIN_CODE: &str = "IT-ADMIN-CODE";

struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

#[derive(Debug, Deserialize)]
struct Registered {
    id: String,
    secret_code: String,
}

#[derive(Debug, Deserialize)]
struct Complaint {
    id: String,
    status: String,
    user_id: String,
    resolved_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    id: String,
    complaints: Vec<String>,
    is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn pick_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind a local port")?;
    Ok(listener
        .local_addr()
        .context("Failed to read local port")?
        .port())
}

fn spawn_portal(port: u16) -> Result<ChildGuard> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_complaint-portal"));
    // Default to info logs so CI failures include useful context.
    if env::var("COMPLAINT_PORTAL_LOG_LEVEL").is_err() {
        command.env("COMPLAINT_PORTAL_LOG_LEVEL", "info");
    }
    let child = command
        .args([
            "--address",
            "127.0.0.1",
            "--port",
            &port.to_string(),
            "--admin-secret-code",
            ADMIN_CODE,
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
        .context("Failed to spawn complaint-portal")?;
    Ok(ChildGuard(child))
}

async fn wait_for_ready(client: &reqwest::Client, base: &str) -> Result<()> {
    for _ in 0..40 {
        match client.get(format!("{base}/health")).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => sleep(Duration::from_millis(250)).await,
        }
    }
    bail!("complaint-portal did not become ready at {base}");
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> Result<reqwest::Response> {
    client
        .post(url)
        .json(&body)
        .send()
        .await
        .context("request failed")
}

#[tokio::test]
async fn complaint_lifecycle_over_http() -> Result<()> {
    let port = pick_port()?;
    let _server = spawn_portal(port)?;
    let base = format!("http://127.0.0.1:{port}");
    let client = reqwest::Client::new();

    wait_for_ready(&client, &base).await?;

    let response = post(
        &client,
        format!("{base}/register"),
        json!({"name": "Ann", "email": "ann@example.com"}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ann: Registered = response.json().await?;
    assert_eq!(ann.secret_code.len(), 16);

    let response = post(
        &client,
        format!("{base}/submitComplaint"),
        json!({
            "secret_code": ann.secret_code,
            "title": "Slow",
            "summary": "too slow",
            "rating": 5
        }),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let complaint: Complaint = response.json().await?;
    assert_eq!(complaint.status, "pending");
    assert_eq!(complaint.user_id, ann.id);
    assert!(complaint.resolved_at.is_none());

    let response = post(
        &client,
        format!("{base}/login"),
        json!({"secret_code": ann.secret_code}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Profile = response.json().await?;
    assert_eq!(profile.id, ann.id);
    assert!(!profile.is_admin);
    assert_eq!(profile.complaints, vec![complaint.id.clone()]);

    let response = post(
        &client,
        format!("{base}/resolveComplaint"),
        json!({"secret_code": ann.secret_code, "complaint_id": complaint.id}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let resolve = json!({"secret_code": ADMIN_CODE, "complaint_id": complaint.id});
    let response = post(&client, format!("{base}/resolveComplaint"), resolve.clone()).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let resolved: Complaint = response.json().await?;
    assert_eq!(resolved.status, "resolved");
    assert!(resolved.resolved_at.is_some());

    let response = post(&client, format!("{base}/resolveComplaint"), resolve).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = response.json().await?;
    assert_eq!(error.error, "already_resolved");

    let response = client.get(format!("{base}/login")).send().await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}

#[tokio::test]
async fn default_admin_code_is_replaced_by_configuration() -> Result<()> {
    let port = pick_port()?;
    let _server = spawn_portal(port)?;
    let base = format!("http://127.0.0.1:{port}");
    let client = reqwest::Client::new();

    wait_for_ready(&client, &base).await?;

    let response = post(
        &client,
        format!("{base}/login"),
        json!({"secret_code": "ADMIN123"}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post(
        &client,
        format!("{base}/login"),
        json!({"secret_code": ADMIN_CODE}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let admin: Profile = response.json().await?;
    assert!(admin.is_admin);

    Ok(())
}
