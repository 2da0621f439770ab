use std::error::Error;
use std::fs;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use livewatch::config::WatchSection;
use livewatch::reload::{trigger, ReloadMessage, ReloadServer};
use livewatch::watch::ReloadRules;

type TestResult = Result<(), Box<dyn Error>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn seed_assets(root: &std::path::Path) -> TestResult {
    for (rel, contents) in [
        ("app/static/styles/app.css", "body { margin: 0 }"),
        ("app/templates/index.html", "<html>index</html>"),
        ("app/templates/account/login.html", "<html>login</html>"),
    ] {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, contents)?;
    }
    Ok(())
}

#[tokio::test]
async fn single_change_reemits_both_globs() -> TestResult {
    let dir = tempfile::tempdir()?;
    seed_assets(dir.path())?;

    let rules = ReloadRules::from_config(&WatchSection::default())?;
    let server = ReloadServer::bind("127.0.0.1:0").await?;
    let sender = server.sender();

    // Subscribe before triggering so nothing is missed.
    let mut rx = sender.subscribe();

    // One stylesheet edit still emits the stylesheet and every template.
    let emitted = trigger(dir.path(), &rules, &sender)?;
    assert_eq!(emitted, 3);

    let mut paths = Vec::new();
    for _ in 0..emitted {
        let msg = rx.recv().await?;
        assert_eq!(msg.command, "reload");
        paths.push(msg.path);
    }
    assert_eq!(
        paths,
        vec![
            "app/static/styles/app.css",
            "app/templates/account/login.html",
            "app/templates/index.html",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn connected_client_receives_json_lines() -> TestResult {
    let dir = tempfile::tempdir()?;
    seed_assets(dir.path())?;

    let rules = ReloadRules::from_config(&WatchSection::default())?;
    let server = ReloadServer::bind("127.0.0.1:0").await?;
    let sender = server.sender();

    let stream = TcpStream::connect(server.local_addr()).await?;
    let mut lines = BufReader::new(stream).lines();

    // Give the accept loop a moment to subscribe the client.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let emitted = trigger(dir.path(), &rules, &sender)?;
    assert_eq!(emitted, 3);

    for _ in 0..emitted {
        let line = timeout(RECV_TIMEOUT, lines.next_line())
            .await??
            .ok_or("reload stream closed early")?;
        let msg: ReloadMessage = serde_json::from_str(&line)?;
        assert_eq!(msg.command, "reload");
        assert!(!msg.contents.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn non_utf8_asset_still_emits() -> TestResult {
    let dir = tempfile::tempdir()?;
    seed_assets(dir.path())?;

    // A stylesheet with invalid UTF-8 (e.g. a latin-1 comment) must not
    // abort the pass.
    fs::write(
        dir.path().join("app/static/styles/app.css"),
        b"/* caf\xe9 */ body {}",
    )?;

    let rules = ReloadRules::from_config(&WatchSection::default())?;
    let server = ReloadServer::bind("127.0.0.1:0").await?;
    let sender = server.sender();
    let mut rx = sender.subscribe();

    let emitted = trigger(dir.path(), &rules, &sender)?;
    assert_eq!(emitted, 3);

    let msg = rx.recv().await?;
    assert_eq!(msg.path, "app/static/styles/app.css");
    assert!(msg.contents.contains("body {}"));
    Ok(())
}

#[tokio::test]
async fn trigger_without_clients_is_fire_and_forget() -> TestResult {
    let dir = tempfile::tempdir()?;
    seed_assets(dir.path())?;

    let rules = ReloadRules::from_config(&WatchSection::default())?;
    let server = ReloadServer::bind("127.0.0.1:0").await?;

    // Nobody is connected; emitting must still succeed.
    let emitted = trigger(dir.path(), &rules, &server.sender())?;
    assert_eq!(emitted, 3);
    Ok(())
}

#[tokio::test]
async fn bind_failure_is_fatal() -> TestResult {
    let first = ReloadServer::bind("127.0.0.1:0").await?;
    let addr = first.local_addr().to_string();

    // Second bind on the same port must fail, not retry.
    assert!(ReloadServer::bind(&addr).await.is_err());
    Ok(())
}
