//! End-to-end CLI tests for the podgrab binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_index(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/series/show/episodes"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("podgrab").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("player.fm"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("podgrab").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that an empty answer to the prompt fails without touching the network.
#[test]
fn test_binary_empty_prompt_answer_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("podgrab").unwrap();
    cmd.current_dir(temp.path())
        .write_stdin("\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Enter base player.fm URL: "));
}

#[tokio::test]
async fn test_binary_index_server_error_exits_non_zero() {
    let server = MockServer::start().await;
    mount_index(&server, ResponseTemplate::new(500)).await;
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("podgrab").unwrap();
    cmd.current_dir(temp.path())
        .arg(format!("{}/series/show", server.uri()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading the page"));
}

#[tokio::test]
async fn test_binary_index_without_links_exits_non_zero() {
    let server = MockServer::start().await;
    mount_index(
        &server,
        ResponseTemplate::new(200).set_body_string("<html><body>nothing here</body></html>"),
    )
    .await;
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("podgrab").unwrap();
    cmd.current_dir(temp.path())
        .arg(format!("{}/series/show", server.uri()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing the HTML"));
}

#[tokio::test]
async fn test_binary_prompted_run_downloads_into_downloads_dir() {
    let server = MockServer::start().await;
    let episode_url = format!("{}/audio/episode-42.mp3?dest-abc", server.uri());
    let broken_url = format!("{}/audio/broken.mp3", server.uri());
    mount_index(
        &server,
        ResponseTemplate::new(200).set_body_string(format!(
            r#"<a class="action normal playable" href="{episode_url}"></a><a class="action normal playable" href="{broken_url}"></a>"#
        )),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/audio/episode-42.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![4u8; 1024]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audio/broken.mp3"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("podgrab").unwrap();
    cmd.current_dir(temp.path())
        .env("COLUMNS", "80")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .write_stdin(format!("{}/series/show\n", server.uri()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter base player.fm URL: "))
        .stdout(predicate::str::contains(format!(
            "[1/2] episode-42.mp3 ({episode_url})"
        )))
        .stdout(predicate::str::contains("[2/2] broken.mp3"))
        .stdout(predicate::str::ends_with("DONE\n"))
        .stderr(predicate::str::contains("episode download failed"));

    let saved = temp.path().join("Downloads").join("episode-42.mp3");
    assert_eq!(std::fs::read(&saved).unwrap().len(), 1024);
    assert!(!temp.path().join("Downloads").join("episode-42.mp3.part").exists());
}
