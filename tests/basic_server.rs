//! Bundled server tests: data directory, binding, health endpoint, stop.

use std::fs;

use serde_json::Value;

use sync_launcher::lifecycle::{launch, Outcome};
use sync_launcher::server::BasicServer;

mod common;

use common::config_at;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn starts_serves_and_stops() {
    let base = tempfile::tempdir().unwrap();
    let mut config = config_at(base.path(), "127.0.0.1:0", "abc");
    config.data_directory = base.path().join("nested").join("data");
    let data_directory = config.data_directory.clone();

    let mut server = BasicServer::new();
    let outcome = launch(config, &mut server).await;

    let address = server.address().expect("server is bound");
    assert_eq!(
        outcome,
        Outcome::Started {
            bound_address: address.to_string()
        }
    );
    assert_ne!(address.port(), 0);
    assert!(server.is_running());

    assert!(data_directory.is_dir());
    assert_eq!(fs::read_dir(&data_directory).unwrap().count(), 0);

    let res = client()
        .get(format!("http://{}/health", address))
        .send()
        .await
        .expect("server reachable");
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    server.stop().await.unwrap();
    assert!(!server.is_running());
    assert!(server.address().is_none());
    assert!(client()
        .get(format!("http://{}/health", address))
        .send()
        .await
        .is_err());
}

#[tokio::test]
async fn second_start_is_rejected() {
    let base = tempfile::tempdir().unwrap();
    let mut server = BasicServer::new();

    let first = launch(config_at(base.path(), "127.0.0.1:0", "abc"), &mut server).await;
    assert!(first.is_started());

    let second = launch(config_at(base.path(), "127.0.0.1:0", "abc"), &mut server).await;
    match second {
        Outcome::Failed { message } => assert!(message.contains("already running")),
        other => panic!("expected failure, got {:?}", other),
    }

    server.stop().await.unwrap();
}

#[tokio::test]
async fn address_in_use_fails_to_start() {
    let base = tempfile::tempdir().unwrap();
    let mut first = BasicServer::new();
    launch(config_at(base.path(), "127.0.0.1:0", "abc"), &mut first).await;
    let taken = first.address().unwrap().to_string();

    let mut second = BasicServer::new();
    let outcome = launch(config_at(base.path(), &taken, "abc"), &mut second).await;
    match outcome {
        Outcome::Failed { message } => {
            assert!(message.contains("failed to bind"));
            assert!(message.contains(&taken));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!second.is_running());

    first.stop().await.unwrap();
}

#[tokio::test]
async fn unusable_data_directory_fails_to_start() {
    let base = tempfile::tempdir().unwrap();
    let blocker = base.path().join("data");
    fs::write(&blocker, "not a directory").unwrap();

    let mut server = BasicServer::new();
    let outcome = launch(config_at(base.path(), "127.0.0.1:0", "abc"), &mut server).await;

    match outcome {
        Outcome::Failed { message } => assert!(message.contains("not usable")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(server.address().is_none());
}

#[tokio::test]
async fn empty_license_fails_to_start() {
    let base = tempfile::tempdir().unwrap();
    let mut server = BasicServer::new();

    let outcome = launch(config_at(base.path(), "127.0.0.1:0", ""), &mut server).await;
    assert_eq!(
        outcome,
        Outcome::Failed {
            message: "license material is empty".into()
        }
    );
}

#[tokio::test]
async fn invalid_listen_address_fails_to_start() {
    let base = tempfile::tempdir().unwrap();
    let mut server = BasicServer::new();

    let outcome = launch(config_at(base.path(), "localhost:9080", "abc"), &mut server).await;
    assert!(matches!(outcome, Outcome::Failed { message } if message.contains("localhost:9080")));
}

#[tokio::test]
async fn restart_after_stop() {
    let base = tempfile::tempdir().unwrap();
    let mut server = BasicServer::new();

    assert!(launch(config_at(base.path(), "127.0.0.1:0", "abc"), &mut server)
        .await
        .is_started());
    server.stop().await.unwrap();

    assert!(launch(config_at(base.path(), "127.0.0.1:0", "abc"), &mut server)
        .await
        .is_started());
    server.stop().await.unwrap();
}
