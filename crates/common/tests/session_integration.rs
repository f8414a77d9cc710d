//! Session recovery integration tests
//!
//! Exercises the full session stack - `SessionManager` over a real
//! `RefreshClient` - against a wiremock backend, focusing on the
//! coalescing behavior concurrent callers observe.

use std::sync::Arc;
use std::time::Duration;

use hireloop_common::auth::{RefreshClient, SessionConfig, SessionError, SessionManager};
use hireloop_common::testing::{MockSessionStore, RecordingRedirect};
use reqwest::cookie::Jar;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type StackManager = SessionManager<RefreshClient, MockSessionStore, RecordingRedirect>;

fn manager_for(server: &MockServer) -> (Arc<StackManager>, Arc<RecordingRedirect>) {
    let config = SessionConfig::new(server.uri());
    let refresher =
        RefreshClient::new(&config, Arc::new(Jar::default())).expect("refresh client");
    let redirect = Arc::new(RecordingRedirect::new());
    let manager = Arc::new(SessionManager::new(
        Arc::new(refresher),
        Arc::new(MockSessionStore::new()),
        Arc::clone(&redirect),
    ));
    (manager, redirect)
}

/// Validates the single-flight property end to end: five callers recovering
/// at once produce exactly one refresh request on the wire.
///
/// The refresh endpoint answers slowly so every caller arrives while the
/// first one's refresh is still in flight.
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_recoveries_hit_the_refresh_endpoint_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, _redirect) = manager_for(&server);
    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let m = Arc::clone(&manager);
            tokio::spawn(async move { m.recover_unauthorized().await })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }
    // server.verify() on drop enforces expect(1)
}

/// Validates the terminal failure path: a rejected refresh settles every
/// concurrent caller with the same error, clears the local session, and
/// fires the login redirect exactly once.
#[tokio::test(flavor = "multi_thread")]
async fn rejected_refresh_tears_down_once_for_all_callers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("refresh token expired")
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (manager, redirect) = manager_for(&server);
    let tasks: Vec<_> = (0..3)
        .map(|_| {
            let m = Arc::clone(&manager);
            tokio::spawn(async move { m.recover_unauthorized().await })
        })
        .collect();

    for task in tasks {
        let err = task.await.unwrap().unwrap_err();
        match err {
            SessionError::Refresh { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "refresh token expired");
            }
            other => panic!("expected refresh rejection, got {other:?}"),
        }
    }
    assert_eq!(redirect.count(), 1);
}

/// Validates that settled cycles do not leak into later ones: recoveries
/// separated in time each perform their own refresh.
#[tokio::test]
async fn sequential_recoveries_refresh_independently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let (manager, _redirect) = manager_for(&server);
    assert!(manager.recover_unauthorized().await.is_ok());
    assert!(manager.recover_unauthorized().await.is_ok());
}
