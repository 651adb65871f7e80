//! Loopback integration tests for the location client.
//!
//! Each test spins up real Axum servers on ephemeral localhost ports
//! so `reqwest` exercises the full HTTP path, including per-call
//! timeouts against servers that never answer.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::time::Duration;

use axum::routing::{get, post};
use axum::{Json, Router};
use warmind_client::{ClientError, LocationClient, Roster};
use warmind_types::{
    Action, Allegiance, Faction, LocationId, LocationKind, LocationState, Position,
};

const CALL_TIMEOUT: Duration = Duration::from_millis(300);
const FETCH_TIMEOUT: Duration = Duration::from_millis(800);

fn state_of(id: &str) -> LocationState {
    LocationState {
        id: LocationId::from(id),
        name: String::new(),
        owner: Allegiance::Neutral,
        kind: LocationKind::Village,
        resources: 10,
        army_strength: 0,
        position: Position { x: 50.0, y: 50.0 },
    }
}

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A location server that answers its state endpoint normally.
async fn spawn_responsive(id: &str) -> String {
    let state = state_of(id);
    spawn(Router::new().route("/state", get(move || async move { Json(state.clone()) }))).await
}

/// A location server that accepts connections but never answers.
async fn spawn_hung() -> String {
    spawn(Router::new().route(
        "/state",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "too late"
        }),
    ))
    .await
}

fn roster_of(entries: Vec<(&str, String)>) -> Roster {
    Roster::new(
        entries
            .into_iter()
            .map(|(id, url)| (LocationId::from(id), url))
            .collect::<BTreeMap<_, _>>(),
    )
}

#[tokio::test]
async fn partial_failure_yields_a_partial_snapshot() {
    let mut entries = Vec::new();
    for id in ["village_1", "village_2", "village_3", "village_4"] {
        entries.push((id, spawn_responsive(id).await));
    }
    entries.push(("village_5", spawn_hung().await));

    let client = LocationClient::new(roster_of(entries), CALL_TIMEOUT, FETCH_TIMEOUT);
    let snapshot = client.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.len(), 4);
    assert!(snapshot.get(&LocationId::from("village_5")).is_none());
}

#[tokio::test]
async fn all_hung_is_a_total_failure() {
    let mut entries = Vec::new();
    for id in ["village_1", "village_2", "village_3"] {
        entries.push((id, spawn_hung().await));
    }

    let client = LocationClient::new(roster_of(entries), CALL_TIMEOUT, FETCH_TIMEOUT);
    let error = client.fetch_snapshot().await.unwrap_err();
    assert!(matches!(error, ClientError::FetchTotalFailure));
}

#[tokio::test]
async fn unreachable_servers_are_a_total_failure() {
    // Nothing listens on these ports; connects are refused outright.
    let roster = roster_of(vec![
        ("village_1", "http://127.0.0.1:1".to_owned()),
        ("village_2", "http://127.0.0.1:1".to_owned()),
    ]);
    let client = LocationClient::new(roster, CALL_TIMEOUT, FETCH_TIMEOUT);
    let error = client.fetch_snapshot().await.unwrap_err();
    assert!(matches!(error, ClientError::FetchTotalFailure));
}

#[tokio::test]
async fn execute_accepts_a_success_reply() {
    let base = spawn(Router::new().route(
        "/collect_resources",
        post(|| async { Json(serde_json::json!({"success": true})) }),
    ))
    .await;
    let client = LocationClient::new(
        roster_of(vec![("village_1", base)]),
        CALL_TIMEOUT,
        FETCH_TIMEOUT,
    );

    let action = Action::CollectResources {
        location: LocationId::from("village_1"),
    };
    client.execute(Faction::Northern, &action).await.unwrap();
}

#[tokio::test]
async fn execute_surfaces_a_reported_failure() {
    let base = spawn(Router::new().route(
        "/attack",
        post(|| async {
            Json(serde_json::json!({"success": false, "message": "garrison holds"}))
        }),
    ))
    .await;
    let client = LocationClient::new(
        roster_of(vec![("village_1", base)]),
        CALL_TIMEOUT,
        FETCH_TIMEOUT,
    );

    let action = Action::Attack {
        target: LocationId::from("village_1"),
    };
    let error = client.execute(Faction::Southern, &action).await.unwrap_err();
    match error {
        ClientError::ActionFailed { reason, .. } => assert_eq!(reason, "garrison holds"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn execute_rejects_off_roster_targets() {
    let client = LocationClient::new(roster_of(Vec::new()), CALL_TIMEOUT, FETCH_TIMEOUT);
    let action = Action::Reinforce {
        target: LocationId::from("village_9"),
    };
    let error = client.execute(Faction::Northern, &action).await.unwrap_err();
    assert!(matches!(error, ClientError::UnknownLocation { .. }));
}
