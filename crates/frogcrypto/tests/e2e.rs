// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests over a real TCP listener.
//!
//! Each test starts the gateway on an ephemeral port in front of an isolated
//! TestHarness and talks plain HTTP/1.1 to it.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use frogcrypto_core::FrogError;
use frogcrypto_core::types::Biome;
use frogcrypto_gateway::{GatewayState, start_server};
use frogcrypto_test_utils::{TestHarness, feed, item};

struct Running {
    addr: SocketAddr,
    cancel: CancellationToken,
    server: JoinHandle<Result<(), FrogError>>,
}

async fn start(harness: &TestHarness) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let server = tokio::spawn(start_server(
        listener,
        GatewayState::new(harness.service.clone()),
        cancel.clone(),
    ));
    Running {
        addr,
        cancel,
        server,
    }
}

/// One request on a fresh connection; returns the status code and JSON body.
async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (u16, Value) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let payload = body.map(|b| b.to_string()).unwrap_or_default();
    let head = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n",
        payload.len()
    );
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(payload.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8(raw).unwrap();

    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    let body = text
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or_default();
    (status, serde_json::from_str(body).unwrap_or(Value::Null))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn full_grant_cycle_over_http() {
    let harness = TestHarness::builder()
        .with_items(vec![item(1, Biome::Desert, 1.0)])
        .build()
        .await
        .unwrap();
    let running = start(&harness).await;
    let addr = running.addr;

    let (status, body) = request(addr, "GET", "/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");

    let (status, _) = request(
        addr,
        "POST",
        "/frogcrypto/admin/feeds",
        Some(json!({
            "credential": harness.admin_credential(),
            "feeds": [feed("desert", &[Biome::Desert], 60)],
        })),
    )
    .await;
    assert_eq!(status, 200);

    let user = harness.user();
    let poll = json!({ "credential": harness.credential(&user) });
    let path = "/frogcrypto/feeds/desert/poll";
    let (status, body) = request(addr, "POST", path, Some(poll.clone())).await;
    assert_eq!(status, 200);
    assert_eq!(body["reward"]["reward"]["biome"], "Desert");

    let (status, body) = request(addr, "POST", path, Some(poll)).await;
    assert_eq!(status, 403);
    assert!(body["next_eligible_at"].is_i64());

    let (status, body) = request(addr, "GET", "/frogcrypto/scoreboard", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["scores"][0]["score"], 1);

    running.cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), running.server)
        .await
        .expect("server should stop after cancellation")
        .unwrap()
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_http_polls_grant_once() {
    let harness = TestHarness::builder()
        .with_items(vec![item(1, Biome::Swamp, 1.0)])
        .with_feeds(vec![feed("swamp", &[Biome::Swamp], 600)])
        .build()
        .await
        .unwrap();
    let running = start(&harness).await;
    let user = harness.user();
    let poll = json!({ "credential": harness.credential(&user) });

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let poll = poll.clone();
            let addr = running.addr;
            tokio::spawn(async move {
                request(addr, "POST", "/frogcrypto/feeds/swamp/poll", Some(poll)).await
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for attempt in attempts {
        statuses.push(attempt.await.unwrap().0);
    }
    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 1);
    assert!(statuses.iter().all(|s| [200, 403, 429].contains(s)));

    let score = harness
        .storage
        .get_score(&user.public_hex())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(score.score, 1);

    running.cancel.cancel();
}
