//! Shared fixtures: a fake school backend served on an ephemeral port

#![allow(dead_code)]

use axum::Router;
use schoolboard::prelude::*;
use schoolboard::telemetry::init_test_tracing;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const STUDENT_ID: &str = "676cf56dfd1eb1caa8426205";
pub const PARENT_ID: &str = "p-42";

/// Serve `router` on 127.0.0.1 and return its base URL
pub async fn serve(router: Router) -> String {
    init_test_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Configuration pointing at `base_url` with the test identities
pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ClientConfig::default_config()
    }
    .with_identity(STUDENT_ID, PARENT_ID)
}

pub fn context(base_url: &str) -> PageContext {
    PageContext::from_config(config(base_url)).unwrap()
}

/// A base URL nothing listens on
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Homework records: six of class 5 and six of class 6, alternating
pub fn twelve_homeworks() -> Vec<Value> {
    (0..12)
        .map(|i| {
            json!({
                "_id": format!("hw{:02}", i),
                "homeworkTitle": format!("Homework {}", i),
                "description": "Read chapter",
                "homeworkDate": "2024-03-01",
                "submissionDate": "2024-03-08",
                "marks": 10,
                "status": "Not Submitted",
                "class": if i % 2 == 0 { "5" } else { "6" },
                "section": if i < 6 { "A" } else { "B" },
                "createdAt": "2024-02-28T09:00:00.000Z"
            })
        })
        .collect()
}
