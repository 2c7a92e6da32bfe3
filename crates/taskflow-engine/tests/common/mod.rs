/*
[INPUT]:  Test scenarios needing actors, seeded backends and mock servers
[OUTPUT]: Shared test utilities and fixtures
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for taskflow-engine tests

#![allow(dead_code)]

use taskflow_adapter::{ActivityType, Actor, ClientConfig, Role, Task, TaskflowClient};
use wiremock::MockServer;

pub fn member(id: &str) -> Actor {
    Actor::new(id, Role::Member)
}

pub fn manager(id: &str) -> Actor {
    Actor::new(id, Role::Manager)
}

/// Number of `status_changed` entries in a task's activity log
pub fn status_change_count(task: &Task) -> usize {
    task.activity_log
        .iter()
        .filter(|entry| entry.kind == ActivityType::StatusChanged)
        .count()
}

/// Client pointed at the mock server with a session token installed
pub fn authed_client(server: &MockServer) -> TaskflowClient {
    let client = TaskflowClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    client.set_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.signature");
    client
}

/// Task body in the wire format of the task API
pub fn task_body(id: &str, status: &str, log: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": "Prepare quarterly report",
        "status": status,
        "priority": "HIGH",
        "dueDate": "2024-03-01T12:00:00Z",
        "creatorId": "user-1",
        "assigneeIds": ["user-2"],
        "activityLog": log,
    })
}
