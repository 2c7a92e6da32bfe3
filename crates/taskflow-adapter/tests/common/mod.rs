/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for taskflow-adapter tests

use taskflow_adapter::{ClientConfig, TaskflowClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock session token for testing
pub fn mock_jwt_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.signature".to_string()
}

/// Client pointed at the mock server with a session token installed
pub fn authed_client(server: &MockServer) -> TaskflowClient {
    let client = TaskflowClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    client.set_token(mock_jwt_token());
    client
}

/// Task body in the wire format of the task API
#[allow(dead_code)]
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
