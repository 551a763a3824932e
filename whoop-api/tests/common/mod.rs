//! Shared test utilities for whoop integration tests
//!
//! Each test gets its own wiremock server and a client pointed at it, with a manual clock
//! so rate limit windows can be checked without sleeping.
#![cfg(test)]
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use whoop::prelude::*;
use whoop::test_util::{ManualClock, mock_client};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub use whoop::test_util::{TestError, TestResult};

pub struct TestContext {
    pub server: MockServer,
    pub clock: Arc<ManualClock>,
    pub client: WhoopClient,
}

impl TestContext {
    pub async fn new() -> TestResult<Self> {
        let server = MockServer::start().await;
        let clock = Arc::new(ManualClock::fixed());
        let client = mock_client(&format!("{}/developer/", server.uri()), clock.clone())?;
        Ok(Self {
            server,
            clock,
            client,
        })
    }

    /// Serves `body` for GET `api_path` (path below the version segment, e.g. "/cycle/1").
    pub async fn mock_get(&self, api_path: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(version_path(api_path)))
            .respond_with(json_response(200, body))
            .mount(&self.server)
            .await;
    }
}

/// Full server-side path for an api path
pub fn version_path(api_path: &str) -> String {
    format!("/developer/v1{api_path}")
}

pub fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

pub fn with_rate_headers(template: ResponseTemplate, remaining: i64, reset: i64) -> ResponseTemplate {
    template
        .insert_header("X-RateLimit-Limit", "100")
        .insert_header("X-RateLimit-Remaining", remaining.to_string().as_str())
        .insert_header("X-RateLimit-Reset", reset.to_string().as_str())
}
