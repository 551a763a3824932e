//! Error classification for failed calls.

mod common;

use common::{TestContext, TestResult, version_path};
use serde_json::json;
use whoop::prelude::*;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
#[test_log::test]
async fn test_bad_request() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    Mock::given(method("GET"))
        .and(path(version_path("/cycle")))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad input"))
        .mount(&ctx.server)
        .await;

    let err = ctx.client.cycles().list_all(None).await.expect_err("400");
    match err {
        WhoopError::ApiError { code, message, .. } => {
            assert_eq!(code, 400);
            assert_eq!(message, "bad input");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
    assert_eq!(ctx.client.http_metrics().errors, 1);
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_unexpected_json_is_deserialization_error() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    ctx.mock_get("/activity/sleep/1", json!({"id": "not-a-number"}))
        .await;

    let err = ctx.client.sleep().get_one(1).await.expect_err("bad shape");
    assert!(matches!(err, WhoopError::Deserialization { .. }), "{err:?}");
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_unknown_score_state_decodes() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    ctx.mock_get(
        "/cycle/5",
        json!({"id": 5, "user_id": 1, "score_state": "RECALCULATING"}),
    )
    .await;

    let cycle = ctx.client.cycles().get_one(5).await?;
    assert_eq!(cycle.score_state, Some(ScoreState::Unknown));
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_connection_refused_is_http_error() -> TestResult<()> {
    // nothing listens on port 9 of localhost in the test environment
    let client = whoop::test_util::mock_client(
        "http://127.0.0.1:9/developer/",
        std::sync::Arc::new(whoop::test_util::ManualClock::fixed()),
    )?;
    let err = client.user().profile().await.expect_err("no server");
    assert!(matches!(err, WhoopError::Http { .. }), "{err:?}");
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_access_token_is_sent() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    Mock::given(method("GET"))
        .and(path(version_path("/user/profile/basic")))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": 7, "email": "a@b.c", "first_name": "a", "last_name": "b"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let config = ClientConfig::default().base_url(format!("{}/developer", ctx.server.uri()));
    let client = WhoopClient::with_access_token("secret-token", config)?;
    assert_eq!(client.user().profile().await?.user_id, 7);
    Ok(())
}
