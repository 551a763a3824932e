//! Integration tests for pagination helpers and streaming.

mod common;

use chrono::{TimeZone, Utc};
use common::{TestContext, TestResult, json_response, version_path};
use futures::StreamExt;
use serde_json::json;
use whoop::prelude::*;
use wiremock::{
    Mock,
    matchers::{method, path, query_param, query_param_is_missing},
};

async fn mount_three_pages(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path(version_path("/activity/sleep")))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("nextToken"))
        .respond_with(json_response(
            200,
            json!({"records": [{"id": 5, "user_id": 1}, {"id": 4, "user_id": 1}], "next_token": "page2"}),
        ))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path(version_path("/activity/sleep")))
        .and(query_param("limit", "2"))
        .and(query_param("nextToken", "page2"))
        .respond_with(json_response(
            200,
            json!({"records": [{"id": 3, "user_id": 1}, {"id": 2, "user_id": 1}], "next_token": "page3"}),
        ))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path(version_path("/activity/sleep")))
        .and(query_param("limit", "2"))
        .and(query_param("nextToken", "page3"))
        .respond_with(json_response(
            200,
            json!({"records": [{"id": 1, "user_id": 1}], "next_token": null}),
        ))
        .expect(1)
        .mount(&ctx.server)
        .await;
}

#[tokio::test]
#[test_log::test]
async fn test_collect_all_follows_tokens() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    mount_three_pages(&ctx).await;

    let params = RequestParams::new().limit(2);
    let all = ctx
        .client
        .sleep()
        .list_all(Some(&params))
        .await?
        .collect_all()
        .await?;
    let ids: Vec<i64> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    ctx.server.verify().await;
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_stream_matches_collect_all() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    mount_three_pages(&ctx).await;

    let params = RequestParams::new().limit(2);
    let mut stream = ctx
        .client
        .sleep()
        .list_all(Some(&params))
        .await?
        .into_stream();

    let mut streamed = Vec::new();
    while let Some(item) = stream.next().await {
        streamed.push(item?.id);
    }
    assert_eq!(streamed, vec![5, 4, 3, 2, 1]);
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_next_page() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    mount_three_pages(&ctx).await;

    let params = RequestParams::new().limit(2);
    let first = ctx.client.sleep().list_all(Some(&params)).await?;
    assert!(first.has_more());
    let second = first.next_page().await?.expect("second page");
    assert_eq!(second.records[0].id, 3);
    let third = second.next_page().await?.expect("third page");
    assert!(!third.has_more());
    assert!(third.next_page().await?.is_none());
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_stream_stops_at_error() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    Mock::given(method("GET"))
        .and(path(version_path("/cycle")))
        .and(query_param_is_missing("nextToken"))
        .respond_with(json_response(
            200,
            json!({"records": [{"id": 9, "user_id": 1}], "next_token": "broken"}),
        ))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path(version_path("/cycle")))
        .and(query_param("nextToken", "broken"))
        .respond_with(json_response(500, json!({"error": "boom"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let items: Vec<_> = ctx
        .client
        .cycles()
        .list_all(None)
        .await?
        .into_stream()
        .collect()
        .await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().map(|c| c.id).ok(), Some(9));
    let err = items[1].as_ref().expect_err("second page fails");
    assert_eq!(err.status(), Some(500));
    Ok(())
}

#[tokio::test]
#[test_log::test]
async fn test_time_range_query() -> TestResult<()> {
    let ctx = TestContext::new().await?;
    Mock::given(method("GET"))
        .and(path(version_path("/recovery")))
        .and(query_param("start", "2022-04-01T00:00:00Z"))
        .and(query_param("end", "2022-04-30T00:00:00Z"))
        .and(query_param("limit", "25"))
        .respond_with(json_response(200, json!({"records": [], "next_token": null})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let params = RequestParams::new()
        .start(Utc.with_ymd_and_hms(2022, 4, 1, 0, 0, 0).unwrap())
        .end(Utc.with_ymd_and_hms(2022, 4, 30, 0, 0, 0).unwrap())
        .limit(25);
    let page = ctx.client.recovery().list_all(Some(&params)).await?;
    assert!(page.is_empty());
    ctx.server.verify().await;
    Ok(())
}
