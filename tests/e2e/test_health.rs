use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    assert_eq!(response.text(), "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_cold_cache_before_first_request(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("cache").and_then(|v| v.as_str()), Some("cold"));
    assert_eq!(body.get("feeds_configured").and_then(|v| v.as_u64()), Some(2));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_warm_cache_after_events_are_served(ctx: &TestContext) {
    ctx.client.get("/events").await.unwrap().assert_status(StatusCode::OK);

    let response = ctx.client.get("/health/ready").await.unwrap();
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("cache").and_then(|v| v.as_str()), Some("warm"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_fetch_feeds_for_health_checks(ctx: &TestContext) {
    ctx.client.get("/health").await.unwrap();
    ctx.client.get("/health/ready").await.unwrap();

    assert_eq!(ctx.upstream.hits(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}
