//! End-to-end checks over the mock feed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use polyarb::dashboard::{build_router, DashboardState};
use polyarb::engine::scanner::{run_scan, FeedStatus};
use polyarb::types::Urgency;

use crate::mock_feed::MockFeed;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_scan_finds_one_opportunity_per_tier_in_feed_order() {
    let feed = MockFeed::new();
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap();

    let report = run_scan(&feed, now).await;

    assert_eq!(report.feed, FeedStatus::Ok);
    assert_eq!(report.markets_seen, 7);

    let ids: Vec<&str> = report.opportunities.iter().map(|o| o.condition_id.as_str()).collect();
    assert_eq!(ids, vec!["0xmod", "0xsoon", "0xnow"]);

    let tiers: Vec<Urgency> = report.opportunities.iter().map(|o| o.urgency).collect();
    assert_eq!(tiers, vec![Urgency::Moderate, Urgency::Soon, Urgency::Immediate]);

    let first = &report.opportunities[0];
    assert_eq!(first.total, dec!(0.95));
    assert_eq!(first.arbitrage_margin, dec!(5.0));
    assert_eq!(report.opportunities[2].total, dec!(0.99));
    assert!(report.opportunities.iter().all(|o| o.timestamp == "2026-05-04T08:00:00.000000Z"));
}

#[tokio::test]
async fn test_consecutive_scans_are_independent() {
    let feed = MockFeed::new();
    let t0 = Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap();

    let a = run_scan(&feed, t0).await;
    let b = run_scan(&feed, t0 + Duration::seconds(10)).await;

    assert_eq!(feed.fetch_count(), 2);
    assert_eq!(a.opportunities.len(), b.opportunities.len());
    assert_ne!(a.opportunities[0].timestamp, b.opportunities[0].timestamp);
    assert_eq!(a.opportunities[0].arbitrage_margin, b.opportunities[0].arbitrage_margin);
}

#[tokio::test]
async fn test_feed_failure_is_recovered_as_empty_batch() {
    let feed = MockFeed::new();
    feed.fail_with(503);

    let report = run_scan(&feed, Utc::now()).await;

    assert!(report.opportunities.is_empty());
    assert_eq!(report.markets_seen, 0);
    assert!(matches!(report.feed, FeedStatus::Unavailable(_)));
}

#[tokio::test]
async fn test_json_endpoint_serves_list_then_status_object() {
    let feed = Arc::new(MockFeed::new());
    let state = Arc::new(DashboardState::new(feed.clone(), 10));

    let (status, body) = get(build_router(state.clone()), "/arbs?format=json").await;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[1]["question"], "Team A wins the final?");
    assert_eq!(list[1]["expected_duration"], "Could disappear in under a minute");

    feed.set_records(vec![json!({
        "outcomes": ["Yes", "No"], "outcomePrices": ["0.51", "0.50"]
    })]);
    let (_, body) = get(build_router(state), "/arbs?format=json").await;
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert!(v.is_object(), "empty scan must not be an empty list: {v}");
    assert_eq!(v["message"], "❌ No arbitrage opportunities right now.");
    assert!(v["checked_at"].as_str().unwrap().ends_with('Z'));

    assert_eq!(feed.fetch_count(), 2);
}

#[tokio::test]
async fn test_html_endpoint_escapes_market_text() {
    let feed = Arc::new(MockFeed::with_records(vec![json!({
        "question": "<b>Bold</b> & co",
        "outcomes": ["Yes", "No"], "outcomePrices": ["0.30", "0.30"]
    })]));
    let state = Arc::new(DashboardState::new(feed, 15));

    let (status, body) = get(build_router(state), "/arbs?format=html").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; co"));
    assert!(html.contains("Margin: 40%"));
    assert!(html.contains("content=\"15\""));
}

#[tokio::test]
async fn test_root_points_to_listing() {
    let state = Arc::new(DashboardState::new(Arc::new(MockFeed::new()), 10));
    let (status, body) = get(build_router(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["try"], "/arbs");
}
