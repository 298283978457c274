mod common;

use std::time::Duration;

use axum::http::{Request, StatusCode};
use common::{response_json, test_app};
use tower::ServiceExt;

fn get(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn convert_multiplies_amount_by_rate() {
    let app = test_app(&[]);
    app.market.set_rate("bitcoin", "usd", 60000.0);

    let res = app
        .router()
        .oneshot(get("/api/convert?from_coin=bitcoin&to_currency=usd&amount=2.5"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["from_coin"], "bitcoin");
    assert_eq!(body["to_currency"], "usd");
    assert_eq!(body["amount"], 2.5);
    assert_eq!(body["conversion_rate"], 60000.0);
    assert_eq!(body["converted_amount"], 150000.0);
}

#[tokio::test]
async fn convert_lowercases_inputs_and_defaults_amount_to_one() {
    let app = test_app(&[]);
    app.market.set_rate("ethereum", "eur", 3000.0);

    let res = app
        .router()
        .oneshot(get("/api/convert?from_coin=Ethereum&to_currency=EUR"))
        .await
        .unwrap();

    let body = response_json(res).await;
    assert_eq!(body["from_coin"], "ethereum");
    assert_eq!(body["to_currency"], "eur");
    assert_eq!(body["amount"], 1.0);
    assert_eq!(body["converted_amount"], 3000.0);
}

#[tokio::test]
async fn same_source_and_target_is_rejected_without_upstream_call() {
    let app = test_app(&[]);

    for uri in [
        "/api/convert?from_coin=usd&to_currency=usd&amount=3",
        "/api/convert?from_coin=BTC&to_currency=btc",
    ] {
        let res = app.router().oneshot(get(uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = response_json(res).await;
        assert_eq!(
            body["error"],
            "Invalid request: from_coin and to_currency cannot be the same."
        );
    }

    assert_eq!(app.market.spot_calls(), 0);
}

#[tokio::test]
async fn second_call_within_ttl_is_served_from_cache() {
    let app = test_app(&[]);
    app.market.set_rate("bitcoin", "usd", 60000.0);

    let first = response_json(
        app.router()
            .oneshot(get("/api/convert?from_coin=bitcoin&to_currency=usd"))
            .await
            .unwrap(),
    )
    .await;

    // upstream moves, cached rate must not
    app.market.set_rate("bitcoin", "usd", 61000.0);

    let second = response_json(
        app.router()
            .oneshot(get("/api/convert?from_coin=bitcoin&to_currency=usd&amount=2"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["conversion_rate"], 60000.0);
    assert_eq!(second["conversion_rate"], 60000.0);
    assert_eq!(second["converted_amount"], 120000.0);
    assert_eq!(app.market.spot_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn expired_rate_is_fetched_again_exactly_once() {
    let app = test_app(&[("CONVERSION_CACHE_TTL_SECS", "60")]);
    app.market.set_rate("bitcoin", "usd", 60000.0);
    let uri = "/api/convert?from_coin=bitcoin&to_currency=usd";

    app.router().oneshot(get(uri)).await.unwrap();
    assert_eq!(app.market.spot_calls(), 1);

    tokio::time::advance(Duration::from_secs(61)).await;
    app.market.set_rate("bitcoin", "usd", 62000.0);

    let body = response_json(app.router().oneshot(get(uri)).await.unwrap()).await;
    assert_eq!(body["conversion_rate"], 62000.0);
    assert_eq!(app.market.spot_calls(), 2);

    app.router().oneshot(get(uri)).await.unwrap();
    assert_eq!(app.market.spot_calls(), 2);
}

#[tokio::test]
async fn unknown_pair_returns_not_available_error() {
    let app = test_app(&[]);

    let res = app
        .router()
        .oneshot(get("/api/convert?from_coin=notacoin&to_currency=usd"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["error"], "Conversion rate for notacoin to usd not available.");
}

#[tokio::test]
async fn upstream_failure_is_reported_as_error_payload() {
    let app = test_app(&[]);
    app.market.fail.store(true, std::sync::atomic::Ordering::SeqCst);

    let res = app
        .router()
        .oneshot(get("/api/convert?from_coin=bitcoin&to_currency=usd"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    let msg = body["error"].as_str().unwrap();
    assert!(msg.starts_with("Failed to fetch conversion rate"));
}

#[tokio::test]
async fn missing_or_malformed_params_return_error_payload() {
    let app = test_app(&[]);

    let res = app
        .router()
        .oneshot(get("/api/convert?to_currency=usd"))
        .await
        .unwrap();
    let body = response_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("from_coin"));

    let res = app
        .router()
        .oneshot(get("/api/convert?from_coin=bitcoin&to_currency=usd&amount=lots"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));

    assert_eq!(app.market.spot_calls(), 0);
}
