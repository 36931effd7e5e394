/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Integration tests for lead-form submission.

mod test_helpers;

use axum::http::StatusCode;
use course_types::{
    responses::{APIResponse, OrderResponse},
    APIError,
};
use serde_json::json;
use test_helpers::*;
use tower::ServiceExt;

fn created() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::CREATED,
        json!({ "id": 1842, "payment_url": "https://pay.brj.example/1842" }),
    )
}

#[tokio::test]
async fn test_submit_order_success() {
    let brj = FakeUpstream::new(|_| created());
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let resp = app
        .oneshot(post_json("/api/proxy/order", &valid_lead()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: APIResponse<OrderResponse> = response_json(resp).await;
    assert!(body.success);
    assert_eq!(body.result.order_id, "1842");
    assert_eq!(
        body.result.payment_url.as_deref(),
        Some("https://pay.brj.example/1842")
    );

    let requests = brj.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, axum::http::Method::POST);
    assert_eq!(req.path, "/orders");
    assert_eq!(
        req.headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some(format!("Bearer {TEST_BRJ_KEY}").as_str())
    );
    assert!(req.headers.contains_key("idempotency-key"));
    assert_eq!(
        req.body.clone().unwrap(),
        json!({
            "product_id": "video-course-2099",
            "customer": {
                "name": "Jana Nováková",
                "email": "jana@example.com",
                "phone": "+420777123456"
            },
            "preferred_month": "2099-03",
            "note": "Mám vlastní kameru.",
            "consent": true,
            "source": "landing-page"
        })
    );
}

#[tokio::test]
async fn test_submit_order_validation_errors() {
    let brj = FakeUpstream::new(|_| created());
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let form = json!({
        "name": "Jana",
        "email": "jana(at)example.com",
        "phone": "12",
        "consent": false
    });
    let resp = app.oneshot(post_json("/api/proxy/order", &form)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: APIResponse<APIError> = response_json(resp).await;
    assert!(!body.success);
    assert_eq!(body.result.code, "VALIDATION_FAILED");
    let fields: Vec<(&str, &str)> = body
        .result
        .field_errors
        .iter()
        .map(|e| (e.field.as_str(), e.code.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("email", "INVALID_EMAIL"),
            ("phone", "INVALID_PHONE"),
            ("consent", "CONSENT_REQUIRED"),
        ]
    );
    assert_eq!(brj.hits(), 0);
}

#[tokio::test]
async fn test_submit_order_blank_contact_fields() {
    let brj = FakeUpstream::new(|_| created());
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let mut form = valid_lead();
    form["email"] = json!("");
    form["phone"] = json!("   ");
    let resp = app.oneshot(post_json("/api/proxy/order", &form)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: APIResponse<APIError> = response_json(resp).await;
    let fields: Vec<(&str, &str)> = body
        .result
        .field_errors
        .iter()
        .map(|e| (e.field.as_str(), e.code.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![("email", "INVALID_EMAIL"), ("phone", "INVALID_PHONE")]
    );
    assert_eq!(brj.hits(), 0);
}

#[tokio::test]
async fn test_submit_order_mistyped_field_uses_envelope() {
    let brj = FakeUpstream::new(|_| created());
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let mut form = valid_lead();
    form["consent"] = json!("yes");
    let resp = app.oneshot(post_json("/api/proxy/order", &form)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body: APIResponse<APIError> = response_json(resp).await;
    assert!(!body.success);
    assert_eq!(body.result.code, "VALIDATION_FAILED");
    assert!(body
        .result
        .engineering_error
        .as_deref()
        .is_some_and(|detail| detail.contains("consent")));
    assert_eq!(brj.hits(), 0);
}

#[tokio::test]
async fn test_submit_order_unreadable_body_uses_envelope() {
    let brj = FakeUpstream::new(|_| created());
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let broken = axum::http::Request::builder()
        .method("POST")
        .uri("/api/proxy/order")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{\"name\": \"Jana\""))
        .unwrap();
    let resp = app.clone().oneshot(broken).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "INVALID_BODY");

    let untyped = axum::http::Request::builder()
        .method("POST")
        .uri("/api/proxy/order")
        .body(axum::body::Body::from(valid_lead().to_string()))
        .unwrap();
    let resp = app.oneshot(untyped).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "INVALID_BODY");

    assert_eq!(brj.hits(), 0);
}

#[tokio::test]
async fn test_submit_order_retries_with_same_idempotency_key() {
    let brj = FakeUpstream::new(|index| {
        if index == 0 {
            (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "maintenance" }))
        } else {
            created()
        }
    });
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let resp = app
        .oneshot(post_json("/api/proxy/order", &valid_lead()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let requests = brj.requests();
    assert_eq!(requests.len(), 2);
    let key = |i: usize| requests[i].headers.get("idempotency-key").cloned();
    assert!(key(0).is_some());
    assert_eq!(key(0), key(1));
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_submit_order_rejected_by_brj() {
    let brj = FakeUpstream::fixed(
        StatusCode::BAD_REQUEST,
        json!({ "error": "unknown product" }),
    );
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let resp = app
        .oneshot(post_json("/api/proxy/order", &valid_lead()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(brj.hits(), 1);

    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "UPSTREAM_REJECTED");
}

#[tokio::test]
async fn test_submit_order_brj_down() {
    let brj = FakeUpstream::fixed(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    let url = brj.spawn().await;
    let app = build_app(&test_config(None, Some(&url), &[]));

    let resp = app
        .oneshot(post_json("/api/proxy/order", &valid_lead()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(brj.hits(), 3);

    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn test_submit_order_not_configured() {
    let app = build_app(&test_config(None, None, &[]));

    let resp = app
        .oneshot(post_json("/api/proxy/order", &valid_lead()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "NOT_CONFIGURED");
}

#[tokio::test]
async fn test_health() {
    let app = build_app(&test_config(None, None, &[]));

    let resp = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: APIResponse<course_types::responses::HealthResponse> = response_json(resp).await;
    assert_eq!(body.result.status, "ok");
}
