use crate::e2e::helpers;

use chrono::{DateTime, Duration, Utc};
use helpers::api_client::{cartesia_headers, TEST_API_KEY};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_token_endpoint(ctx: &TestContext, expected_body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/access-token"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok_short_lived_abc" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_tts_preset_token_with_defaults(ctx: &TestContext) {
    mount_token_endpoint(
        ctx,
        json!({ "permissions": { "tts": true, "stt": false }, "expires_in": 3600 }),
    )
    .await;

    let before = Utc::now();
    let response = ctx
        .client
        .post_cartesia("/cartesia/auth/access-token/tts", &json!({}))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["access_token"], "tok_short_lived_abc");
    assert_eq!(data["token_type"], "Bearer");
    assert_eq!(data["expires_in"], 3600);
    assert_eq!(data["permissions"], json!({ "tts": true, "stt": false }));

    let expires_at: DateTime<Utc> = data["expires_at"].as_str().unwrap().parse().unwrap();
    assert!(expires_at >= before + Duration::seconds(3600));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_full_preset_with_requested_expiry(ctx: &TestContext) {
    mount_token_endpoint(
        ctx,
        json!({ "permissions": { "tts": true, "stt": true }, "expires_in": 600 }),
    )
    .await;

    let response = ctx
        .client
        .post_cartesia("/cartesia/auth/access-token/full", &json!({ "expires_in": 600 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.body.as_ref().unwrap()["data"]["expires_in"], 600);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_preset_expiry_over_one_hour(ctx: &TestContext) {
    let response = ctx
        .client
        .post_cartesia("/cartesia/auth/access-token/stt", &json!({ "expires_in": 7200 }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "not exceeding 3600 seconds");
    assert_eq!(ctx.upstream_calls().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_custom_token(ctx: &TestContext) {
    mount_token_endpoint(
        ctx,
        json!({ "permissions": { "tts": false, "stt": true }, "expires_in": 120 }),
    )
    .await;

    let response = ctx
        .client
        .post_cartesia(
            "/cartesia/auth/access-token",
            &json!({ "permissions": { "stt": true }, "expires_in": 120 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.body.as_ref().unwrap()["data"]["permissions"],
        json!({ "tts": false, "stt": true })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_custom_token_without_any_permission(ctx: &TestContext) {
    let response = ctx
        .client
        .post_cartesia(
            "/cartesia/auth/access-token",
            &json!({ "permissions": { "tts": false, "stt": false }, "expires_in": 120 }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "At least one permission must be set to true");
    assert_eq!(ctx.upstream_calls().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_upstream_auth_errors(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/access-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad key" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .client
        .post_cartesia("/cartesia/auth/access-token/tts", &json!({}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error(
            "UPSTREAM_ERROR",
            "Cartesia Auth API error: Invalid or expired auth token",
        );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_headers_for_token_issuance(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/cartesia/auth/access-token/tts", &json!({}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "Cartesia-Version header is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_validate_token_locally(ctx: &TestContext) {
    let expires_at = (Utc::now() + Duration::minutes(10)).to_rfc3339();

    let response = ctx
        .client
        .post(
            "/cartesia/auth/validate-token",
            &json!({ "access_token": "tok_short_lived_abc", "expires_at": expires_at }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["valid"], true);
    assert_eq!(body["is_expired"], false);
    assert!(body["permissions"].is_null());
    assert!(body["checked_at"].is_string());
    assert_eq!(ctx.upstream_calls().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_flag_expired_and_malformed_tokens(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/cartesia/auth/validate-token",
            &json!({ "access_token": "tok_short_lived_abc", "expires_at": "yesterday" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["is_expired"], true);
    assert_eq!(response.body.as_ref().unwrap()["valid"], false);

    let response = ctx
        .client
        .post_with_headers(
            "/cartesia/auth/validate-token",
            &json!({ "access_token": "short" }),
            &cartesia_headers(),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.as_ref().unwrap(),
        &json!({ "success": false, "valid": false, "reason": "Invalid token format" })
    );
}
