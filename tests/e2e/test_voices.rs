use crate::e2e::helpers;

use helpers::api_client::{API_VERSION, TEST_API_KEY};
use helpers::{TestContext, VOICE_ID};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn voice_listing() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": VOICE_ID,
                "name": "Calm Narrator",
                "description": "Warm and even",
                "gender": "feminine",
                "language": "en",
                "is_owner": false,
                "created_at": "2025-01-15T10:00:00Z"
            },
            { "id": "v2", "description": null, "language": ["en", "fr"] }
        ],
        "has_more": true,
        "next_page": VOICE_ID,
        "total": 7
    })
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_gender_without_calling_upstream(ctx: &TestContext) {
    let response = ctx
        .client
        .get_cartesia("/cartesia/voices?gender=unknown")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "Invalid gender: unknown");
    assert_eq!(ctx.upstream_calls().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_out_of_range_limit(ctx: &TestContext) {
    let response = ctx
        .client
        .get_cartesia("/cartesia/voices?limit=250")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "Limit must be an integer between 1 and 100");
    assert_eq!(ctx.upstream_calls().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_listing_query_and_relay_response(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/voices"))
        .and(query_param("limit", "10"))
        .and(query_param("gender", "feminine"))
        .and(query_param("is_owner", "false"))
        .and(query_param("expand[]", "is_starred"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(header("cartesia-version", API_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(voice_listing()))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .client
        .get_cartesia("/cartesia/voices?limit=10&gender=feminine&is_owner=no&expand%5B%5D=is_starred&foo=bar")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    // The provider's page comes back exactly as sent, nulls and unknown fields included
    assert_eq!(response.body.as_ref().unwrap(), &voice_listing());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_version_header(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers(
            "/cartesia/voices",
            &[("Authorization", format!("Bearer {}", TEST_API_KEY))],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "Cartesia-Version header is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_other_api_versions(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers(
            "/cartesia/voices",
            &[
                ("Authorization", format!("Bearer {}", TEST_API_KEY)),
                ("Cartesia-Version", "2024-06-10".to_string()),
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("VALIDATION_ERROR", "Expected: 2025-04-16");
    assert_eq!(ctx.upstream_calls().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_bearer_credential(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers(
            "/cartesia/voices",
            &[("Cartesia-Version", API_VERSION.to_string())],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error("UNAUTHORIZED", "Authorization header is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_relay_upstream_auth_failures(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/voices"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx.client.get_cartesia("/cartesia/voices").await.unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error("UPSTREAM_ERROR", "Cartesia API error: Invalid API key");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fetch_single_voice(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path(format!("/voices/{}", VOICE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": VOICE_ID,
            "name": "Calm Narrator",
            "language": "en"
        })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .client
        .get_cartesia(&format!("/cartesia/voices/{}", VOICE_ID))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["id"], VOICE_ID);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_pass_through_voice_not_found(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/voices/missing-voice"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Voice not found" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .client
        .get_cartesia("/cartesia/voices/missing-voice")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error("UPSTREAM_ERROR", "Failed to fetch voice: Voice not found");
}
