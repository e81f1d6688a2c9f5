//! Authentication and role checks that reject a request before it reaches
//! the database.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, get, json_request, send, token_for};
use opphub_core::roles::Role;
use serde_json::json;

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (status, json) = send(build_test_app(), get("/api/live-opportunities", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let (status, json) = send(
        build_test_app(),
        get("/api/regions", Some("not-a-jwt")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn buyer_cannot_create_opportunities() {
    let token = token_for("B1", Role::Buyer);
    let request = json_request(
        "POST",
        "/api/live-opportunities",
        &token,
        json!({ "name": "Mill Lane" }),
    );

    let (status, json) = send(build_test_app(), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn seller_cannot_review() {
    let token = token_for("U1", Role::Seller);
    let request = json_request(
        "POST",
        "/api/live-opportunities/1/review",
        &token,
        json!({ "decision": "publish" }),
    );

    let (status, _) = send(build_test_app(), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn seller_has_no_shortlist() {
    let token = token_for("U1", Role::Seller);
    let (status, _) = send(build_test_app(), get("/api/shortlists", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_create_body_is_rejected_before_the_store() {
    let token = token_for("U1", Role::Seller);
    let request = json_request(
        "POST",
        "/api/live-opportunities",
        &token,
        json!({ "name": "Mill Lane", "plots": -3 }),
    );

    let (status, json) = send(build_test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn repeated_query_key_is_rejected_with_envelope() {
    let token = token_for("B1", Role::Buyer);
    let (status, json) = send(
        build_test_app(),
        get("/api/live-opportunities?regions=a&regions=b", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_id_is_rejected_with_envelope() {
    let token = token_for("B1", Role::Buyer);
    let (status, json) = send(
        build_test_app(),
        get("/api/live-opportunities/abc", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unparseable_body_is_rejected_with_envelope() {
    let token = token_for("A1", Role::Admin);
    let request = json_request(
        "POST",
        "/api/live-opportunities/1/review",
        &token,
        json!({ "decision": "approve" }),
    );

    let (status, json) = send(build_test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}
