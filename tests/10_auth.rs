mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{TestApp, TOKEN};
use serde_json::json;

#[tokio::test]
async fn missing_token_is_rejected_before_handler() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .request(Method::POST, "/api/users", None, Some(common::user_body("Eve")))
        .await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    let body = res.body.expect("json body");
    assert_eq!(body["error"], "Unauthorized. Token is missing.");
    assert!(app.store.is_empty().await, "handler must not run");
    Ok(())
}

#[tokio::test]
async fn invalid_token_is_rejected() -> Result<()> {
    let app = TestApp::new();

    for header in ["Bearer wrong", "wrong", "Bearer", "", "Token test-secret-token"] {
        let res = app.request(Method::GET, "/api/users", Some(header), None).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "header {:?}", header);
        assert_eq!(
            res.body.expect("json body")["error"],
            "Unauthorized. Invalid token.",
            "header {:?}",
            header
        );
    }
    Ok(())
}

#[tokio::test]
async fn accepts_token_with_or_without_bearer_prefix() -> Result<()> {
    let app = TestApp::new();

    let variants = [
        format!("Bearer {}", TOKEN),
        format!("bEaReR {}", TOKEN),
        TOKEN.to_string(),
        format!("Bearer   {}", TOKEN),
    ];
    for header in &variants {
        let res = app.request(Method::GET, "/api/users", Some(header), None).await?;
        assert_eq!(res.status, StatusCode::OK, "header {:?}", header);
    }
    Ok(())
}

#[tokio::test]
async fn swagger_paths_bypass_the_gate() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .request(Method::GET, "/swagger/v1/swagger.json", None, None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let doc = res.body.expect("openapi document");
    assert!(doc["paths"]["/api/users"].is_object());

    // Unknown paths under the prefix reach routing instead of the gate.
    let res = app
        .request(Method::GET, "/swagger/index.html", Some("Bearer wrong"), None)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn exempt_prefix_match_is_case_sensitive() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .request(Method::GET, "/SWAGGER/v1/swagger.json", None, None)
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn gate_also_covers_metadata_routes() -> Result<()> {
    let app = TestApp::new();

    let res = app.request(Method::GET, "/health", None, None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.call(Method::GET, "/health", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.expect("json body")["status"], json!("ok"));

    let res = app.call(Method::GET, "/", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.expect("json body")["name"], "User Management API");
    Ok(())
}
