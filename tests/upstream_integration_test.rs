use httpmock::prelude::*;
use oracle_node::adapters::UpstreamVerifier;
use oracle_node::core::{Domain, VerificationRequest, VerificationResponse, Verifier};
use oracle_node::domain::model::{ExistenceRequest, OwnershipRequest};
use oracle_node::utils::error::ErrorKind;
use oracle_node::{OracleConfig, VerifierRegistry};
use std::time::Duration;

fn ownership_request() -> VerificationRequest {
    VerificationRequest::Ownership(OwnershipRequest {
        asset_id: "A1".to_string(),
        did: "did:example:123".to_string(),
    })
}

#[tokio::test]
async fn test_upstream_ownership_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/ownership")
                .json_body(serde_json::json!({"assetId": "A1", "did": "did:example:123"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"probability": 0.64, "verified": true}));
        })
        .await;

    let verifier =
        UpstreamVerifier::new(Domain::Ownership, &server.url("/ownership"), Duration::from_secs(5))
            .unwrap();
    let response = verifier.verify(ownership_request()).await.unwrap();

    mock.assert_async().await;
    match response {
        VerificationResponse::Ownership(r) => {
            assert_eq!(r.probability.value(), 0.64);
            assert!(r.verified);
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_activity_uses_get() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/signals");
            then.status(200).json_body(serde_json::json!({
                "activityScore": 0.4,
                "signals": ["footfall"]
            }));
        })
        .await;

    let verifier =
        UpstreamVerifier::new(Domain::Activity, &server.url("/signals"), Duration::from_secs(5))
            .unwrap();
    let response = verifier.verify(VerificationRequest::Activity).await.unwrap();

    mock.assert_async().await;
    match response {
        VerificationResponse::Activity(r) => assert_eq!(r.signals, vec!["footfall"]),
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_error_status_is_verifier_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/existence");
            then.status(503);
        })
        .await;

    let verifier =
        UpstreamVerifier::new(Domain::Existence, &server.url("/existence"), Duration::from_secs(5))
            .unwrap();
    let request = VerificationRequest::Existence(ExistenceRequest {
        asset_id: "A1".to_string(),
        location: serde_json::Map::new(),
    });

    let err = verifier.verify(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VerifierFailure);
}

#[tokio::test]
async fn test_upstream_connection_refused_is_verifier_failure() {
    // 先佔用再釋放一個埠，確保沒有服務在監聽
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let verifier = UpstreamVerifier::new(
        Domain::Ownership,
        &format!("http://127.0.0.1:{}/ownership", port),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = verifier.verify(ownership_request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VerifierFailure);
}

#[tokio::test]
async fn test_upstream_non_json_body_is_verifier_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ownership");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<html>maintenance</html>");
        })
        .await;

    let verifier =
        UpstreamVerifier::new(Domain::Ownership, &server.url("/ownership"), Duration::from_secs(5))
            .unwrap();

    let err = verifier.verify(ownership_request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VerifierFailure);
}

#[tokio::test]
async fn test_upstream_wrong_shape_is_verifier_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/existence");
            then.status(200)
                .json_body(serde_json::json!({"score": 0.5, "status": "pending"}));
        })
        .await;

    let verifier =
        UpstreamVerifier::new(Domain::Existence, &server.url("/existence"), Duration::from_secs(5))
            .unwrap();
    let request = VerificationRequest::Existence(ExistenceRequest {
        asset_id: "A1".to_string(),
        location: serde_json::Map::new(),
    });

    let err = verifier.verify(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VerifierFailure);
}

#[tokio::test]
async fn test_upstream_out_of_range_score_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ownership");
            then.status(200)
                .json_body(serde_json::json!({"probability": 1.7, "verified": true}));
        })
        .await;

    let verifier =
        UpstreamVerifier::new(Domain::Ownership, &server.url("/ownership"), Duration::from_secs(5))
            .unwrap();

    let err = verifier.verify(ownership_request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VerifierFailure);
}

#[tokio::test]
async fn test_registry_from_config_routes_to_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/ownership");
            then.status(200)
                .json_body(serde_json::json!({"probability": 0.2, "verified": false}));
        })
        .await;

    let config = OracleConfig {
        ownership_upstream: Some(server.url("/ownership")),
        ..Default::default()
    };
    let registry = VerifierRegistry::from_config(&config).unwrap();

    let verifier = registry.resolve(Domain::Ownership).unwrap();
    let response = verifier.verify(ownership_request()).await.unwrap();
    mock.assert_async().await;
    match response {
        VerificationResponse::Ownership(r) => assert!(!r.verified),
        other => panic!("unexpected response: {:?}", other),
    }

    // 未設定上游的類別仍使用靜態 verifier
    let activity = registry.resolve(Domain::Activity).unwrap();
    assert!(activity.verify(VerificationRequest::Activity).await.is_ok());
}
