use crate::core::registry::VerifierRegistry;
use crate::domain::model::{Domain, VerificationRequest, VerificationResponse};
use crate::utils::error::VerificationError;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Duration;

/// existence/ownership 只接受 POST，activity 只接受 GET
pub fn allowed_method(domain: Domain) -> Method {
    if domain.requires_body() {
        Method::POST
    } else {
        Method::GET
    }
}

/// 將請求送往已註冊的 verifier，並套用固定期限
// registry 建立後唯讀，clone 只複製 Arc
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<VerifierRegistry>,
    verify_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: VerifierRegistry, verify_timeout: Duration) -> Self {
        Self {
            registry: Arc::new(registry),
            verify_timeout,
        }
    }

    pub fn registry(&self) -> &VerifierRegistry {
        &self.registry
    }

    pub async fn dispatch(
        &self,
        domain: &str,
        method: &Method,
        body: &[u8],
    ) -> Result<VerificationResponse, VerificationError> {
        let domain: Domain = domain.parse()?;

        let allowed = allowed_method(domain);
        if *method != allowed {
            return Err(VerificationError::MethodNotAllowed {
                domain: domain.to_string(),
                method: method.to_string(),
                allowed,
            });
        }

        let request = VerificationRequest::decode(domain, body)?;
        let verifier = self.registry.resolve(domain)?;

        tracing::info!(
            "Dispatching {} verification (asset: {})",
            domain,
            request.asset_id().unwrap_or("-")
        );

        let response =
            match tokio::time::timeout(self.verify_timeout, verifier.verify(request)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(VerificationError::VerifierFailure(format!(
                        "{} verifier timed out after {:?}",
                        domain, self.verify_timeout
                    )))
                }
            };

        // 回應格式必須與路由類別一致
        if response.domain() != domain {
            return Err(VerificationError::VerifierFailure(format!(
                "{} verifier returned a {} response",
                domain,
                response.domain()
            )));
        }

        Ok(response)
    }
}

pub async fn verify_handler(
    State(dispatcher): State<Dispatcher>,
    Path(domain): Path<String>,
    method: Method,
    body: Bytes,
) -> Response {
    match dispatcher.dispatch(&domain, &method, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::warn!("Verification request for '{}' failed: {}", domain, e.kind().as_str());
            e.into_response()
        }
    }
}

pub async fn health_handler(State(dispatcher): State<Dispatcher>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "domains": dispatcher.registry().domains(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ExistenceResponse, Score};
    use crate::domain::ports::Verifier;
    use async_trait::async_trait;

    struct SlowVerifier;

    #[async_trait]
    impl Verifier for SlowVerifier {
        fn domain(&self) -> Domain {
            Domain::Activity
        }

        async fn verify(
            &self,
            _request: VerificationRequest,
        ) -> Result<VerificationResponse, VerificationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(VerificationError::VerifierFailure("unreachable".into()))
        }
    }

    struct MisreportingVerifier;

    #[async_trait]
    impl Verifier for MisreportingVerifier {
        fn domain(&self) -> Domain {
            Domain::Activity
        }

        async fn verify(
            &self,
            _request: VerificationRequest,
        ) -> Result<VerificationResponse, VerificationError> {
            let score = Score::new(0.5)?;
            Ok(VerificationResponse::Existence(ExistenceResponse::new(score, score)))
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(VerifierRegistry::with_defaults(), Duration::from_secs(10))
    }

    #[test]
    fn test_allowed_methods() {
        assert_eq!(allowed_method(Domain::Existence), Method::POST);
        assert_eq!(allowed_method(Domain::Ownership), Method::POST);
        assert_eq!(allowed_method(Domain::Activity), Method::GET);
    }

    #[tokio::test]
    async fn test_dispatch_ownership() {
        let body = br#"{"assetId":"A1","did":"did:example:123"}"#;
        let response = dispatcher()
            .dispatch("ownership", &Method::POST, body)
            .await
            .unwrap();
        assert_eq!(response.domain(), Domain::Ownership);
    }

    #[tokio::test]
    async fn test_method_checked_before_decode() {
        let err = dispatcher()
            .dispatch("existence", &Method::GET, b"{")
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::MethodNotAllowed { .. }));
    }

    #[tokio::test]
    async fn test_unknown_and_unregistered_domains() {
        let err = dispatcher()
            .dispatch("valuation", &Method::POST, b"{}")
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::UnsupportedDomain(_)));

        let empty = Dispatcher::new(VerifierRegistry::new(), Duration::from_secs(1));
        let err = empty.dispatch("activity", &Method::GET, b"").await.unwrap_err();
        assert!(matches!(err, VerificationError::UnsupportedDomain(_)));
    }

    #[tokio::test]
    async fn test_slow_verifier_times_out() {
        let mut registry = VerifierRegistry::new();
        registry.register(Domain::Activity, Arc::new(SlowVerifier));
        let dispatcher = Dispatcher::new(registry, Duration::from_millis(50));

        let err = dispatcher
            .dispatch("activity", &Method::GET, b"")
            .await
            .unwrap_err();
        match err {
            VerificationError::VerifierFailure(msg) => assert!(msg.contains("timed out")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_response_of_other_domain_is_verifier_failure() {
        let mut registry = VerifierRegistry::new();
        registry.register(Domain::Activity, Arc::new(MisreportingVerifier));
        let dispatcher = Dispatcher::new(registry, Duration::from_secs(1));

        let err = dispatcher
            .dispatch("activity", &Method::GET, b"")
            .await
            .unwrap_err();
        match err {
            VerificationError::VerifierFailure(msg) => assert!(msg.contains("existence response")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
