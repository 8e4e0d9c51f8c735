use crate::adapters::mismatched;
use crate::domain::model::{
    ActivityResponse, Domain, ExistenceResponse, OwnershipResponse, Score, VerificationRequest,
    VerificationResponse,
};
use crate::domain::ports::Verifier;
use crate::utils::error::{OracleError, Result, VerificationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

// 上游只回傳分數；timestamp 由本節點產生

#[derive(Debug, Deserialize)]
struct ExistenceAssessment {
    score: Score,
    confidence: Score,
}

#[derive(Debug, Deserialize)]
struct OwnershipAssessment {
    probability: Score,
    verified: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityAssessment {
    activity_score: Score,
    #[serde(default)]
    signals: Vec<String>,
}

/// 轉發至外部 oracle；任何上游錯誤都回 VerifierFailure
pub struct UpstreamVerifier {
    domain: Domain,
    endpoint: String,
    client: Client,
}

impl UpstreamVerifier {
    pub fn new(domain: Domain, endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::ConfigError {
                message: format!("failed to build HTTP client for {}: {}", domain, e),
            })?;

        Ok(Self {
            domain,
            endpoint: endpoint.to_string(),
            client,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: &VerificationRequest,
    ) -> std::result::Result<T, VerificationError> {
        let builder = match request {
            VerificationRequest::Existence(req) => self.client.post(&self.endpoint).json(req),
            VerificationRequest::Ownership(req) => self.client.post(&self.endpoint).json(req),
            VerificationRequest::Activity => self.client.get(&self.endpoint),
        };

        tracing::debug!("Calling {} upstream: {}", self.domain, self.endpoint);
        let response = builder.send().await.map_err(|e| {
            VerificationError::VerifierFailure(format!(
                "request to {} failed: {}",
                self.endpoint, e
            ))
        })?;

        let status = response.status();
        tracing::debug!("Upstream response status: {}", status);
        if !status.is_success() {
            return Err(VerificationError::VerifierFailure(format!(
                "upstream {} returned {}",
                self.endpoint, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            VerificationError::VerifierFailure(format!(
                "invalid payload from {}: {}",
                self.endpoint, e
            ))
        })
    }
}

#[async_trait]
impl Verifier for UpstreamVerifier {
    fn domain(&self) -> Domain {
        self.domain
    }

    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> std::result::Result<VerificationResponse, VerificationError> {
        if request.domain() != self.domain {
            return Err(mismatched(self.domain, &request));
        }

        let response = match self.domain {
            Domain::Existence => {
                let a: ExistenceAssessment = self.fetch(&request).await?;
                VerificationResponse::Existence(ExistenceResponse::new(a.score, a.confidence))
            }
            Domain::Ownership => {
                let a: OwnershipAssessment = self.fetch(&request).await?;
                VerificationResponse::Ownership(OwnershipResponse::new(a.probability, a.verified))
            }
            Domain::Activity => {
                let a: ActivityAssessment = self.fetch(&request).await?;
                VerificationResponse::Activity(ActivityResponse::new(a.activity_score, a.signals))
            }
        };

        Ok(response)
    }
}
