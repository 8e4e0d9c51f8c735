use crate::adapters::{fixed, mismatched};
use crate::domain::model::{
    Domain, Evidence, OwnershipResponse, Score, VerificationRequest, VerificationResponse,
};
use crate::domain::ports::Verifier;
use crate::utils::error::VerificationError;
use async_trait::async_trait;

/// 比對聲明的擁有者 DID 與登記紀錄
pub struct OwnershipVerifier {
    evidence: Vec<Evidence>,
    threshold: f64,
}

impl OwnershipVerifier {
    pub fn new(evidence: Vec<Evidence>, threshold: f64) -> Self {
        Self {
            evidence,
            threshold,
        }
    }
}

impl Default for OwnershipVerifier {
    fn default() -> Self {
        Self::new(
            vec![Evidence::new(
                "property registry",
                "registry record matches owner",
                fixed(0.88),
            )],
            0.5,
        )
    }
}

#[async_trait]
impl Verifier for OwnershipVerifier {
    fn domain(&self) -> Domain {
        Domain::Ownership
    }

    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError> {
        let VerificationRequest::Ownership(req) = &request else {
            return Err(mismatched(Domain::Ownership, &request));
        };

        tracing::debug!("Checking ownership of {} for {}", req.asset_id, req.did);

        let probability = Score::mean(&self.evidence).ok_or_else(|| {
            VerificationError::VerifierFailure("no registry evidence available".to_string())
        })?;
        let verified = probability.value() >= self.threshold;

        Ok(VerificationResponse::Ownership(OwnershipResponse::new(
            probability,
            verified,
        )))
    }
}
