use crate::adapters::{fixed, mismatched};
use crate::domain::model::{
    Domain, Evidence, ExistenceResponse, Score, VerificationRequest, VerificationResponse,
};
use crate::domain::ports::Verifier;
use crate::utils::error::VerificationError;
use async_trait::async_trait;

/// 確認資產存在於聲明的位置
pub struct ExistenceVerifier {
    evidence: Vec<Evidence>,
    confidence: Score,
}

impl ExistenceVerifier {
    pub fn new(evidence: Vec<Evidence>, confidence: Score) -> Self {
        Self {
            evidence,
            confidence,
        }
    }
}

impl Default for ExistenceVerifier {
    fn default() -> Self {
        Self::new(
            vec![
                Evidence::new("satellite", "building footprint detected", fixed(0.95)),
                Evidence::new("vision", "structure visible in street imagery", fixed(0.95)),
            ],
            fixed(0.90),
        )
    }
}

#[async_trait]
impl Verifier for ExistenceVerifier {
    fn domain(&self) -> Domain {
        Domain::Existence
    }

    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError> {
        let VerificationRequest::Existence(req) = &request else {
            return Err(mismatched(Domain::Existence, &request));
        };

        tracing::debug!(
            "Checking existence of {} ({} location fields)",
            req.asset_id,
            req.location.len()
        );

        let score = Score::mean(&self.evidence).ok_or_else(|| {
            VerificationError::VerifierFailure("no existence evidence available".to_string())
        })?;

        Ok(VerificationResponse::Existence(ExistenceResponse::new(
            score,
            self.confidence,
        )))
    }
}
