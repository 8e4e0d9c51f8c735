use crate::adapters::{fixed, mismatched};
use crate::domain::model::{
    ActivityResponse, Domain, Evidence, Score, VerificationRequest, VerificationResponse,
};
use crate::domain::ports::Verifier;
use crate::utils::error::VerificationError;
use async_trait::async_trait;

/// 經濟活動訊號（水電使用、納稅）
pub struct ActivityVerifier {
    evidence: Vec<Evidence>,
}

impl ActivityVerifier {
    pub fn new(evidence: Vec<Evidence>) -> Self {
        Self { evidence }
    }
}

impl Default for ActivityVerifier {
    fn default() -> Self {
        Self::new(vec![
            Evidence::new("utility provider", "utility_usage", fixed(0.75)),
            Evidence::new("tax registry", "tax_payment", fixed(0.75)),
        ])
    }
}

#[async_trait]
impl Verifier for ActivityVerifier {
    fn domain(&self) -> Domain {
        Domain::Activity
    }

    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError> {
        if request != VerificationRequest::Activity {
            return Err(mismatched(Domain::Activity, &request));
        }

        let score = Score::mean(&self.evidence).ok_or_else(|| {
            VerificationError::VerifierFailure("no activity signals available".to_string())
        })?;
        let signals = self.evidence.iter().map(|e| e.signal.clone()).collect();

        Ok(VerificationResponse::Activity(ActivityResponse::new(
            score, signals,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_signals() {
        let response = ActivityVerifier::default()
            .verify(VerificationRequest::Activity)
            .await
            .unwrap();
        match response {
            VerificationResponse::Activity(r) => {
                assert_eq!(r.activity_score.value(), 0.75);
                assert_eq!(r.signals, vec!["utility_usage", "tax_payment"]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
