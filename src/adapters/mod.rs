// 轉接層：靜態 verifier 與透過 HTTP 轉發的 UpstreamVerifier

pub mod activity;
pub mod existence;
pub mod ownership;
pub mod upstream;

pub use activity::ActivityVerifier;
pub use existence::ExistenceVerifier;
pub use ownership::OwnershipVerifier;
pub use upstream::UpstreamVerifier;

use crate::domain::model::{Domain, Score, VerificationRequest};
use crate::utils::error::VerificationError;

// 註冊錯誤屬於伺服器設定問題，回 502 而非 400
pub(crate) fn mismatched(expected: Domain, request: &VerificationRequest) -> VerificationError {
    VerificationError::VerifierFailure(format!(
        "{} verifier received a {} request",
        expected,
        request.domain()
    ))
}

// 固定值皆在 [0, 1] 內
pub(crate) fn fixed(value: f64) -> Score {
    Score::new(value).unwrap_or_else(|_| unreachable!("fixed score {} out of range", value))
}
