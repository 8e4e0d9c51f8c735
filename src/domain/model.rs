use crate::utils::error::VerificationError;
use crate::utils::validation::{require_did, require_non_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 驗證類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Existence,
    Ownership,
    Activity,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Existence, Domain::Ownership, Domain::Activity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Existence => "existence",
            Domain::Ownership => "ownership",
            Domain::Activity => "activity",
        }
    }

    /// activity 沒有必要輸入，其餘類別需要 JSON body
    pub fn requires_body(&self) -> bool {
        !matches!(self, Domain::Activity)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "existence" => Ok(Domain::Existence),
            "ownership" => Ok(Domain::Ownership),
            "activity" => Ok(Domain::Activity),
            other => Err(VerificationError::UnsupportedDomain(other.to_string())),
        }
    }
}

/// [0, 1] 區間的分數，反序列化時同樣檢查
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, VerificationError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(VerificationError::VerifierFailure(format!(
                "score {} is outside [0, 1]",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// 證據信心值的平均；沒有證據時為 None
    pub fn mean(evidence: &[Evidence]) -> Option<Score> {
        if evidence.is_empty() {
            return None;
        }
        let total: f64 = evidence.iter().map(|e| e.confidence.value()).sum();
        // 平均值必定落在 [0, 1]
        Some(Score(total / evidence.len() as f64))
    }
}

impl TryFrom<f64> for Score {
    type Error = VerificationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// 單一訊號來源的觀測
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    pub source: String,
    pub signal: String,
    pub confidence: Score,
}

impl Evidence {
    pub fn new(source: &str, signal: &str, confidence: Score) -> Self {
        Self {
            source: source.to_string(),
            signal: signal.to_string(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistenceRequest {
    pub asset_id: String,
    pub location: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipRequest {
    pub asset_id: String,
    pub did: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationRequest {
    Existence(ExistenceRequest),
    Ownership(OwnershipRequest),
    Activity,
}

impl VerificationRequest {
    pub fn domain(&self) -> Domain {
        match self {
            VerificationRequest::Existence(_) => Domain::Existence,
            VerificationRequest::Ownership(_) => Domain::Ownership,
            VerificationRequest::Activity => Domain::Activity,
        }
    }

    /// 依類別解析 body；activity 忽略 body
    pub fn decode(domain: Domain, body: &[u8]) -> Result<Self, VerificationError> {
        let decode_err = |e: serde_json::Error| VerificationError::BadRequest(e.to_string());

        let request = match domain {
            Domain::Existence => {
                VerificationRequest::Existence(serde_json::from_slice(body).map_err(decode_err)?)
            }
            Domain::Ownership => {
                VerificationRequest::Ownership(serde_json::from_slice(body).map_err(decode_err)?)
            }
            Domain::Activity => VerificationRequest::Activity,
        };

        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), VerificationError> {
        match self {
            VerificationRequest::Existence(req) => require_non_empty("assetId", &req.asset_id),
            VerificationRequest::Ownership(req) => {
                require_non_empty("assetId", &req.asset_id)?;
                require_did("did", &req.did)
            }
            VerificationRequest::Activity => Ok(()),
        }
    }

    pub fn asset_id(&self) -> Option<&str> {
        match self {
            VerificationRequest::Existence(req) => Some(&req.asset_id),
            VerificationRequest::Ownership(req) => Some(&req.asset_id),
            VerificationRequest::Activity => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistenceResponse {
    pub score: Score,
    pub confidence: Score,
    pub timestamp: DateTime<Utc>,
}

impl ExistenceResponse {
    pub fn new(score: Score, confidence: Score) -> Self {
        Self {
            score,
            confidence,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnershipResponse {
    pub probability: Score,
    pub verified: bool,
    pub timestamp: DateTime<Utc>,
}

impl OwnershipResponse {
    pub fn new(probability: Score, verified: bool) -> Self {
        Self {
            probability,
            verified,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub activity_score: Score,
    pub signals: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityResponse {
    pub fn new(activity_score: Score, signals: Vec<String>) -> Self {
        Self {
            activity_score,
            signals,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VerificationResponse {
    Existence(ExistenceResponse),
    Ownership(OwnershipResponse),
    Activity(ActivityResponse),
}

impl VerificationResponse {
    pub fn domain(&self) -> Domain {
        match self {
            VerificationResponse::Existence(_) => Domain::Existence,
            VerificationResponse::Ownership(_) => Domain::Ownership,
            VerificationResponse::Activity(_) => Domain::Activity,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            VerificationResponse::Existence(r) => r.timestamp,
            VerificationResponse::Ownership(r) => r.timestamp,
            VerificationResponse::Activity(r) => r.timestamp,
        }
    }
}
