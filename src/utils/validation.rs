use crate::utils::error::{OracleError, Result, VerificationError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(OracleError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(OracleError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(OracleError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(OracleError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

// 以下為請求欄位檢查，錯誤會以 400 回傳

/// 不透明字串，只要求非空；空白字元也算內容
pub fn require_non_empty(field_name: &str, value: &str) -> std::result::Result<(), VerificationError> {
    if value.is_empty() {
        return Err(VerificationError::BadRequest(format!("{} cannot be empty", field_name)));
    }
    Ok(())
}

pub fn require_did(field_name: &str, value: &str) -> std::result::Result<(), VerificationError> {
    require_non_empty(field_name, value)?;
    if !value.starts_with("did:") {
        return Err(VerificationError::BadRequest(format!(
            "{} must be a decentralized identifier (did:<method>:<id>)",
            field_name
        )));
    }
    Ok(())
}
